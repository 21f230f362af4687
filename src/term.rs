use std::cmp::Ordering;

/// Term covers every dynamic value the set can store.
///
/// A term exclusively owns its payload: cloning produces a fully independent
/// deep copy and dropping releases the whole subtree. Terms move into the set
/// by value and the set frees whatever it does not keep.
///
/// Host resources (floats, processes, references, ports, functions) are
/// refused at the boundary before a `Term` is ever built; see
/// [`Value`](crate::Value). Atom names and bitstring payloads are UTF-8 by
/// construction, so byte-wise comparison is well defined.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Term {
    Integer(i64),
    Atom(String),
    Tuple(Vec<Term>),
    List(Vec<Term>),
    Bitstring(String),
}

impl Term {
    // Terms of different variants always order by this table, regardless of
    // content.
    fn rank(&self) -> u8 {
        match self {
            Term::Integer(_) => 0,
            Term::Atom(_) => 1,
            Term::Tuple(_) => 2,
            Term::List(_) => 3,
            Term::Bitstring(_) => 4,
        }
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Term) -> Ordering {
        match (self, other) {
            (Term::Integer(lhs), Term::Integer(rhs)) => lhs.cmp(rhs),
            (Term::Atom(lhs), Term::Atom(rhs)) => lhs.cmp(rhs),
            // Tuples order by arity first; equal arities compare element-wise.
            (Term::Tuple(lhs), Term::Tuple(rhs)) => {
                lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs))
            }
            // Lists compare element-wise up to the shorter length; a list is
            // smaller than any list it prefixes. Slice ordering is exactly
            // that.
            (Term::List(lhs), Term::List(rhs)) => lhs.cmp(rhs),
            (Term::Bitstring(lhs), Term::Bitstring(rhs)) => lhs.cmp(rhs),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Term) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
