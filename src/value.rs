use crate::Error;
use crate::term::Term;

/// Value is the host-side encoding of a term crossing the facade.
///
/// It covers everything a host may hand us, including things a set can
/// never store. Decoding into a [`Term`] refuses the unstorable kinds:
///
///   - `Float`: no stable total order against the other variants.
///   - `Opaque`: handles to host resources (processes, references, ports,
///     functions) whose identity the set cannot own.
///
/// A composite containing one of these anywhere is refused as a whole.
///
/// Booleans are not listed because hosts encode them as atoms.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Atom(String),
    Bitstring(String),
    Tuple(Vec<Value>),
    List(Vec<Value>),
    /// An opaque host resource handle, identified only for round-tripping.
    Opaque(u64),
}

impl TryFrom<Value> for Term {
    type Error = Error;

    fn try_from(value: Value) -> Result<Term, Error> {
        match value {
            Value::Integer(inner) => Ok(Term::Integer(inner)),
            Value::Atom(inner) => Ok(Term::Atom(inner)),
            Value::Bitstring(inner) => Ok(Term::Bitstring(inner)),
            Value::Tuple(inner) => Ok(Term::Tuple(decode_all(inner)?)),
            Value::List(inner) => Ok(Term::List(decode_all(inner)?)),
            Value::Float(_) | Value::Opaque(_) => Err(Error::UnsupportedType),
        }
    }
}

pub(crate) fn decode_all(values: Vec<Value>) -> Result<Vec<Term>, Error> {
    values.into_iter().map(Term::try_from).collect()
}

impl From<Term> for Value {
    fn from(term: Term) -> Value {
        match term {
            Term::Integer(inner) => Value::Integer(inner),
            Term::Atom(inner) => Value::Atom(inner),
            Term::Bitstring(inner) => Value::Bitstring(inner),
            Term::Tuple(inner) => Value::Tuple(encode_all(inner)),
            Term::List(inner) => Value::List(encode_all(inner)),
        }
    }
}

fn encode_all(terms: Vec<Term>) -> Vec<Value> {
    terms.into_iter().map(Value::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_flat_values() {
        assert_eq!(Term::try_from(Value::Integer(7)), Ok(Term::Integer(7)));
        assert_eq!(
            Term::try_from(Value::Atom(String::from("ok"))),
            Ok(Term::Atom(String::from("ok")))
        );
        assert_eq!(
            Term::try_from(Value::Bitstring(String::from("payload"))),
            Ok(Term::Bitstring(String::from("payload")))
        );
    }

    #[test]
    fn test_decodes_nested_composites() {
        let value = Value::Tuple(vec![
            Value::Integer(1),
            Value::List(vec![Value::Atom(String::from("a")), Value::Integer(2)]),
        ]);

        let term = Term::try_from(value).unwrap();

        assert_eq!(
            term,
            Term::Tuple(vec![
                Term::Integer(1),
                Term::List(vec![Term::Atom(String::from("a")), Term::Integer(2)]),
            ])
        );
    }

    #[test]
    fn test_refuses_float() {
        assert_eq!(
            Term::try_from(Value::Float(1.5)),
            Err(Error::UnsupportedType)
        );
    }

    #[test]
    fn test_refuses_opaque_resource() {
        assert_eq!(
            Term::try_from(Value::Opaque(42)),
            Err(Error::UnsupportedType)
        );
    }

    #[test]
    fn test_refuses_composite_containing_an_unsupported_value() {
        let value = Value::List(vec![
            Value::Integer(1),
            Value::Tuple(vec![Value::Float(0.0)]),
        ]);

        assert_eq!(Term::try_from(value), Err(Error::UnsupportedType));
    }

    #[test]
    fn test_encode_round_trips_storable_values() {
        let value = Value::Tuple(vec![
            Value::Integer(-3),
            Value::Bitstring(String::from("x")),
            Value::List(vec![Value::Atom(String::from("y"))]),
        ]);

        let term = Term::try_from(value.clone()).unwrap();

        assert_eq!(Value::from(term), value);
    }
}
