use std::cmp::Ordering;

use crate::Error;
use crate::term::Term;

/// A bounded, sorted run of terms; the unit of storage inside the set. The
/// bucket never enforces the size bound itself: `add` may overshoot it by one
/// item, and the owning set splits the bucket right afterwards.
#[derive(Debug, Default, PartialEq)]
pub struct Bucket {
    pub(crate) items: Vec<Term>,
}

impl Bucket {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, item: Term) -> Result<usize, Error> {
        match self.items.binary_search(&item) {
            Ok(idx) => Err(Error::Duplicate(idx)),
            Err(idx) => {
                self.items.insert(idx, item);
                Ok(idx)
            }
        }
    }

    pub fn split(&mut self) -> Bucket {
        let at = self.items.len() / 2;

        // Give the tail the same capacity as the left half so both sides can
        // fill back up without reallocating.
        let mut tail = Vec::with_capacity(self.items.capacity());
        tail.extend(self.items.drain(at..));

        Bucket { items: tail }
    }

    // Range predicate for the top-level bucket search. An empty bucket is
    // Equal to everything so that it attracts the first insert; boundary hits
    // are Equal because the bucket owns its boundaries.
    pub fn item_compare(&self, item: &Term) -> Ordering {
        let (Some(first), Some(last)) = (self.items.first(), self.items.last()) else {
            return Ordering::Equal;
        };

        if item < first {
            Ordering::Greater
        } else if last < item {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}
