//! An in-memory sorted, deduplicating set of dynamic terms, kept in a flat
//! sequence of bounded, internally sorted buckets. [`SortedSet`] is the
//! single-owner core; hosts that share sets across threads hold them in a
//! [`SetStore`], which issues opaque handles and serializes access per set
//! with a non-blocking lock.

mod bucket;
mod configuration;
mod facade;
mod sorted_set;
mod term;
mod value;

pub use configuration::{Configuration, DEFAULT_MAX_BUCKET_SIZE};
pub use facade::{HandleId, Reply, SetStore};
pub use sorted_set::SortedSet;
pub use term::Term;
pub use value::Value;

use thiserror::Error;

/// Logical outcomes and failures of set operations, always reported as
/// values rather than panics.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("item already present at index {0}")]
    Duplicate(usize),

    #[error("item not found")]
    NotFound,

    #[error("index out of bounds")]
    IndexOutOfBounds,

    #[error("bucket would exceed max bucket size")]
    MaxBucketSizeExceeded,

    #[error("value contains an unsupported type")]
    UnsupportedType,

    #[error("bad set reference")]
    BadReference,

    #[error("failed to acquire the set lock")]
    LockFail,

    #[error("invalid configuration: max_bucket_size must be at least 1")]
    InvalidConfiguration,
}

/// Location of an item produced by [`SortedSet::find_index`].
#[derive(Debug, PartialEq, Eq)]
pub struct FoundData {
    pub bucket_idx: usize,
    pub inner_idx: usize,
    pub idx: usize,
}
