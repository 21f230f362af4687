use std::num::NonZeroUsize;

use crate::Error;

/// Bucket size limit applied when no explicit configuration is given.
pub const DEFAULT_MAX_BUCKET_SIZE: NonZeroUsize = NonZeroUsize::new(500).unwrap();

/// Immutable tuning for a [`SortedSet`](crate::SortedSet).
#[derive(Debug, Clone, Copy)]
pub struct Configuration {
    /// Internally we maintain buckets to reduce the cost of inserts. This
    /// configures how large a bucket can grow before it is split.
    ///
    /// Default: 500
    pub max_bucket_size: NonZeroUsize,

    /// Similarly to a bucket, the set maintains a Vec of buckets. This lets
    /// you preallocate to avoid resizing the Vector if you can anticipate
    /// the size.
    ///
    /// Default: 0
    pub initial_set_capacity: usize,
}

impl Configuration {
    // Checked constructor for callers holding plain integers.
    pub fn new(max_bucket_size: usize, initial_set_capacity: usize) -> Result<Self, Error> {
        let max_bucket_size =
            NonZeroUsize::new(max_bucket_size).ok_or(Error::InvalidConfiguration)?;

        Ok(Self {
            max_bucket_size,
            initial_set_capacity,
        })
    }

    pub fn with_max_bucket_size(max_bucket_size: NonZeroUsize) -> Self {
        Self {
            max_bucket_size,
            ..Self::default()
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_bucket_size: DEFAULT_MAX_BUCKET_SIZE,
            initial_set_capacity: 0,
        }
    }
}
