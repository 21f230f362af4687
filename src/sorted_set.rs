use std::cmp::min;

use crate::bucket::Bucket;
use crate::configuration::Configuration;
use crate::term::Term;
use crate::Error;
use crate::FoundData;

/// A sorted, deduplicating set of [`Term`]s stored as an ordered list of
/// bounded buckets. Adjacent buckets partition the global order; `size` is
/// always the sum of the bucket lengths. The set is single-owner and does no
/// locking of its own; see [`SetStore`](crate::SetStore) for shared use.
#[derive(Debug)]
pub struct SortedSet {
    configuration: Configuration,
    buckets: Vec<Bucket>,
    size: usize,
}

impl SortedSet {
    pub fn empty(configuration: Configuration) -> SortedSet {
        let buckets = Vec::with_capacity(configuration.initial_set_capacity);

        SortedSet {
            configuration,
            buckets,
            size: 0,
        }
    }

    pub fn new(configuration: Configuration) -> SortedSet {
        let mut result = SortedSet::empty(configuration);
        result.buckets.push(Bucket::default());
        result
    }

    /// Bulk-append a pre-sorted run of items as a new trailing bucket. The
    /// caller guarantees `items` is strictly ascending and sorts after every
    /// item already in the set; violations leave the set unordered.
    pub fn append_bucket(&mut self, items: Vec<Term>) -> Result<(), Error> {
        if items.len() >= self.configuration.max_bucket_size.get() {
            return Err(Error::MaxBucketSizeExceeded);
        }

        debug_assert!(
            items.windows(2).all(|pair| pair[0] < pair[1]),
            "appended bucket must be strictly ascending"
        );
        debug_assert!(
            match (self.last_item(), items.first()) {
                (Some(greatest), Some(first)) => greatest < first,
                _ => true,
            },
            "appended bucket must sort after every existing item"
        );

        self.size += items.len();
        self.buckets.push(Bucket { items });

        Ok(())
    }

    // Callers treat 0 on a bucketless set as "no bucket exists".
    #[inline]
    pub fn find_bucket_index(&self, item: &Term) -> usize {
        if self.buckets.is_empty() {
            return 0;
        }

        match self
            .buckets
            .binary_search_by(|bucket| bucket.item_compare(item))
        {
            Ok(idx) => idx,
            // Past the last bucket clamps to it, so inserts beyond the
            // current maximum land there and split it if needed.
            Err(idx) => min(idx, self.buckets.len() - 1),
        }
    }

    pub fn find_index(&self, item: &Term) -> Result<FoundData, Error> {
        let bucket_idx = self.find_bucket_index(item);
        let bucket = self.buckets.get(bucket_idx).ok_or(Error::NotFound)?;

        match bucket.items.binary_search(item) {
            Ok(inner_idx) => Ok(FoundData {
                bucket_idx,
                inner_idx,
                idx: self.effective_index(bucket_idx, inner_idx),
            }),
            Err(_) => Err(Error::NotFound),
        }
    }

    #[inline]
    fn effective_index(&self, bucket_idx: usize, inner_idx: usize) -> usize {
        inner_idx
            + self.buckets[..bucket_idx]
                .iter()
                .map(Bucket::len)
                .sum::<usize>()
    }

    pub fn add(&mut self, item: Term) -> Result<usize, Error> {
        if self.buckets.is_empty() {
            self.buckets.push(Bucket::default());
        }

        let bucket_idx = self.find_bucket_index(&item);

        match self.buckets[bucket_idx].add(item) {
            Ok(inner_idx) => {
                // Computed before any split; splitting preserves order, so it
                // is also the post-split index.
                let effective_idx = self.effective_index(bucket_idx, inner_idx);

                if self.buckets[bucket_idx].len() >= self.configuration.max_bucket_size.get() {
                    let tail = self.buckets[bucket_idx].split();
                    self.buckets.insert(bucket_idx + 1, tail);
                }

                self.size += 1;

                Ok(effective_idx)
            }
            Err(Error::Duplicate(inner_idx)) => {
                Err(Error::Duplicate(self.effective_index(bucket_idx, inner_idx)))
            }
            Err(e) => Err(e),
        }
    }

    pub fn remove(&mut self, item: &Term) -> Result<usize, Error> {
        let FoundData {
            bucket_idx,
            inner_idx,
            idx,
        } = self.find_index(item)?;

        // A hit while the running count says empty means the count and the
        // buckets have diverged; the structure is corrupt.
        assert!(
            self.size > 0,
            "found {item:?} in a set whose size is 0: {:?}",
            self.buckets
        );

        self.buckets[bucket_idx].items.remove(inner_idx);

        if self.buckets.len() > 1 && self.buckets[bucket_idx].is_empty() {
            self.buckets.remove(bucket_idx);
        }

        self.size -= 1;

        Ok(idx)
    }

    pub fn at(&self, index: usize) -> Option<&Term> {
        let mut remaining = index;

        for bucket in &self.buckets {
            if remaining < bucket.len() {
                return Some(&bucket.items[remaining]);
            }
            remaining -= bucket.len();
        }

        None
    }

    // Requests past the end of the set clamp silently.
    pub fn slice(&self, start: usize, amount: usize) -> Vec<Term> {
        let available = self.size.saturating_sub(start);
        let mut result = Vec::with_capacity(min(amount, available));

        let mut skip = start;
        let mut remaining = amount;

        for bucket in &self.buckets {
            if remaining == 0 {
                break;
            }

            if skip >= bucket.len() {
                // The slice starts in a later bucket.
                skip -= bucket.len();
                continue;
            }

            let take = min(bucket.len() - skip, remaining);
            result.extend_from_slice(&bucket.items[skip..skip + take]);

            remaining -= take;
            skip = 0;
        }

        result
    }

    pub fn to_vec(&self) -> Vec<Term> {
        let mut items = Vec::with_capacity(self.size);

        for bucket in &self.buckets {
            items.extend_from_slice(&bucket.items);
        }

        items
    }

    pub fn size(&self) -> usize {
        self.size
    }

    // Diagnostics only; no stability contract on the format.
    pub fn debug(&self) -> String {
        format!("{:#?}", self)
    }

    fn last_item(&self) -> Option<&Term> {
        self.buckets.last().and_then(|bucket| bucket.items.last())
    }
}

impl Default for SortedSet {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}
