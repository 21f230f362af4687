use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::configuration::Configuration;
use crate::sorted_set::SortedSet;
use crate::term::Term;
use crate::value::{decode_all, Value};
use crate::Error;

/// Opaque identifier a host uses to name a set owned by a [`SetStore`].
/// Ids are never reused; a released id stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(u64);

struct SetResource(Mutex<SortedSet>);

/// Successful outcomes returned to the host. `Duplicate` lives here rather
/// than in [`Error`]: reporting an existing item's position is an answer,
/// not a failure.
#[derive(Debug, PartialEq)]
pub enum Reply {
    Added(usize),
    Duplicate(usize),
    Removed(usize),
    Appended,
    Size(usize),
    Index(usize),
    Item(Value),
    List(Vec<Value>),
    Debug(String),
}

/// Registry of live sets, exposing every set operation against opaque
/// handles. Each set sits behind its own lock, acquired non-blockingly: a
/// caller racing another on the same handle gets [`Error::LockFail`]
/// immediately and decides for itself whether to retry. Releasing a handle
/// removes the registry entry; the set and every term in it are freed once
/// the last in-flight operation on it finishes.
pub struct SetStore {
    sets: RwLock<HashMap<u64, Arc<SetResource>>>,
    next_id: AtomicU64,
}

impl SetStore {
    pub fn new() -> SetStore {
        SetStore {
            sets: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn empty_set(
        &self,
        initial_item_capacity: usize,
        max_bucket_size: usize,
    ) -> Result<HandleId, Error> {
        let configuration = configure(initial_item_capacity, max_bucket_size)?;
        Ok(self.insert(SortedSet::empty(configuration)))
    }

    pub fn new_set(
        &self,
        initial_item_capacity: usize,
        max_bucket_size: usize,
    ) -> Result<HandleId, Error> {
        let configuration = configure(initial_item_capacity, max_bucket_size)?;
        Ok(self.insert(SortedSet::new(configuration)))
    }

    pub fn release(&self, handle: HandleId) -> Result<(), Error> {
        self.sets
            .write()
            .remove(&handle.0)
            .map(drop)
            .ok_or(Error::BadReference)
    }

    pub fn add(&self, handle: HandleId, value: Value) -> Result<Reply, Error> {
        let resource = self.resolve(handle)?;
        let item = Term::try_from(value)?;

        let mut set = resource.0.try_lock().ok_or(Error::LockFail)?;

        match set.add(item) {
            Ok(idx) => Ok(Reply::Added(idx)),
            Err(Error::Duplicate(idx)) => Ok(Reply::Duplicate(idx)),
            Err(e) => Err(e),
        }
    }

    pub fn remove(&self, handle: HandleId, value: Value) -> Result<Reply, Error> {
        let resource = self.resolve(handle)?;
        let item = Term::try_from(value)?;

        let mut set = resource.0.try_lock().ok_or(Error::LockFail)?;

        set.remove(&item).map(Reply::Removed)
    }

    pub fn append_bucket(&self, handle: HandleId, values: Vec<Value>) -> Result<Reply, Error> {
        let resource = self.resolve(handle)?;
        let items = decode_all(values)?;

        let mut set = resource.0.try_lock().ok_or(Error::LockFail)?;

        set.append_bucket(items).map(|()| Reply::Appended)
    }

    pub fn size(&self, handle: HandleId) -> Result<Reply, Error> {
        let resource = self.resolve(handle)?;
        let set = resource.0.try_lock().ok_or(Error::LockFail)?;

        Ok(Reply::Size(set.size()))
    }

    pub fn to_list(&self, handle: HandleId) -> Result<Reply, Error> {
        let resource = self.resolve(handle)?;
        let set = resource.0.try_lock().ok_or(Error::LockFail)?;

        Ok(Reply::List(
            set.to_vec().into_iter().map(Value::from).collect(),
        ))
    }

    pub fn at(&self, handle: HandleId, index: usize) -> Result<Reply, Error> {
        let resource = self.resolve(handle)?;
        let set = resource.0.try_lock().ok_or(Error::LockFail)?;

        match set.at(index) {
            Some(item) => Ok(Reply::Item(Value::from(item.clone()))),
            None => Err(Error::IndexOutOfBounds),
        }
    }

    pub fn slice(&self, handle: HandleId, start: usize, amount: usize) -> Result<Reply, Error> {
        let resource = self.resolve(handle)?;
        let set = resource.0.try_lock().ok_or(Error::LockFail)?;

        Ok(Reply::List(
            set.slice(start, amount).into_iter().map(Value::from).collect(),
        ))
    }

    pub fn find_index(&self, handle: HandleId, value: Value) -> Result<Reply, Error> {
        let resource = self.resolve(handle)?;
        let item = Term::try_from(value)?;

        let set = resource.0.try_lock().ok_or(Error::LockFail)?;

        set.find_index(&item).map(|found| Reply::Index(found.idx))
    }

    pub fn debug(&self, handle: HandleId) -> Result<Reply, Error> {
        let resource = self.resolve(handle)?;
        let set = resource.0.try_lock().ok_or(Error::LockFail)?;

        Ok(Reply::Debug(set.debug()))
    }

    fn resolve(&self, handle: HandleId) -> Result<Arc<SetResource>, Error> {
        self.sets
            .read()
            .get(&handle.0)
            .cloned()
            .ok_or(Error::BadReference)
    }

    fn insert(&self, set: SortedSet) -> HandleId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.sets
            .write()
            .insert(id, Arc::new(SetResource(Mutex::new(set))));
        HandleId(id)
    }
}

impl Default for SetStore {
    fn default() -> Self {
        Self::new()
    }
}

fn configure(initial_item_capacity: usize, max_bucket_size: usize) -> Result<Configuration, Error> {
    let max_bucket_size =
        NonZeroUsize::new(max_bucket_size).ok_or(Error::InvalidConfiguration)?;

    Ok(Configuration {
        max_bucket_size,
        initial_set_capacity: initial_item_capacity / max_bucket_size.get() + 1,
    })
}
