//! Contract state
//!
//! Committed entries live in [`MemoryStorage`]. Uncommitted writes are
//! collected in [`Changes`] layers (one per block, one per call) and
//! only applied once the layer is accepted.

use landreg_common::{value::ContractId, Value};
use std::collections::{
    btree_map::{Entry, IntoIter},
    BTreeMap,
};

/// Location of one map entry
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct StorageKey {
    pub contract: ContractId,
    pub map: String,
    // Canonical literal of the key value
    pub key: String,
}

impl StorageKey {
    pub fn new(contract: &ContractId, map: &str, key: &Value) -> Self {
        Self {
            contract: contract.clone(),
            map: map.to_string(),
            key: key.to_string(),
        }
    }
}

/// Previous state of an entry touched by a write
#[derive(Debug, PartialEq, Eq)]
pub enum EntryState<V> {
    Stored(V),
    Deleted,
    Absent,
}

/// Pending writes; `None` marks a deletion
#[derive(Clone, Debug, Default)]
pub struct Changes {
    writes: BTreeMap<StorageKey, Option<Value>>,
}

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: StorageKey, value: Value) -> EntryState<Value> {
        match self.writes.insert(key, Some(value)) {
            Some(Some(prev)) => EntryState::Stored(prev),
            Some(None) => EntryState::Deleted,
            None => EntryState::Absent,
        }
    }

    pub fn remove(&mut self, key: StorageKey) -> EntryState<Value> {
        match self.writes.entry(key) {
            Entry::Occupied(mut entry) => match entry.get_mut().take() {
                Some(v) => EntryState::Stored(v),
                None => EntryState::Deleted,
            },
            Entry::Vacant(v) => {
                v.insert(None);
                EntryState::Absent
            }
        }
    }

    /// `Some(None)` if the key was deleted in this layer, `None` if untouched
    pub fn lookup(&self, key: &StorageKey) -> Option<Option<&Value>> {
        self.writes.get(key).map(Option::as_ref)
    }

    /// Fold a newer layer on top of this one
    pub fn merge(&mut self, newer: Changes) {
        self.writes.extend(newer.writes);
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

impl IntoIterator for Changes {
    type Item = (StorageKey, Option<Value>);
    type IntoIter = IntoIter<StorageKey, Option<Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<StorageKey, Value>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &StorageKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn apply(&mut self, changes: Changes) {
        for (key, value) in changes {
            match value {
                Some(v) => {
                    self.entries.insert(key, v);
                }
                None => {
                    self.entries.remove(&key);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-through view: newest layer first, committed storage last
pub struct LayeredView<'a> {
    pub base: &'a MemoryStorage,
    pub layers: Vec<&'a Changes>,
}

impl<'a> LayeredView<'a> {
    pub fn get(&self, key: &StorageKey) -> Option<&'a Value> {
        for layer in self.layers.iter().rev().copied() {
            if let Some(entry) = layer.lookup(key) {
                return entry;
            }
        }
        self.base.get(key)
    }
}
