use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::{KvBackend, KvRead, KvResult, KvStore, WriteBatch, WriteOp};

/// In-memory store, used in tests and as a stand-in backend.
#[derive(Debug, Default)]
pub struct MemKvStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copies out every stored pair, in key order.
    pub fn snapshot(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl KvRead for MemKvStore {
    fn get(&self, key: &[u8]) -> KvResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn has(&self, key: &[u8]) -> KvResult<bool> {
        Ok(self.entries.read().contains_key(key))
    }
}

impl KvStore for MemKvStore {
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> KvResult<()> {
        self.entries.get_mut().insert(key.to_vec(), value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> KvResult<()> {
        self.entries.get_mut().remove(key);
        Ok(())
    }
}

impl KvBackend for MemKvStore {
    fn commit(&self, batch: WriteBatch) -> KvResult<()> {
        let mut entries = self.entries.write();
        for (key, op) in batch {
            match op {
                WriteOp::Put(value) => {
                    entries.insert(key, value);
                }
                WriteOp::Delete => {
                    entries.remove(&key);
                }
            }
        }
        Ok(())
    }
}
