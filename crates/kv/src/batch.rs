use std::collections::{btree_map, BTreeMap};

/// A single pending mutation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WriteOp {
    Put(Vec<u8>),
    Delete,
}

/// Ordered set of pending mutations, at most one per key.
///
/// Later writes to a key replace earlier ones, so applying the batch yields the
/// same state as replaying every write in order. Iteration is in key order,
/// which keeps commits deterministic across nodes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WriteBatch {
    ops: BTreeMap<Vec<u8>, WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: &[u8], value: Vec<u8>) {
        self.ops.insert(key.to_vec(), WriteOp::Put(value));
    }

    pub fn delete(&mut self, key: &[u8]) {
        self.ops.insert(key.to_vec(), WriteOp::Delete);
    }

    /// Returns the pending op for `key`, if the batch touches it.
    pub fn get(&self, key: &[u8]) -> Option<&WriteOp> {
        self.ops.get(key)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &WriteOp)> {
        self.ops.iter().map(|(k, op)| (k.as_slice(), op))
    }
}

impl IntoIterator for WriteBatch {
    type Item = (Vec<u8>, WriteOp);
    type IntoIter = btree_map::IntoIter<Vec<u8>, WriteOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}
