//! Trait definitions for the store interfaces consumed by state-machine code.

use crate::{KvResult, WriteBatch};

/// Point lookups against a byte-keyed store.
pub trait KvRead {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &[u8]) -> KvResult<Option<Vec<u8>>>;

    /// Returns whether `key` holds a value.
    fn has(&self, key: &[u8]) -> KvResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Mutable byte-keyed store used while executing a block.
///
/// Writes made through this interface are only durable once whatever owns the
/// store commits them. See [`BlockTxn`](crate::BlockTxn).
pub trait KvStore: KvRead {
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> KvResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> KvResult<()>;
}

/// Committed, persistent store that block overlays are applied to.
pub trait KvBackend: KvRead + Send + Sync {
    /// Applies every operation in `batch` atomically. If this fails the store
    /// MUST be left unchanged.
    fn commit(&self, batch: WriteBatch) -> KvResult<()>;
}

impl<T: KvRead + ?Sized> KvRead for &T {
    fn get(&self, key: &[u8]) -> KvResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn has(&self, key: &[u8]) -> KvResult<bool> {
        (**self).has(key)
    }
}

impl<T: KvRead + ?Sized> KvRead for &mut T {
    fn get(&self, key: &[u8]) -> KvResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn has(&self, key: &[u8]) -> KvResult<bool> {
        (**self).has(key)
    }
}

impl<T: KvStore + ?Sized> KvStore for &mut T {
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> KvResult<()> {
        (**self).set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> KvResult<()> {
        (**self).delete(key)
    }
}
