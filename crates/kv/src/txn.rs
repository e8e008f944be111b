use std::fmt;

use tracing::*;

use crate::{KvBackend, KvRead, KvResult, KvStore, WriteBatch, WriteOp};

/// Copy-on-write overlay for store modifications during block execution.
///
/// Reads check the overlay first, then fall through to the committed backend.
/// Writes only ever land in the overlay. [`BlockTxn::commit`] applies the whole
/// overlay to the backend in one atomic batch; dropping the overlay (or calling
/// [`BlockTxn::discard`]) loses every write made during the block.
pub struct BlockTxn<'b, B: KvBackend> {
    base: &'b B,
    pending: WriteBatch,
}

impl<B: KvBackend> fmt::Debug for BlockTxn<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockTxn")
            .field("pending_ops", &self.pending.len())
            .finish()
    }
}

impl<'b, B: KvBackend> BlockTxn<'b, B> {
    pub fn new(base: &'b B) -> Self {
        Self {
            base,
            pending: WriteBatch::new(),
        }
    }

    /// Returns the writes accumulated so far.
    pub fn pending(&self) -> &WriteBatch {
        &self.pending
    }

    /// Atomically applies the overlay to the backend.
    pub fn commit(self) -> KvResult<()> {
        let ops = self.pending.len();
        if ops == 0 {
            trace!("empty block overlay, nothing to commit");
            return Ok(());
        }
        self.base.commit(self.pending)?;
        debug!(%ops, "committed block overlay");
        Ok(())
    }

    /// Throws away every write made through this overlay.
    pub fn discard(self) {
        debug!(ops = %self.pending.len(), "discarding block overlay");
    }
}

impl<B: KvBackend> KvRead for BlockTxn<'_, B> {
    fn get(&self, key: &[u8]) -> KvResult<Option<Vec<u8>>> {
        match self.pending.get(key) {
            Some(WriteOp::Put(v)) => Ok(Some(v.clone())),
            Some(WriteOp::Delete) => Ok(None),
            None => self.base.get(key),
        }
    }

    fn has(&self, key: &[u8]) -> KvResult<bool> {
        match self.pending.get(key) {
            Some(WriteOp::Put(_)) => Ok(true),
            Some(WriteOp::Delete) => Ok(false),
            None => self.base.has(key),
        }
    }
}

impl<B: KvBackend> KvStore for BlockTxn<'_, B> {
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> KvResult<()> {
        self.pending.put(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> KvResult<()> {
        self.pending.delete(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::MemKvStore;

    fn seeded_backend() -> MemKvStore {
        let mut batch = WriteBatch::new();
        batch.put(b"committed", vec![7]);
        let backend = MemKvStore::new();
        backend.commit(batch).unwrap();
        backend
    }

    #[test]
    fn test_reads_fall_through_to_base() {
        let backend = seeded_backend();
        let txn = BlockTxn::new(&backend);
        assert_eq!(txn.get(b"committed").unwrap(), Some(vec![7]));
        assert!(txn.has(b"committed").unwrap());
        assert!(!txn.has(b"missing").unwrap());
    }

    #[test]
    fn test_overlay_shadows_base() {
        let backend = seeded_backend();
        let mut txn = BlockTxn::new(&backend);
        txn.set(b"new", vec![1]).unwrap();
        txn.delete(b"committed").unwrap();

        assert_eq!(txn.get(b"new").unwrap(), Some(vec![1]));
        assert!(!txn.has(b"committed").unwrap());

        // Nothing reached the backend yet.
        assert_eq!(backend.get(b"committed").unwrap(), Some(vec![7]));
        assert!(!backend.has(b"new").unwrap());
    }

    #[test]
    fn test_commit_applies_everything() {
        let backend = seeded_backend();
        let mut txn = BlockTxn::new(&backend);
        txn.set(b"new", vec![1]).unwrap();
        txn.delete(b"committed").unwrap();
        txn.commit().unwrap();

        assert_eq!(backend.get(b"new").unwrap(), Some(vec![1]));
        assert!(!backend.has(b"committed").unwrap());
    }

    fn op_strategy() -> impl Strategy<Value = (u8, Option<u8>)> {
        // Small key space so ops collide.
        (0u8..6, proptest::option::of(any::<u8>()))
    }

    proptest! {
        #[test]
        fn proptest_commit_matches_direct_writes(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let backend = seeded_backend();
            let mut direct = MemKvStore::new();
            direct.set(b"committed", vec![7]).unwrap();

            let mut txn = BlockTxn::new(&backend);
            for (key, value) in &ops {
                let key = [*key];
                match value {
                    Some(v) => {
                        txn.set(&key, vec![*v]).unwrap();
                        direct.set(&key, vec![*v]).unwrap();
                    }
                    None => {
                        txn.delete(&key).unwrap();
                        direct.delete(&key).unwrap();
                    }
                }
                prop_assert_eq!(txn.get(&key).unwrap(), direct.get(&key).unwrap());
            }
            txn.commit().unwrap();

            prop_assert_eq!(backend.snapshot(), direct.snapshot());
        }
    }

    #[test]
    fn test_discard_leaves_base_untouched() {
        let backend = seeded_backend();
        let mut txn = BlockTxn::new(&backend);
        txn.set(b"new", vec![1]).unwrap();
        txn.delete(b"committed").unwrap();
        txn.discard();

        assert_eq!(backend.get(b"committed").unwrap(), Some(vec![7]));
        assert!(!backend.has(b"new").unwrap());
    }
}
