use std::fmt;

use sled::{Batch, Db, Tree};
use tracing::*;

use crate::{KvBackend, KvRead, KvResult, WriteBatch, WriteOp};

/// Name of the sled tree holding consensus state.
const STATE_TREE_NAME: &str = "qgb_state";

/// Sled-backed committed store.
///
/// All consensus keys live in a single tree, so a block overlay maps onto one
/// [`sled::Batch`] and commits atomically.
#[derive(Clone)]
pub struct SledKvStore {
    tree: Tree,
}

impl fmt::Debug for SledKvStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SledKvStore")
            .field("tree", &STATE_TREE_NAME)
            .field("len", &self.tree.len())
            .finish()
    }
}

impl SledKvStore {
    /// Opens the state tree of an already opened sled database.
    pub fn new(db: &Db) -> KvResult<Self> {
        let tree = db.open_tree(STATE_TREE_NAME)?;
        Ok(Self { tree })
    }

    /// Opens a throwaway database that is removed on drop.
    pub fn temporary() -> KvResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::new(&db)
    }
}

impl KvRead for SledKvStore {
    fn get(&self, key: &[u8]) -> KvResult<Option<Vec<u8>>> {
        Ok(self.tree.get(key)?.map(|v| v.to_vec()))
    }

    fn has(&self, key: &[u8]) -> KvResult<bool> {
        Ok(self.tree.contains_key(key)?)
    }
}

impl KvBackend for SledKvStore {
    fn commit(&self, batch: WriteBatch) -> KvResult<()> {
        let mut sled_batch = Batch::default();
        for (key, op) in batch {
            match op {
                WriteOp::Put(value) => sled_batch.insert(key, value),
                WriteOp::Delete => sled_batch.remove(key),
            }
        }

        self.tree.apply_batch(sled_batch)?;
        self.tree.flush()?;
        trace!("applied sled batch");
        Ok(())
    }
}
