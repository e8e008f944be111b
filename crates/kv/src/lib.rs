//! Byte-keyed key-value store interfaces for consensus state.
//!
//! The attestation log never talks to a storage engine directly. It sees a
//! [`KvStore`] (point reads and writes) and, at block boundaries, a
//! [`KvBackend`] that can atomically apply a [`WriteBatch`]. Block execution
//! runs on a [`BlockTxn`], a copy-on-write overlay that is either committed as
//! a whole or thrown away.

mod batch;
mod errors;
mod init;
mod mem;
mod sled_backend;
mod traits;
mod txn;

pub use batch::{WriteBatch, WriteOp};
pub use errors::{KvError, KvResult};
pub use init::{open_sled_database, SLED_NAME};
pub use mem::MemKvStore;
pub use sled_backend::SledKvStore;
pub use traits::{KvBackend, KvRead, KvStore};
pub use txn::BlockTxn;
