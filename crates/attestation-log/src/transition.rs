//! Block-scoped execution of log mutations.

use qgb_attestation_types::{AttestationCodec, BorshCodec};
use qgb_kv::{BlockTxn, KvBackend, KvError};
use thiserror::Error;
use tracing::*;

use crate::{AttestationEvent, AttestationLog, InvariantViolation};

/// What a successfully committed block produced.
#[derive(Debug)]
pub struct BlockOutput<T> {
    pub height: u64,
    pub value: T,
    pub events: Vec<AttestationEvent>,
}

#[derive(Debug, Error)]
pub enum TransitionError {
    /// The block broke a log invariant. None of its writes were committed.
    #[error("block {height} aborted: {violation}")]
    Aborted {
        height: u64,
        #[source]
        violation: InvariantViolation,
    },

    #[error("failed to commit block: {0}")]
    Commit(#[from] KvError),
}

/// Runs `f` against a fresh overlay of `backend` and commits the overlay if
/// `f` succeeds.
///
/// On an [`InvariantViolation`] the overlay is dropped, leaving the backend
/// exactly as it was before the block. This also holds when `f` swallows the
/// violation and returns `Ok`, since the log stays halted.
pub fn execute_block<'b, B, T, F>(
    backend: &'b B,
    height: u64,
    f: F,
) -> Result<BlockOutput<T>, TransitionError>
where
    B: KvBackend,
    F: FnOnce(&mut AttestationLog<BlockTxn<'b, B>>) -> Result<T, InvariantViolation>,
{
    execute_block_with_codec(backend, BorshCodec, height, f)
}

/// Like [`execute_block`] with a caller-provided codec.
pub fn execute_block_with_codec<'b, B, C, T, F>(
    backend: &'b B,
    codec: C,
    height: u64,
    f: F,
) -> Result<BlockOutput<T>, TransitionError>
where
    B: KvBackend,
    C: AttestationCodec,
    F: FnOnce(&mut AttestationLog<BlockTxn<'b, B>, C>) -> Result<T, InvariantViolation>,
{
    let mut log = AttestationLog::with_codec(BlockTxn::new(backend), codec);

    let res = f(&mut log).and_then(|value| match log.halted() {
        Some(violation) => Err(violation.clone()),
        None => Ok(value),
    });

    match res {
        Ok(value) => {
            let events = log.take_events();
            let txn = log.into_inner();
            let ops = txn.pending().len();
            txn.commit()?;

            info!(%height, %ops, events = events.len(), "committed block");
            Ok(BlockOutput {
                height,
                value,
                events,
            })
        }
        Err(violation) => {
            error!(%height, %violation, "attestation log invariant violated, aborting block");
            log.into_inner().discard();
            Err(TransitionError::Aborted { height, violation })
        }
    }
}
