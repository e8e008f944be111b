use qgb_attestation_types::{CodecError, Nonce};
use qgb_kv::KvError;
use thiserror::Error;

use crate::Counter;

/// Recoverable failures on the read path.
///
/// Absence is never an error here, it is reported as `Ok(None)`.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to decode attestation {nonce}")]
    Decode {
        nonce: Nonce,
        #[source]
        source: CodecError,
    },

    #[error("counter {counter} holds {len} bytes, expected 8")]
    CorruptCounter { counter: Counter, len: usize },

    #[error("store: {0}")]
    Store(#[from] KvError),

    /// A mutation was attempted after an earlier one broke an invariant.
    #[error("log halted: {0}")]
    Halted(InvariantViolation),
}

pub type LogResult<T> = Result<T, LogError>;

/// A broken log invariant detected while mutating.
///
/// Never handled and continued past: the enclosing block transition is
/// aborted and its writes are discarded. The log that raised it refuses every
/// later mutation with the same violation.
#[derive(Clone, Debug, Error)]
pub enum InvariantViolation {
    #[error("nonce gap: latest nonce {latest:?}, tried to append {got}")]
    NonceGap { latest: Option<Nonce>, got: Nonce },

    #[error("attestation {0} is already stored")]
    Overwrite(Nonce),

    #[error("failed to encode attestation {nonce}: {reason}")]
    Encode { nonce: Nonce, reason: String },

    #[error("cannot prune up to {target} with latest nonce {latest:?}")]
    PruneBeyondLatest {
        target: Nonce,
        latest: Option<Nonce>,
    },

    #[error("corrupt attestation state: {0}")]
    CorruptState(String),
}

impl From<LogError> for InvariantViolation {
    fn from(value: LogError) -> Self {
        match value {
            LogError::Halted(violation) => violation,
            other => Self::CorruptState(other.to_string()),
        }
    }
}

impl From<KvError> for InvariantViolation {
    fn from(value: KvError) -> Self {
        Self::CorruptState(format!("store: {value}"))
    }
}
