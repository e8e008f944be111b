use qgb_attestation_types::{AttestationCodec, AttestationRequest, Nonce};
use qgb_kv::KvRead;

use crate::{AttestationLog, LogResult};

/// Read-only view of the log offered to orchestrators.
///
/// Should be served from committed state only, never from a block that is
/// still executing.
pub trait AttestationQuery {
    fn attestation_by_nonce(&self, nonce: Nonce) -> LogResult<Option<AttestationRequest>>;

    fn latest_nonce(&self) -> LogResult<Option<Nonce>>;

    fn last_pruned_nonce(&self) -> LogResult<Option<Nonce>>;
}

impl<S: KvRead, C: AttestationCodec> AttestationQuery for AttestationLog<S, C> {
    fn attestation_by_nonce(&self, nonce: Nonce) -> LogResult<Option<AttestationRequest>> {
        AttestationLog::attestation_by_nonce(self, nonce)
    }

    fn latest_nonce(&self) -> LogResult<Option<Nonce>> {
        AttestationLog::latest_nonce(self)
    }

    fn last_pruned_nonce(&self) -> LogResult<Option<Nonce>> {
        AttestationLog::last_pruned_nonce(self)
    }
}
