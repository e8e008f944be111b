use qgb_attestation_types::{AttestationCodec, Nonce};
use qgb_config::PruningConfig;
use qgb_kv::KvStore;
use tracing::*;

use crate::{AttestationLog, InvariantViolation};

/// Result of a pruning pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PruneOutcome {
    /// The boundary was already at or past the requested target.
    NothingToPrune,

    /// Attestations `from..=to` were deleted.
    Pruned { from: Nonce, to: Nonce },
}

impl PruneOutcome {
    pub fn pruned_count(&self) -> u64 {
        match self {
            Self::NothingToPrune => 0,
            Self::Pruned { from, to } => to - from + 1,
        }
    }
}

/// Decides at the end of each block whether old attestations should go.
///
/// Every `interval_blocks` blocks the log is pruned so that only the newest
/// `retention_window` attestations remain. The retention window is treated as
/// at least 1, so the latest attestation is never pruned.
#[derive(Clone, Copy, Debug)]
pub struct AttestationPruner {
    config: PruningConfig,
}

impl AttestationPruner {
    pub fn new(config: PruningConfig) -> Self {
        Self { config }
    }

    /// Whether a pruning pass is scheduled at `height`.
    pub fn is_due(&self, height: u64) -> bool {
        let interval = self.config.interval_blocks;
        interval > 0 && height % interval == 0
    }

    /// Highest nonce that may be pruned when `latest` is the newest one.
    pub fn prune_target(&self, latest: Nonce) -> Option<Nonce> {
        let retention = self.config.retention_window.max(1);
        latest.checked_sub(retention).filter(|target| *target > 0)
    }

    /// Runs a pruning pass on `log` if one is due at `height` and there is
    /// anything past the current boundary to remove.
    pub fn maybe_prune<S, C>(
        &self,
        log: &mut AttestationLog<S, C>,
        height: u64,
    ) -> Result<Option<PruneOutcome>, InvariantViolation>
    where
        S: KvStore,
        C: AttestationCodec,
    {
        if !self.is_due(height) {
            return Ok(None);
        }

        let Some(latest) = log.latest_nonce()? else {
            trace!(%height, "no attestations yet, skipping prune");
            return Ok(None);
        };
        let Some(target) = self.prune_target(latest) else {
            trace!(%height, %latest, "attestations within retention window");
            return Ok(None);
        };
        if log
            .last_pruned_nonce()?
            .is_some_and(|pruned| target <= pruned)
        {
            return Ok(None);
        }

        debug!(%height, %latest, %target, "pruning attestations");
        log.prune_up_to(target).map(Some)
    }
}
