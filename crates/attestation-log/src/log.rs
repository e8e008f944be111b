use std::{mem, ops::RangeInclusive};

use qgb_attestation_types::{AttestationCodec, AttestationRequest, BorshCodec, Nonce};
use qgb_kv::{KvRead, KvStore};
use tracing::*;

use crate::{
    keys::{attestation_key, Counter},
    AttestationEvent, InvariantViolation, LogError, LogResult, PruneOutcome,
};

/// Ordered, gap-free log of attestation requests over an injected store.
///
/// Reads need `S: KvRead`, mutations need `S: KvStore`. In practice the
/// writer is an `AttestationLog<BlockTxn<'_, B>>` handed out by
/// [`execute_block`](crate::execute_block), and readers wrap a shared
/// reference to the committed backend, which has no write access at all.
///
/// The first [`InvariantViolation`] raised by a mutation halts the log: every
/// later mutation fails with that same violation.
#[derive(Debug)]
pub struct AttestationLog<S, C = BorshCodec> {
    store: S,
    codec: C,
    events: Vec<AttestationEvent>,
    halted: Option<InvariantViolation>,
}

impl<S> AttestationLog<S> {
    pub fn new(store: S) -> Self {
        Self::with_codec(store, BorshCodec)
    }
}

impl<S, C> AttestationLog<S, C> {
    pub fn with_codec(store: S, codec: C) -> Self {
        Self {
            store,
            codec,
            events: Vec::new(),
            halted: None,
        }
    }

    /// The violation that halted this log, if any.
    pub fn halted(&self) -> Option<&InvariantViolation> {
        self.halted.as_ref()
    }

    fn ensure_live(&self) -> LogResult<()> {
        match &self.halted {
            Some(violation) => Err(LogError::Halted(violation.clone())),
            None => Ok(()),
        }
    }

    fn halt_on_violation<T>(
        &mut self,
        res: Result<T, InvariantViolation>,
    ) -> Result<T, InvariantViolation> {
        if let Err(violation) = &res {
            if self.halted.is_none() {
                error!(%violation, "attestation log halted");
                self.halted = Some(violation.clone());
            }
        }
        res
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hands back the store, dropping any events not yet taken.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<AttestationEvent> {
        mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[AttestationEvent] {
        &self.events
    }
}

impl<S: KvRead, C: AttestationCodec> AttestationLog<S, C> {
    fn counter(&self, counter: Counter) -> LogResult<Option<Nonce>> {
        self.store
            .get(counter.key())?
            .map(|buf| counter.decode(&buf))
            .transpose()
    }

    /// Nonce of the most recently appended attestation, `None` before the
    /// first append.
    pub fn latest_nonce(&self) -> LogResult<Option<Nonce>> {
        self.counter(Counter::LatestNonce)
    }

    /// Nonce right before the oldest retained attestation, `None` before the
    /// first prune.
    pub fn last_pruned_nonce(&self) -> LogResult<Option<Nonce>> {
        self.counter(Counter::LastPrunedNonce)
    }

    pub fn last_unbonding_nonce(&self) -> LogResult<Option<Nonce>> {
        self.counter(Counter::LastUnbondingNonce)
    }

    /// Looks up the attestation stored under `nonce`.
    ///
    /// Pruned nonces and nonces that were never appended both return
    /// `Ok(None)`. Use [`Self::retained_range`] to tell them apart. Stored
    /// bytes that fail to decode are reported as [`LogError::Decode`].
    pub fn attestation_by_nonce(&self, nonce: Nonce) -> LogResult<Option<AttestationRequest>> {
        let Some(buf) = self.store.get(&attestation_key(nonce))? else {
            return Ok(None);
        };

        let request = self
            .codec
            .decode(&buf)
            .map_err(|source| LogError::Decode { nonce, source })?;
        Ok(Some(request))
    }

    pub fn has_attestation(&self, nonce: Nonce) -> LogResult<bool> {
        Ok(self.store.has(&attestation_key(nonce))?)
    }

    /// The window of nonces currently retrievable, `None` while the log is
    /// empty.
    pub fn retained_range(&self) -> LogResult<Option<RangeInclusive<Nonce>>> {
        let Some(latest) = self.latest_nonce()? else {
            return Ok(None);
        };
        let first = self.first_retained()?;
        Ok((first <= latest).then_some(first..=latest))
    }

    fn first_retained(&self) -> LogResult<Nonce> {
        Ok(self
            .last_pruned_nonce()?
            .map_or(1, |pruned| pruned.saturating_add(1)))
    }
}

impl<S: KvStore, C: AttestationCodec> AttestationLog<S, C> {
    fn set_counter(&mut self, counter: Counter, value: Nonce) -> LogResult<()> {
        self.ensure_live()?;
        self.store.set(counter.key(), Counter::encode(value))?;
        Ok(())
    }

    /// Appends `request`, whose nonce must directly follow the latest one (or
    /// be 1 for an empty log). Returns the appended nonce.
    pub fn append(&mut self, request: &AttestationRequest) -> Result<Nonce, InvariantViolation> {
        self.ensure_live()?;
        let res = self.try_append(request);
        self.halt_on_violation(res)
    }

    fn try_append(&mut self, request: &AttestationRequest) -> Result<Nonce, InvariantViolation> {
        let nonce = request.nonce();
        let latest = self.latest_nonce()?;
        let expected = match latest {
            Some(latest) => latest.checked_add(1),
            None => Some(1),
        };
        if expected != Some(nonce) {
            return Err(InvariantViolation::NonceGap { latest, got: nonce });
        }

        let key = attestation_key(nonce);
        if self.store.has(&key)? {
            return Err(InvariantViolation::Overwrite(nonce));
        }

        let buf = self
            .codec
            .encode(request)
            .map_err(|e| InvariantViolation::Encode {
                nonce,
                reason: e.to_string(),
            })?;

        self.store.set(&key, buf)?;
        self.set_counter(Counter::LatestNonce, nonce)?;

        let kind = request.kind();
        debug!(%nonce, %kind, "appended attestation request");
        self.events
            .push(AttestationEvent::RequestAppended { nonce, kind });
        Ok(nonce)
    }

    /// Removes the attestation under `nonce` if there is one. Leaves the
    /// pruning counter alone.
    pub fn delete_attestation(&mut self, nonce: Nonce) -> LogResult<()> {
        self.ensure_live()?;
        self.store.delete(&attestation_key(nonce))?;
        trace!(%nonce, "deleted attestation");
        Ok(())
    }

    /// Overwrites the last pruned nonce. Callers are expected to keep it below
    /// the latest nonce.
    pub fn set_last_pruned_nonce(&mut self, nonce: Nonce) -> LogResult<()> {
        self.set_counter(Counter::LastPrunedNonce, nonce)
    }

    pub fn set_last_unbonding_nonce(&mut self, nonce: Nonce) -> LogResult<()> {
        self.set_counter(Counter::LastUnbondingNonce, nonce)
    }

    /// Deletes every retained attestation up to and including `target` and
    /// advances the last pruned nonce to it.
    ///
    /// `target` must be below the latest nonce so the newest attestation
    /// stays retrievable. A `target` at or below the current pruning boundary
    /// is a no-op.
    pub fn prune_up_to(&mut self, target: Nonce) -> Result<PruneOutcome, InvariantViolation> {
        self.ensure_live()?;
        let res = self.try_prune_up_to(target);
        self.halt_on_violation(res)
    }

    fn try_prune_up_to(&mut self, target: Nonce) -> Result<PruneOutcome, InvariantViolation> {
        let latest = self.latest_nonce()?;
        if !latest.is_some_and(|latest| target < latest) {
            return Err(InvariantViolation::PruneBeyondLatest { target, latest });
        }

        let from = self.first_retained()?;
        if target < from {
            trace!(%target, "attestations already pruned");
            return Ok(PruneOutcome::NothingToPrune);
        }

        for nonce in from..=target {
            self.delete_attestation(nonce)?;
        }
        self.set_last_pruned_nonce(target)?;

        info!(%from, to = %target, "pruned attestations");
        self.events
            .push(AttestationEvent::Pruned { from, to: target });
        Ok(PruneOutcome::Pruned { from, to: target })
    }
}
