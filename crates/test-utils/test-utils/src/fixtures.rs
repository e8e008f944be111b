//! Attestation request fixtures.

use qgb_attestation_types::{AttestationRequest, DataCommitment, Nonce, Valset};

use crate::ArbitraryGenerator;

/// Returns a copy of `request` carrying `nonce` instead of its own.
pub fn with_nonce(request: &AttestationRequest, nonce: Nonce) -> AttestationRequest {
    match request {
        AttestationRequest::Valset(vs) => {
            Valset::new(nonce, vs.members().to_vec(), vs.height(), vs.time()).into()
        }
        AttestationRequest::DataCommitment(dc) => DataCommitment::new(
            nonce,
            dc.begin_block(),
            dc.end_block(),
            dc.data_root(),
            dc.time(),
        )
        .into(),
    }
}

/// Arbitrary validator set update with the given nonce.
pub fn arb_valset(ag: &mut ArbitraryGenerator, nonce: Nonce) -> AttestationRequest {
    let vs: Valset = ag.generate();
    with_nonce(&vs.into(), nonce)
}

/// Arbitrary data commitment with the given nonce.
pub fn arb_data_commitment(ag: &mut ArbitraryGenerator, nonce: Nonce) -> AttestationRequest {
    let dc: DataCommitment = ag.generate();
    with_nonce(&dc.into(), nonce)
}

/// Arbitrary request of either kind with the given nonce.
pub fn arb_request(ag: &mut ArbitraryGenerator, nonce: Nonce) -> AttestationRequest {
    let req: AttestationRequest = ag.generate();
    with_nonce(&req, nonce)
}

/// Requests for nonces `1..=count`, alternating between valset updates and
/// data commitments so both variants get exercised.
pub fn sequential_requests(count: u64) -> Vec<AttestationRequest> {
    let mut ag = ArbitraryGenerator::new();
    (1..=count)
        .map(|nonce| {
            if nonce % 2 == 1 {
                arb_valset(&mut ag, nonce)
            } else {
                arb_data_commitment(&mut ag, nonce)
            }
        })
        .collect()
}
