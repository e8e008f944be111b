//! Attestation request payloads and their consensus encoding.
//!
//! An [`AttestationRequest`] is a checkpoint that off-chain orchestrators sign
//! and relay to the foreign chain. Each request carries the nonce that places
//! it in the attestation log.

mod buf;
mod codec;
mod data_commitment;
mod request;
mod valset;

pub use buf::{Buf32, EvmAddress};
pub use codec::{AttestationCodec, BorshCodec, CodecError, CodecResult};
pub use data_commitment::DataCommitment;
pub use request::{AttestationKind, AttestationRequest};
pub use valset::{BridgeValidator, Valset};

/// Nonce identifying an attestation's position in the log. The first
/// attestation has nonce 1.
pub type Nonce = u64;
