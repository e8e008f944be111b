//! Serialization interface for attestation requests.

use std::io;

use thiserror::Error;

use crate::AttestationRequest;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode attestation: {0}")]
    Encode(#[source] io::Error),

    /// Unknown variant tag, truncated payload or trailing bytes.
    #[error("failed to decode attestation: {0}")]
    Decode(#[source] io::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Encodes attestation requests to bytes and back, preserving the variant.
///
/// Implementations must be deterministic: every node must produce identical
/// bytes for the same request. Decoding untrusted or corrupt bytes must fail
/// with [`CodecError::Decode`] rather than panic.
pub trait AttestationCodec {
    fn encode(&self, request: &AttestationRequest) -> CodecResult<Vec<u8>>;

    fn decode(&self, buf: &[u8]) -> CodecResult<AttestationRequest>;
}

/// Borsh encoding. The enum discriminant byte is the variant tag.
#[derive(Clone, Copy, Debug, Default)]
pub struct BorshCodec;

impl AttestationCodec for BorshCodec {
    fn encode(&self, request: &AttestationRequest) -> CodecResult<Vec<u8>> {
        borsh::to_vec(request).map_err(CodecError::Encode)
    }

    fn decode(&self, buf: &[u8]) -> CodecResult<AttestationRequest> {
        borsh::from_slice(buf).map_err(CodecError::Decode)
    }
}
