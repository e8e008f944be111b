pub(crate) mod attestation;
pub(crate) mod nonce;
