//! Store key layout.
//!
//! Every category gets its own leading byte so the ranges never overlap:
//!
//! | category             | key                        |
//! |----------------------|----------------------------|
//! | attestation          | `0x01 ‖ nonce (u64 BE)`    |
//! | latest nonce         | `0x02`                     |
//! | last pruned nonce    | `0x03`                     |
//! | last unbonding nonce | `0x04`                     |

use std::fmt;

use qgb_attestation_types::Nonce;

use crate::{LogError, LogResult};

const ATTESTATION_PREFIX: u8 = 0x01;

pub(crate) type AttestationKey = [u8; 9];

pub(crate) fn attestation_key(nonce: Nonce) -> AttestationKey {
    let mut key = [0u8; 9];
    key[0] = ATTESTATION_PREFIX;
    key[1..].copy_from_slice(&nonce.to_be_bytes());
    key
}

/// Scalar nonce counters kept next to the attestations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Counter {
    /// Nonce of the most recently appended attestation.
    LatestNonce,

    /// Nonce right before the oldest retained attestation.
    LastPrunedNonce,

    /// Latest nonce at the time the last validator unbonding was observed.
    LastUnbondingNonce,
}

impl Counter {
    pub(crate) fn key(self) -> &'static [u8] {
        match self {
            Self::LatestNonce => &[0x02],
            Self::LastPrunedNonce => &[0x03],
            Self::LastUnbondingNonce => &[0x04],
        }
    }

    pub(crate) fn encode(value: Nonce) -> Vec<u8> {
        value.to_be_bytes().to_vec()
    }

    pub(crate) fn decode(self, buf: &[u8]) -> LogResult<Nonce> {
        let bytes: [u8; 8] = buf.try_into().map_err(|_| LogError::CorruptCounter {
            counter: self,
            len: buf.len(),
        })?;
        Ok(Nonce::from_be_bytes(bytes))
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LatestNonce => "latest_nonce",
            Self::LastPrunedNonce => "last_pruned_nonce",
            Self::LastUnbondingNonce => "last_unbonding_nonce",
        })
    }
}
