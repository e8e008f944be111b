use std::fmt;

use arbitrary::Arbitrary;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::{DataCommitment, Nonce, Valset};

/// An attestation request, one variant per supported kind.
///
/// The variant order is part of the consensus encoding: the Borsh
/// discriminant is the tag stored alongside the payload. New kinds must be
/// appended, never inserted.
#[derive(
    Clone, Debug, Eq, PartialEq, Arbitrary, BorshSerialize, BorshDeserialize, Deserialize, Serialize,
)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttestationRequest {
    /// Validator set update.
    Valset(Valset),

    /// Batched data root commitment.
    DataCommitment(DataCommitment),
}

impl AttestationRequest {
    pub fn nonce(&self) -> Nonce {
        match self {
            Self::Valset(vs) => vs.nonce(),
            Self::DataCommitment(dc) => dc.nonce(),
        }
    }

    pub fn kind(&self) -> AttestationKind {
        match self {
            Self::Valset(_) => AttestationKind::Valset,
            Self::DataCommitment(_) => AttestationKind::DataCommitment,
        }
    }

    pub fn as_valset(&self) -> Option<&Valset> {
        match self {
            Self::Valset(vs) => Some(vs),
            _ => None,
        }
    }

    pub fn as_data_commitment(&self) -> Option<&DataCommitment> {
        match self {
            Self::DataCommitment(dc) => Some(dc),
            _ => None,
        }
    }
}

impl From<Valset> for AttestationRequest {
    fn from(value: Valset) -> Self {
        Self::Valset(value)
    }
}

impl From<DataCommitment> for AttestationRequest {
    fn from(value: DataCommitment) -> Self {
        Self::DataCommitment(value)
    }
}

/// Payload-free discriminant of [`AttestationRequest`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttestationKind {
    Valset,
    DataCommitment,
}

impl fmt::Display for AttestationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valset => f.write_str("valset"),
            Self::DataCommitment => f.write_str("data_commitment"),
        }
    }
}
