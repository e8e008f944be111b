use std::fmt;

use qgb_attestation_types::{AttestationKind, Nonce};

/// Something orchestrators may want to react to, emitted while a block runs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttestationEvent {
    /// A new attestation request was appended and awaits signatures.
    RequestAppended { nonce: Nonce, kind: AttestationKind },

    /// Attestations `from..=to` were removed from the log.
    Pruned { from: Nonce, to: Nonce },
}

impl AttestationEvent {
    /// Stable event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RequestAppended { .. } => "attestation_request",
            Self::Pruned { .. } => "attestations_pruned",
        }
    }
}

impl fmt::Display for AttestationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestAppended { nonce, kind } => {
                write!(f, "{} nonce={nonce} kind={kind}", self.event_type())
            }
            Self::Pruned { from, to } => {
                write!(f, "{} from={from} to={to}", self.event_type())
            }
        }
    }
}
