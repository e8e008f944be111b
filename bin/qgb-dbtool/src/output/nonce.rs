use qgb_attestation_types::Nonce;
use serde::Serialize;

use super::{porcelain_field, porcelain_optional, Formattable};

/// A single nonce counter.
#[derive(Debug, Serialize)]
pub(crate) struct NonceInfo {
    pub(crate) name: &'static str,
    pub(crate) nonce: Option<Nonce>,
}

impl Formattable for NonceInfo {
    fn format_porcelain(&self) -> String {
        porcelain_optional(self.name, self.nonce)
    }
}

/// Overview of the log's counters and the retrievable window.
#[derive(Debug, Serialize)]
pub(crate) struct SummaryInfo {
    pub(crate) latest_nonce: Option<Nonce>,
    pub(crate) last_pruned_nonce: Option<Nonce>,
    pub(crate) last_unbonding_nonce: Option<Nonce>,
    pub(crate) first_retained_nonce: Option<Nonce>,
    pub(crate) retained_count: u64,
}

impl Formattable for SummaryInfo {
    fn format_porcelain(&self) -> String {
        [
            porcelain_optional("latest_nonce", self.latest_nonce),
            porcelain_optional("last_pruned_nonce", self.last_pruned_nonce),
            porcelain_optional("last_unbonding_nonce", self.last_unbonding_nonce),
            porcelain_optional("first_retained_nonce", self.first_retained_nonce),
            porcelain_field("retained_count", self.retained_count),
        ]
        .join("\n")
    }
}
