//! Attestation request formatting.

use qgb_attestation_types::{AttestationRequest, Nonce};
use serde::Serialize;

use super::{porcelain_field, Formattable};

/// A stored attestation request.
#[derive(Debug, Serialize)]
pub(crate) struct AttestationInfo {
    pub(crate) nonce: Nonce,
    pub(crate) request: AttestationRequest,
}

impl AttestationInfo {
    fn porcelain_lines(&self, prefix: &str) -> Vec<String> {
        let key = |name: &str| format!("{prefix}{name}");
        let mut output = vec![
            porcelain_field(&key("nonce"), self.nonce),
            porcelain_field(&key("kind"), self.request.kind()),
        ];

        match &self.request {
            AttestationRequest::Valset(vs) => {
                output.push(porcelain_field(&key("height"), vs.height()));
                output.push(porcelain_field(&key("time"), vs.time()));
                output.push(porcelain_field(&key("total_power"), vs.total_power()));
                output.push(porcelain_field(&key("members"), vs.members().len()));
                for (i, member) in vs.members().iter().enumerate() {
                    output.push(porcelain_field(
                        &key(&format!("member_{i}.evm_address")),
                        member.evm_address(),
                    ));
                    output.push(porcelain_field(
                        &key(&format!("member_{i}.power")),
                        member.power(),
                    ));
                }
            }
            AttestationRequest::DataCommitment(dc) => {
                output.push(porcelain_field(&key("begin_block"), dc.begin_block()));
                output.push(porcelain_field(&key("end_block"), dc.end_block()));
                output.push(porcelain_field(&key("data_root"), dc.data_root()));
                output.push(porcelain_field(&key("time"), dc.time()));
            }
        }

        output
    }
}

impl Formattable for AttestationInfo {
    fn format_porcelain(&self) -> String {
        self.porcelain_lines("").join("\n")
    }
}

/// A run of attestations read from the retained window.
#[derive(Debug, Serialize)]
pub(crate) struct AttestationList {
    pub(crate) from: Nonce,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) missing: Vec<Nonce>,
    pub(crate) attestations: Vec<AttestationInfo>,
}

impl Formattable for AttestationList {
    fn format_porcelain(&self) -> String {
        let mut output = vec![
            porcelain_field("from", self.from),
            porcelain_field("count", self.attestations.len()),
        ];
        for nonce in &self.missing {
            output.push(porcelain_field(&format!("missing_{nonce}"), nonce));
        }
        for info in &self.attestations {
            output.extend(info.porcelain_lines(&format!("attestation_{}.", info.nonce)));
        }
        output.join("\n")
    }
}
