use anyhow::{bail, Context};
use argh::FromArgs;
use qgb_attestation_log::AttestationLog;
use qgb_attestation_types::Nonce;
use qgb_kv::KvRead;
use tracing::*;

use crate::{
    cli::OutputFormat,
    output::{
        attestation::{AttestationInfo, AttestationList},
        output,
    },
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-attestation")]
/// Get the attestation request stored under a nonce
pub(crate) struct GetAttestationArgs {
    /// attestation nonce
    #[argh(positional)]
    pub(crate) nonce: Nonce,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "list-attestations")]
/// List retained attestation requests in nonce order
pub(crate) struct ListAttestationsArgs {
    /// first nonce to list (default: oldest retained)
    #[argh(option)]
    pub(crate) from: Option<Nonce>,

    /// maximum number of attestations to list
    #[argh(option, default = "100")]
    pub(crate) limit: u64,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) fn get_attestation<S: KvRead>(
    log: &AttestationLog<S>,
    args: GetAttestationArgs,
) -> anyhow::Result<()> {
    let nonce = args.nonce;
    let Some(request) = log
        .attestation_by_nonce(nonce)
        .with_context(|| format!("failed to read attestation {nonce}"))?
    else {
        match log.retained_range()? {
            Some(range) if range.contains(&nonce) => {
                bail!("attestation {nonce} is missing from the retained window {range:?}")
            }
            Some(range) => bail!("no attestation {nonce}, retained window is {range:?}"),
            None => bail!("no attestation {nonce}, the log is empty"),
        }
    };

    output(&AttestationInfo { nonce, request }, args.output_format)
}

/// Point lookups over `[from, from + limit)`, clamped to the retained window.
pub(crate) fn collect_attestations<S: KvRead>(
    log: &AttestationLog<S>,
    from: Option<Nonce>,
    limit: u64,
) -> anyhow::Result<AttestationList> {
    let Some(range) = log.retained_range()? else {
        return Ok(AttestationList {
            from: from.unwrap_or(1),
            missing: Vec::new(),
            attestations: Vec::new(),
        });
    };

    let start = from.unwrap_or(*range.start()).max(*range.start());
    let end = start.saturating_add(limit).min(range.end().saturating_add(1));

    let mut missing = Vec::new();
    let mut attestations = Vec::new();
    for nonce in start..end {
        match log.attestation_by_nonce(nonce)? {
            Some(request) => attestations.push(AttestationInfo { nonce, request }),
            None => {
                warn!(%nonce, "attestation missing inside retained window");
                missing.push(nonce);
            }
        }
    }

    Ok(AttestationList {
        from: start,
        missing,
        attestations,
    })
}

pub(crate) fn list_attestations<S: KvRead>(
    log: &AttestationLog<S>,
    args: ListAttestationsArgs,
) -> anyhow::Result<()> {
    let list = collect_attestations(log, args.from, args.limit)?;
    output(&list, args.output_format)
}
