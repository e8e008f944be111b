use anyhow::Context;
use argh::FromArgs;
use qgb_attestation_log::{AttestationLog, AttestationQuery};
use qgb_kv::KvRead;

use crate::{
    cli::OutputFormat,
    output::{
        nonce::{NonceInfo, SummaryInfo},
        output,
    },
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "latest-nonce")]
/// Get the nonce of the most recent attestation
pub(crate) struct LatestNonceArgs {
    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "last-pruned-nonce")]
/// Get the nonce right before the oldest retained attestation
pub(crate) struct LastPrunedNonceArgs {
    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "summary")]
/// Show all nonce counters and the retained window
pub(crate) struct SummaryArgs {
    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) fn get_latest_nonce(
    log: &impl AttestationQuery,
    args: LatestNonceArgs,
) -> anyhow::Result<()> {
    let nonce = log.latest_nonce().context("failed to read latest nonce")?;
    output(
        &NonceInfo {
            name: "latest_nonce",
            nonce,
        },
        args.output_format,
    )
}

pub(crate) fn get_last_pruned_nonce(
    log: &impl AttestationQuery,
    args: LastPrunedNonceArgs,
) -> anyhow::Result<()> {
    let nonce = log
        .last_pruned_nonce()
        .context("failed to read last pruned nonce")?;
    output(
        &NonceInfo {
            name: "last_pruned_nonce",
            nonce,
        },
        args.output_format,
    )
}

pub(crate) fn summarize<S: KvRead>(log: &AttestationLog<S>) -> anyhow::Result<SummaryInfo> {
    let range = log
        .retained_range()
        .context("failed to read retained range")?;

    Ok(SummaryInfo {
        latest_nonce: log.latest_nonce()?,
        last_pruned_nonce: log.last_pruned_nonce()?,
        last_unbonding_nonce: log.last_unbonding_nonce()?,
        first_retained_nonce: range.as_ref().map(|r| *r.start()),
        retained_count: range.map_or(0, |r| r.end() - r.start() + 1),
    })
}

pub(crate) fn get_summary<S: KvRead>(
    log: &AttestationLog<S>,
    args: SummaryArgs,
) -> anyhow::Result<()> {
    output(&summarize(log)?, args.output_format)
}
