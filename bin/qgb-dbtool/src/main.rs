//! Offline inspection tool for the attestation log.
//!
//! Opens the sled database under `<datadir>/sled/qgb` and only ever reads
//! committed state through the orchestrator query surface.

mod cli;
mod cmd;
mod output;

use std::process;

use anyhow::{bail, Context};
use qgb_attestation_log::AttestationLog;
use qgb_common::logging::{self, LoggingInitConfig};
use qgb_config::Config;
use qgb_kv::{open_sled_database, SLED_NAME};
use tracing::*;

use crate::{
    cli::{Cli, Command},
    cmd::{
        attestation::{get_attestation, list_attestations},
        nonce::{get_last_pruned_nonce, get_latest_nonce, get_summary},
    },
};

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(datadir) = &cli.datadir {
        config.datadir = datadir.clone();
    }
    Ok(config)
}

fn main() {
    let cli: Cli = argh::from_env();

    let inner = || -> anyhow::Result<()> {
        let config = load_config(&cli)?;

        logging::init_logging_from_config(LoggingInitConfig {
            service_base_name: "qgb-dbtool",
            service_label: config.logging.service_label.as_deref(),
            log_dir: config.logging.log_dir.as_ref(),
            log_file_prefix: config.logging.log_file_prefix.as_deref(),
            json_format: config.logging.json_format,
            default_log_prefix: "qgb-dbtool",
        });

        let db_dir = config.datadir.join("sled").join(SLED_NAME);
        if !db_dir.exists() {
            bail!("no database found at {}", db_dir.display());
        }
        debug!(datadir = %config.datadir.display(), "opening database");
        let store = open_sled_database(&config.datadir, SLED_NAME)?;
        let log = AttestationLog::new(&store);

        match cli.cmd {
            Command::LatestNonce(args) => get_latest_nonce(&log, args),
            Command::LastPrunedNonce(args) => get_last_pruned_nonce(&log, args),
            Command::GetAttestation(args) => get_attestation(&log, args),
            Command::Summary(args) => get_summary(&log, args),
            Command::ListAttestations(args) => list_attestations(&log, args),
        }
    };

    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}
