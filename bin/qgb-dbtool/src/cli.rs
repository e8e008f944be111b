use std::{fmt, path::PathBuf, str::FromStr};

use argh::FromArgs;

use crate::cmd::{
    attestation::{GetAttestationArgs, ListAttestationsArgs},
    nonce::{LastPrunedNonceArgs, LatestNonceArgs, SummaryArgs},
};

/// Read-only inspection of the attestation log in a qgb data directory.
#[derive(FromArgs, PartialEq, Debug)]
pub(crate) struct Cli {
    /// path to a TOML config file
    #[argh(option, short = 'c')]
    pub(crate) config: Option<PathBuf>,

    /// data directory, overrides the config file
    #[argh(option, short = 'd')]
    pub(crate) datadir: Option<PathBuf>,

    #[argh(subcommand)]
    pub(crate) cmd: Command,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Command {
    LatestNonce(LatestNonceArgs),
    LastPrunedNonce(LastPrunedNonceArgs),
    GetAttestation(GetAttestationArgs),
    Summary(SummaryArgs),
    ListAttestations(ListAttestationsArgs),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OutputFormat {
    Porcelain,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "porcelain" => Ok(Self::Porcelain),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown output format {other:?}, expected \"porcelain\" or \"json\""
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Porcelain => "porcelain",
            Self::Json => "json",
        })
    }
}
