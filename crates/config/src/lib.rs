//! Configuration for QGB attestation services.

mod config;

pub use config::*;
