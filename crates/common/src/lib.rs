//! Utilities shared by QGB binaries.

pub mod logging;
