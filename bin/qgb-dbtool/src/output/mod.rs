//! Output formatting for command results.

pub(crate) mod attestation;
pub(crate) mod nonce;

use std::fmt::Display;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Objects that can be printed as `key: value` lines.
pub(crate) trait Formattable {
    /// Machine-readable output, one field per line, stable across releases.
    fn format_porcelain(&self) -> String;
}

pub(crate) fn porcelain_field(key: &str, value: impl Display) -> String {
    format!("{key}: {value}")
}

pub(crate) fn porcelain_optional(key: &str, value: Option<impl Display>) -> String {
    match value {
        Some(v) => porcelain_field(key, v),
        None => porcelain_field(key, "none"),
    }
}

/// Renders `data` in the requested format.
pub(crate) fn render<T>(data: &T, format: OutputFormat) -> anyhow::Result<String>
where
    T: Formattable + Serialize,
{
    Ok(match format {
        OutputFormat::Porcelain => data.format_porcelain(),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
    })
}

/// Prints `data` to stdout in the requested format.
pub(crate) fn output<T>(data: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Formattable + Serialize,
{
    println!("{}", render(data, format)?);
    Ok(())
}
