//! Logging initialization.

use std::io;

use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    filter::Directive, fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use super::types::LoggerConfig;

/// Crates whose logs are capped at WARN unless `RUST_LOG` says otherwise.
const NOISY_DEPENDENCIES: &[&str] = &["sled=warn"];

fn build_filter() -> EnvFilter {
    let mut filt = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    for directive in NOISY_DEPENDENCIES {
        if let Ok(d) = directive.parse::<Directive>() {
            filt = filt.add_directive(d);
        }
    }
    filt
}

/// Initializes the logging subsystem with the provided config.
///
/// # Panics
///
/// If a global subscriber has already been installed.
pub fn init(config: LoggerConfig) {
    let filt = build_filter();

    // Configure stdout logging with JSON or compact format
    let stdout_sub = if config.stdout_config.json_format {
        layer()
            .json()
            .with_writer(io::stderr)
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt)
            .boxed()
    } else {
        layer()
            .compact()
            .with_writer(io::stderr)
            .with_span_events(config.stdout_config.fmt_span.clone())
            .with_filter(filt)
            .boxed()
    };

    // Build optional file logging layer
    let file_layer = config.file_logging_config.as_ref().map(|file_config| {
        let file_appender = RollingFileAppender::new(
            file_config.rotation.clone(),
            &file_config.directory,
            &file_config.file_name_prefix,
        );

        if file_config.json_format {
            layer()
                .json()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(build_filter())
                .boxed()
        } else {
            layer()
                .compact()
                .with_writer(file_appender)
                .with_ansi(false) // No color codes in files
                .with_filter(build_filter())
                .boxed()
        }
    });

    tracing_subscriber::registry()
        .with(stdout_sub)
        .with(file_layer)
        .init();

    info!(service_name = %config.service_name, "logging initialized");
}
