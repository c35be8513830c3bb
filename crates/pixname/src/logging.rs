//! Logging initialization and configuration.
//!
//! Uses the `tracing` ecosystem for structured logging with support for
//! both human-readable and JSON output formats.

use std::io::{self, Write};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::progress;

/// Stderr writer that clears the running spinner before each log line.
struct SpinnerAwareStderr;

impl Write for SpinnerAwareStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        progress::suspend_active(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Initialize the logging subsystem.
///
/// # Arguments
///
/// * `verbose` - If true, enables DEBUG level logging; otherwise `default_level`.
/// * `json_format` - If true, outputs structured JSON logs; otherwise pretty-printed.
///
/// # Notes
///
/// - Log output goes to stderr alongside the interactive prompts, with the
///   spinner cleared while a line is written
/// - The RUST_LOG environment variable can override the log level
pub fn init(default_level: &str, verbose: bool, json_format: bool) {
    // Build the filter, respecting RUST_LOG if set
    let level = if verbose { "debug" } else { default_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json_format {
        // JSON format for machine parsing
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(|| SpinnerAwareStderr))
            .init();
    } else {
        // Pretty format for humans
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(|| SpinnerAwareStderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Initialize logging with the `logging` section of the configuration.
pub fn init_from_config(
    config: &pixname_core::Config,
    verbose_override: bool,
    json_logs_override: bool,
) {
    let verbose =
        verbose_override || config.logging.level == "debug" || config.logging.level == "trace";
    let json_format = json_logs_override || config.logging.format == "json";
    init(&config.logging.level, verbose, json_format);
}
