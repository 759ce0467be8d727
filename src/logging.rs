//! Logging setup for the relay.
//!
//! Request traces, feed skips and SMS results go to stdout and are mirrored
//! into `[logging] file` (default `logs/newsms.log`). `RUST_LOG` directives
//! are honored on top of the configured level.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Map a `[logging] level` value to a tracing level; unknown values mean info.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(parse_level(level).into())
}

/// Open the relay log for appending, creating its directory first.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Log to stdout and the relay log file.
///
/// Fails when the log file cannot be opened; callers fall back to
/// [`init_console_only`].
pub fn init(config: &LoggingConfig) -> Result<()> {
    let log_file = open_log_file(Path::new(&config.file))?;
    let writer = std::io::stdout.and(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .with(level_filter(&config.level))
        .init();

    Ok(())
}

/// Log to stdout only.
pub fn init_console_only(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true),
        )
        .with(level_filter(level))
        .init();
}
