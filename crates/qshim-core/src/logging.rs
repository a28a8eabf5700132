//! Tracing integration for structured logging.
//!
//! Verbosity-driven setup with optional file output and text or JSON format.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Result;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// Structured JSON output.
    Json,
}

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

fn default_filter(verbosity: u8) -> EnvFilter {
    let level = level_for(verbosity);
    // RUST_LOG wins when present.
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("qshim_core={level},qshim_ffi={level}"))
    })
}

fn init_error(e: impl std::fmt::Display) -> crate::Error {
    crate::Error::Io(std::io::Error::other(e.to_string()))
}

/// Initialize the logging system.
///
/// `verbosity` maps 0=error, 1=warn, 2=info, 3=debug, 4+=trace. When
/// `log_file` is set, output goes there (without ANSI escapes) instead of
/// stderr. Fails if a global subscriber is already installed.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>, format: LogFormat) -> Result<()> {
    let filter = default_filter(verbosity);
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        None => {
            let layer = fmt::layer()
                .with_target(true)
                .with_file(verbosity >= 3)
                .with_line_number(verbosity >= 3);
            match format {
                LogFormat::Text => registry.with(layer).try_init().map_err(init_error)?,
                LogFormat::Json => registry.with(layer.json()).try_init().map_err(init_error)?,
            }
        }
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let layer = fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(true);
            match format {
                LogFormat::Text => registry.with(layer).try_init().map_err(init_error)?,
                LogFormat::Json => registry.with(layer.json()).try_init().map_err(init_error)?,
            }
        }
    }

    Ok(())
}

/// Initialize logging with defaults for testing.
///
/// Info level, text format, stderr. Silently ignores "already initialized".
pub fn init_test_logging() {
    let _ = init_logging(2, None, LogFormat::Text);
}
