//! Structured logging setup.
//!
//! The codec itself only emits `tracing` events. Binaries call
//! [`init_logging`] once at startup to install a subscriber built from
//! [`LoggingConfig`]. `RUST_LOG` overrides the configured level when set.

use crate::config::LoggingConfig;
use crate::error::{ProtocolError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string().to_ascii_lowercase()))
}

fn make_writer(config: &LoggingConfig) -> Result<BoxMakeWriter> {
    if !config.log_to_file {
        return Ok(BoxMakeWriter::new(std::io::stderr));
    }

    let path = config.log_file_path.as_deref().ok_or_else(|| {
        ProtocolError::ConfigError(
            "log_file_path must be specified when log_to_file is true".to_string(),
        )
    })?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ProtocolError::ConfigError(format!("Failed to open log file: {e}")))?;
    let file = Mutex::new(file);

    if config.log_to_console {
        Ok(BoxMakeWriter::new(std::io::stderr.and(file)))
    } else {
        Ok(BoxMakeWriter::new(file))
    }
}

/// Install the global subscriber described by `config`.
///
/// With both console and file output enabled, every event goes to both.
/// Fails if the configuration is invalid or a global subscriber is already
/// installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ProtocolError::ConfigError(errors.join("; ")));
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(make_writer(config)?)
        .with_target(true);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| ProtocolError::ConfigError(format!("Failed to install logger: {e}")))?;

    info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    Ok(())
}
