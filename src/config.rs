//! # Configuration Management
//!
//! Centralized configuration for the info-string protocol layer.
//!
//! The engine-wide info-string bounds live here as constants and as the
//! defaults of [`InfoLimits`]. Peers must agree on the limits, so overriding
//! them is only meaningful for closed deployments and tests.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::Level;

/// Capacity of an info string buffer, including room for the terminator
pub const MAX_INFO_STRING: usize = 512;

/// Exclusive upper bound on key length
pub const MAX_INFO_KEY: usize = 64;

/// Exclusive upper bound on value length
pub const MAX_INFO_VALUE: usize = 64;

/// Largest info string capacity accepted from configuration (64 KB)
pub const MAX_CONFIGURABLE_INFO_STRING: usize = 64 * 1024;

/// Main configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProtocolConfig {
    /// Info string bounds
    #[serde(default)]
    pub limits: InfoLimits,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProtocolConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("INFO_PROTOCOL_MAX_INFO_STRING") {
            config.limits.max_string = parse_env_usize("INFO_PROTOCOL_MAX_INFO_STRING", &value)?;
        }

        if let Ok(value) = std::env::var("INFO_PROTOCOL_MAX_INFO_KEY") {
            config.limits.max_key = parse_env_usize("INFO_PROTOCOL_MAX_INFO_KEY", &value)?;
        }

        if let Ok(value) = std::env::var("INFO_PROTOCOL_MAX_INFO_VALUE") {
            config.limits.max_value = parse_env_usize("INFO_PROTOCOL_MAX_INFO_VALUE", &value)?;
        }

        if let Ok(level) = std::env::var("INFO_PROTOCOL_LOG_LEVEL") {
            config.logging.log_level = level.parse::<Level>().map_err(|_| {
                ProtocolError::ConfigError(format!("Invalid log level: {level}"))
            })?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.limits.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

fn parse_env_usize(name: &str, value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|_| ProtocolError::ConfigError(format!("{name} must be an integer, got '{value}'")))
}

/// Info string bounds
///
/// All three bounds are exclusive in the way the wire format uses them: a key
/// must be shorter than `max_key`, a value shorter than `max_value`, and the
/// whole info string shorter than `max_string`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct InfoLimits {
    /// Buffer capacity, including room for the terminator
    pub max_string: usize,

    /// Exclusive bound on key length
    pub max_key: usize,

    /// Exclusive bound on value length
    pub max_value: usize,
}

impl InfoLimits {
    /// The engine-wide bounds every peer agrees on
    pub const ENGINE: InfoLimits = InfoLimits {
        max_string: MAX_INFO_STRING,
        max_key: MAX_INFO_KEY,
        max_value: MAX_INFO_VALUE,
    };

    /// Largest number of bytes an info string may hold
    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_string.saturating_sub(1)
    }

    /// Validate limits configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_key < 2 {
            errors.push(format!(
                "Max info key too small: {} (minimum: 2, keys cannot be empty)",
                self.max_key
            ));
        }

        if self.max_value < 1 {
            errors.push("Max info value must be greater than 0".to_string());
        }

        if self.max_string < 4 {
            errors.push(format!(
                "Max info string too small: {} (minimum: 4)",
                self.max_string
            ));
        } else if self.max_string > MAX_CONFIGURABLE_INFO_STRING {
            errors.push(format!(
                "Max info string too large: {} bytes (maximum: {} bytes)",
                self.max_string, MAX_CONFIGURABLE_INFO_STRING
            ));
        }

        // a single pair of maximal key and value must fit
        if self.max_key >= 1 && self.max_value >= 1 {
            let widest_pair = 2 + (self.max_key - 1) + (self.max_value - 1);
            if widest_pair > self.max_len() {
                errors.push(format!(
                    "Max info string cannot hold a single maximal pair ({widest_pair} bytes)"
                ));
            }
        }

        errors
    }
}

impl Default for InfoLimits {
    fn default() -> Self {
        Self::ENGINE
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to log to file
    pub log_to_file: bool,

    /// Path to log file (if log_to_file is true)
    pub log_file_path: Option<String>,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("info-protocol"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        if self.log_to_file {
            if let Some(ref path) = self.log_file_path {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(format!(
                            "Log file directory does not exist: {}",
                            parent.display()
                        ));
                    }
                }
            } else {
                errors.push("log_file_path must be specified when log_to_file is true".to_string());
            }
        }

        if !self.log_to_console && !self.log_to_file {
            errors
                .push("At least one logging output (console or file) must be enabled".to_string());
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
