//! Integration tests for configuration validation

#![allow(clippy::expect_used)]

use info_protocol::config::{
    InfoLimits, LoggingConfig, ProtocolConfig, MAX_INFO_KEY, MAX_INFO_STRING, MAX_INFO_VALUE,
};
use info_protocol::InfoString;
use tracing::Level;

#[test]
fn test_default_config_validates() {
    let config = ProtocolConfig::default();
    let errors = config.validate();
    assert!(
        errors.is_empty(),
        "Default config should be valid, but got errors: {:?}",
        errors
    );
}

#[test]
fn test_default_limits_are_engine_limits() {
    let limits = InfoLimits::default();
    assert_eq!(limits.max_string, MAX_INFO_STRING);
    assert_eq!(limits.max_key, MAX_INFO_KEY);
    assert_eq!(limits.max_value, MAX_INFO_VALUE);
    assert_eq!(limits.max_len(), MAX_INFO_STRING - 1);
}

#[test]
fn test_tiny_key_bound() {
    let mut config = ProtocolConfig::default();
    config.limits.max_key = 1;

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("Max info key too small")));
}

#[test]
fn test_zero_value_bound() {
    let mut config = ProtocolConfig::default();
    config.limits.max_value = 0;

    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("Max info value must be greater than 0")));
}

#[test]
fn test_tiny_string_bound() {
    let mut config = ProtocolConfig::default();
    config.limits.max_string = 2;

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("Max info string too small")));
}

#[test]
fn test_excessive_string_bound() {
    let mut config = ProtocolConfig::default();
    config.limits.max_string = 1024 * 1024;

    let errors = config.validate();
    assert!(errors.iter().any(|e| e.contains("Max info string too large")));
}

#[test]
fn test_string_bound_must_hold_one_pair() {
    let config = ProtocolConfig::default_with_overrides(|c| {
        c.limits = InfoLimits {
            max_string: 64,
            max_key: 64,
            max_value: 64,
        };
    });

    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("cannot hold a single maximal pair")));
}

#[test]
fn test_empty_app_name() {
    let mut config = ProtocolConfig::default();
    config.logging.app_name = String::new();

    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("Application name cannot be empty")));
}

#[test]
fn test_long_app_name() {
    let mut config = ProtocolConfig::default();
    config.logging.app_name = "a".repeat(100);

    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("Application name too long")));
}

#[test]
fn test_log_to_file_without_path() {
    let mut config = ProtocolConfig::default();
    config.logging.log_to_file = true;
    config.logging.log_file_path = None;

    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("log_file_path must be specified")));
}

#[test]
fn test_no_logging_outputs() {
    let mut config = ProtocolConfig::default();
    config.logging.log_to_console = false;
    config.logging.log_to_file = false;

    let errors = config.validate();
    assert!(errors
        .iter()
        .any(|e| e.contains("At least one logging output")));
}

#[test]
fn test_validate_strict_with_valid_config() {
    let config = ProtocolConfig::default();
    assert!(config.validate_strict().is_ok());
}

#[test]
fn test_validate_strict_with_invalid_config() {
    let mut config = ProtocolConfig::default();
    config.limits.max_key = 0;

    let result = config.validate_strict();
    assert!(result.is_err());

    let err_msg = result.expect_err("strict validation should fail").to_string();
    assert!(err_msg.contains("Configuration validation failed"));
    assert!(err_msg.contains("Max info key too small"));
}

#[test]
fn test_multiple_validation_errors() {
    let mut config = ProtocolConfig::default();
    config.limits.max_key = 0;
    config.limits.max_string = 0;
    config.logging.app_name = String::new();

    let errors = config.validate();
    assert!(errors.len() >= 3, "Expected at least 3 errors, got: {errors:?}");
}

#[test]
fn test_toml_roundtrip() {
    let config = ProtocolConfig::default_with_overrides(|c| {
        c.limits.max_string = 1024;
        c.logging.log_level = Level::DEBUG;
    });

    let text = toml::to_string_pretty(&config).expect("config should serialize");
    let parsed = ProtocolConfig::from_toml(&text).expect("generated TOML should parse");
    assert_eq!(parsed.limits.max_string, 1024);
    assert_eq!(parsed.logging.log_level, Level::DEBUG);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let parsed = ProtocolConfig::from_toml(
        "[limits]\nmax_string = 2048\nmax_key = 32\nmax_value = 256\n",
    )
    .expect("partial TOML should parse");
    assert_eq!(parsed.limits.max_value, 256);
    assert_eq!(parsed.logging.app_name, LoggingConfig::default().app_name);
    assert!(parsed.validate().is_empty());
}

#[test]
fn test_invalid_log_level_in_toml() {
    let text = "[logging]\napp_name = \"x\"\nlog_level = \"loud\"\nlog_to_console = true\nlog_to_file = false\njson_format = false\n";
    let err = ProtocolConfig::from_toml(text).expect_err("unknown level should fail");
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_example_config_parses() {
    let example = ProtocolConfig::example_config();
    assert!(example.contains("[limits]"));
    assert!(ProtocolConfig::from_toml(&example).is_ok());
}

#[test]
fn test_save_and_load_file() {
    let path = std::env::temp_dir().join(format!("info-protocol-{}.toml", std::process::id()));
    let config = ProtocolConfig::default_with_overrides(|c| c.limits.max_value = 128);

    config.save_to_file(&path).expect("config should save");
    let loaded = ProtocolConfig::from_file(&path).expect("config should load");
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.limits.max_value, 128);
}

#[test]
fn test_missing_file() {
    let err = ProtocolConfig::from_file("/nonexistent/info-protocol.toml")
        .expect_err("missing file should fail");
    assert!(err.to_string().contains("Failed to open config file"));
}

#[test]
fn test_custom_limits_drive_codec() {
    let limits = ProtocolConfig::from_toml("[limits]\nmax_string = 32\nmax_key = 8\nmax_value = 8\n")
        .expect("limits should parse")
        .limits;

    let mut info = InfoString::with_limits(limits);
    info.set_value_for_key("name", "dodo").expect("fits");
    assert!(info.set_value_for_key("toolong!", "x").is_err());
    assert!(InfoString::parse_with_limits("\\a\\123456789", limits).is_err());
}

const ENV_VARS: [&str; 4] = [
    "INFO_PROTOCOL_MAX_INFO_STRING",
    "INFO_PROTOCOL_MAX_INFO_KEY",
    "INFO_PROTOCOL_MAX_INFO_VALUE",
    "INFO_PROTOCOL_LOG_LEVEL",
];

fn clear_env() {
    for name in ENV_VARS {
        std::env::remove_var(name);
    }
}

// Environment variables are process-wide, so every from_env case runs in
// this one test.
#[test]
fn test_from_env() {
    clear_env();
    let config = ProtocolConfig::from_env().expect("empty environment should load");
    assert_eq!(config.limits, InfoLimits::ENGINE);
    assert_eq!(config.logging.log_level, Level::INFO);

    std::env::set_var("INFO_PROTOCOL_MAX_INFO_STRING", "1024");
    std::env::set_var("INFO_PROTOCOL_MAX_INFO_KEY", "32");
    std::env::set_var("INFO_PROTOCOL_MAX_INFO_VALUE", "128");
    std::env::set_var("INFO_PROTOCOL_LOG_LEVEL", "debug");
    let config = ProtocolConfig::from_env().expect("overrides should load");
    assert_eq!(
        config.limits,
        InfoLimits {
            max_string: 1024,
            max_key: 32,
            max_value: 128,
        }
    );
    assert_eq!(config.logging.log_level, Level::DEBUG);
    assert!(config.validate().is_empty());

    std::env::set_var("INFO_PROTOCOL_MAX_INFO_KEY", "sixty-four");
    let err = ProtocolConfig::from_env().expect_err("non-integer bound should fail");
    assert!(err
        .to_string()
        .contains("INFO_PROTOCOL_MAX_INFO_KEY must be an integer, got 'sixty-four'"));

    std::env::set_var("INFO_PROTOCOL_MAX_INFO_KEY", "32");
    std::env::set_var("INFO_PROTOCOL_LOG_LEVEL", "loud");
    let err = ProtocolConfig::from_env().expect_err("unknown log level should fail");
    assert!(err.to_string().contains("Invalid log level: loud"));

    clear_env();
}
