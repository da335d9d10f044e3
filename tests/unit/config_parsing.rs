//! Unit tests for TOML configuration parsing.

use hbot_motion::config::{load_config, parse_config, GantryConfig, LimitPolicy};
use hbot_motion::error::{ConfigError, Error};

/// Test parsing a complete configuration from TOML.
#[test]
fn test_parse_full_config() {
    let toml_str = r#"
[board]
steps_per_mm = 100.0
max_x_mm = 350.0
max_y_mm = 300.0
limit_policy = "reject"

[speed]
default_steps_per_sec = 1500.0
max_steps_per_sec = 6000.0
homing_steps_per_sec = 400.0

[homing]
backoff_steps = 200
max_seek_steps = 50000

[motors]
pulse_width_us = 8
invert_a = true
invert_b = false
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.board.steps_per_mm, 100.0);
    assert_eq!(config.board.max_x_mm.value(), 350.0);
    assert_eq!(config.board.max_y_mm.value(), 300.0);
    assert_eq!(config.board.limit_policy, LimitPolicy::Reject);
    assert_eq!(config.speed.default.value(), 1500.0);
    assert_eq!(config.speed.max.value(), 6000.0);
    assert_eq!(config.speed.homing.value(), 400.0);
    assert_eq!(config.homing.backoff_steps, 200);
    assert_eq!(config.homing.max_seek_steps, 50000);
    assert_eq!(config.motors.pulse_width_us, 8);
    assert!(config.motors.invert_a);
    assert!(!config.motors.invert_b);
}

/// Missing sections and fields fall back to the stock board.
#[test]
fn test_partial_config_uses_defaults() {
    let toml_str = r#"
[board]
max_x_mm = 250.0

[speed]
max_steps_per_sec = 4000.0
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");
    let defaults = GantryConfig::default();

    assert_eq!(config.board.max_x_mm.value(), 250.0);
    assert_eq!(config.board.max_y_mm, defaults.board.max_y_mm);
    assert_eq!(config.board.limit_policy, LimitPolicy::Clamp);
    assert_eq!(config.speed.max.value(), 4000.0);
    assert_eq!(config.speed.default, defaults.speed.default);
    assert_eq!(config.homing.max_seek_steps, 40_000);
}

/// An empty document is the default configuration.
#[test]
fn test_empty_config() {
    let config = parse_config("").expect("Empty config should parse");

    assert_eq!(config.board.steps_per_mm, 80.0);
    assert_eq!(config.motors.pulse_width_us, 5);
}

/// Test that malformed TOML reports a parse error.
#[test]
fn test_invalid_toml_syntax() {
    let result = parse_config("[board\nsteps_per_mm = 80.0");

    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Test that an unknown policy string is rejected.
#[test]
fn test_unknown_limit_policy() {
    let result = parse_config("[board]\nlimit_policy = \"wrap\"\n");

    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Test loading from a file that does not exist.
#[test]
fn test_load_missing_file() {
    let result = load_config("/nonexistent/gantry.toml");

    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}

/// Test loading from a real file.
#[test]
fn test_load_config_file() {
    let path = std::env::temp_dir().join(format!("hbot-motion-{}.toml", std::process::id()));
    std::fs::write(&path, "[homing]\nbackoff_steps = 50\n").expect("Failed to write config");

    let config = load_config(&path);
    let _ = std::fs::remove_file(&path);

    assert_eq!(config.expect("Config should load").homing.backoff_steps, 50);
}
