//! Unit tests for configuration validation.

use hbot_motion::config::{parse_config, validate_config, GantryConfig};
use hbot_motion::error::{ConfigError, Error};

/// Test validation of the default configuration.
#[test]
fn test_valid_config_passes_validation() {
    assert!(validate_config(&GantryConfig::default()).is_ok());
}

/// Test validation fails for a zero steps/mm factor.
#[test]
fn test_zero_steps_per_mm() {
    let result = parse_config("[board]\nsteps_per_mm = 0.0\n");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidStepsPerMm(_)))
    ));
}

/// Test validation fails for a negative board dimension.
#[test]
fn test_negative_board_size() {
    let result = parse_config("[board]\nmax_y_mm = -1.0\n");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidBoardSize { .. }))
    ));
}

/// Test validation fails when the default speed exceeds the maximum.
#[test]
fn test_default_speed_above_max() {
    let toml_str = r#"
[speed]
default_steps_per_sec = 9000.0
max_steps_per_sec = 8000.0
"#;

    let result = parse_config(toml_str);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::SpeedOutOfRange { setting: "default", .. }))
    ));
}

/// Test validation fails for a non-positive homing speed.
#[test]
fn test_zero_homing_speed() {
    let result = parse_config("[speed]\nhoming_steps_per_sec = 0.0\n");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::SpeedOutOfRange { setting: "homing", .. }))
    ));
}

/// Test validation fails for a zero max speed.
#[test]
fn test_zero_max_speed() {
    let result = parse_config("[speed]\nmax_steps_per_sec = 0.0\n");

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidMaxSpeed(_)))
    ));
}

/// Test validation of the homing section.
#[test]
fn test_homing_budgets() {
    assert!(matches!(
        parse_config("[homing]\nbackoff_steps = 0\n"),
        Err(Error::Config(ConfigError::InvalidBackoffSteps(0)))
    ));
    assert!(matches!(
        parse_config("[homing]\nmax_seek_steps = 0\n"),
        Err(Error::Config(ConfigError::InvalidSeekBudget(0)))
    ));
}

/// Test validation fails for a step pulse below the driver minimum.
#[test]
fn test_pulse_width_too_short() {
    let mut config = GantryConfig::default();
    config.motors.pulse_width_us = 1;

    let result = validate_config(&config);

    assert_eq!(result, Err(Error::Config(ConfigError::PulseTooShort(1))));
}
