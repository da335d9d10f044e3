//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::units::StepsPerSec;
use super::{BoardGeometry, GantryConfig};

/// Minimum STEP high time accepted by the drivers, in microseconds.
pub const MIN_PULSE_WIDTH_US: u32 = 5;

/// Validate a gantry configuration.
///
/// Checks:
/// - Steps per mm and board dimensions are positive
/// - Default and homing speeds are within (0, max]
/// - Homing back-off and seek budget are non-zero
/// - Step pulses are at least 5 µs wide
pub fn validate_config(config: &GantryConfig) -> Result<()> {
    let board = &config.board;
    if !is_positive(board.steps_per_mm) {
        return Err(Error::Config(ConfigError::InvalidStepsPerMm(board.steps_per_mm)));
    }
    if !BoardGeometry::from_config(board).limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidBoardSize {
            max_x_mm: board.max_x_mm.0,
            max_y_mm: board.max_y_mm.0,
        }));
    }

    let speed = &config.speed;
    if !is_positive(speed.max.0) {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(speed.max.0)));
    }
    validate_speed("default", speed.default, speed.max)?;
    validate_speed("homing", speed.homing, speed.max)?;

    if config.homing.backoff_steps == 0 {
        return Err(Error::Config(ConfigError::InvalidBackoffSteps(0)));
    }
    if config.homing.max_seek_steps == 0 {
        return Err(Error::Config(ConfigError::InvalidSeekBudget(0)));
    }

    if config.motors.pulse_width_us < MIN_PULSE_WIDTH_US {
        return Err(Error::Config(ConfigError::PulseTooShort(
            config.motors.pulse_width_us,
        )));
    }

    Ok(())
}

/// Finite and strictly positive; NaN fails.
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

fn validate_speed(setting: &'static str, value: StepsPerSec, max: StepsPerSec) -> Result<()> {
    if value.0 > 0.0 && value.0 <= max.0 {
        Ok(())
    } else {
        Err(Error::Config(ConfigError::SpeedOutOfRange {
            setting,
            value: value.0,
            max: max.0,
        }))
    }
}
