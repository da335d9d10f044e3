//! Motor output configuration from TOML.

use serde::Deserialize;

/// STEP/DIR output settings shared by both H-Bot motors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// High phase of each STEP pulse in microseconds (driver minimum is 5).
    pub pulse_width_us: u32,

    /// Invert DIR pin logic for motor A.
    pub invert_a: bool,

    /// Invert DIR pin logic for motor B.
    pub invert_b: bool,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            pulse_width_us: 5,
            invert_a: false,
            invert_b: false,
        }
    }
}
