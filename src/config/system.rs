//! Gantry configuration - root configuration structure.

use serde::Deserialize;

use super::board::BoardConfig;
use super::homing::HomingConfig;
use super::motor::MotorConfig;
use super::units::StepsPerSec;

/// Stepping rates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Speed used until a move command supplies one.
    #[serde(rename = "default_steps_per_sec")]
    pub default: StepsPerSec,

    /// Upper bound for any requested speed.
    #[serde(rename = "max_steps_per_sec")]
    pub max: StepsPerSec,

    /// Speed for both homing phases.
    #[serde(rename = "homing_steps_per_sec")]
    pub homing: StepsPerSec,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            default: StepsPerSec(2000.0),
            max: StepsPerSec(8000.0),
            homing: StepsPerSec(500.0),
        }
    }
}

/// Root configuration structure from TOML.
///
/// Every section is optional; missing values fall back to the stock
/// 400 x 400 mm board at 80 steps/mm.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GantryConfig {
    /// Board geometry.
    #[serde(default)]
    pub board: BoardConfig,

    /// Stepping rates.
    #[serde(default)]
    pub speed: SpeedConfig,

    /// Homing parameters.
    #[serde(default)]
    pub homing: HomingConfig,

    /// STEP/DIR output settings.
    #[serde(default)]
    pub motors: MotorConfig,
}
