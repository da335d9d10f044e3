//! Board geometry configuration from TOML.

use serde::Deserialize;

use super::limits::LimitPolicy;
use super::units::Millimeters;

/// Board geometry and the mm to steps conversion factor.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Cartesian steps per millimetre (pulley and microstep dependent).
    pub steps_per_mm: f32,

    /// X travel from the homed origin.
    pub max_x_mm: Millimeters,

    /// Y travel from the homed origin.
    pub max_y_mm: Millimeters,

    /// Out-of-bounds handling for move targets.
    pub limit_policy: LimitPolicy,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            steps_per_mm: 80.0,
            max_x_mm: Millimeters(400.0),
            max_y_mm: Millimeters(400.0),
            limit_policy: LimitPolicy::Clamp,
        }
    }
}
