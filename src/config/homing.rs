//! Homing configuration from TOML.

use serde::Deserialize;

/// Limit switch homing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HomingConfig {
    /// Pulses per motor driven away from the switch once it triggers.
    pub backoff_steps: u32,

    /// Pulses allowed while seeking before homing is abandoned.
    pub max_seek_steps: u32,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            backoff_steps: 100,
            // Full X travel at the default geometry plus a quarter margin
            max_seek_steps: 40_000,
        }
    }
}
