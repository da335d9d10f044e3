//! Configuration module for hbot-motion.
//!
//! Provides types for loading and validating gantry geometry, speeds, homing
//! and motor output settings from TOML files (with `std` feature) or
//! constructed defaults.

mod board;
mod homing;
mod limits;
mod mechanical;
mod motor;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use board::BoardConfig;
pub use homing::HomingConfig;
pub use limits::{BoardLimits, LimitPolicy};
pub use mechanical::BoardGeometry;
pub use motor::MotorConfig;
pub use system::{GantryConfig, SpeedConfig};
pub use validation::{validate_config, MIN_PULSE_WIDTH_US};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Micros, Millimeters, Steps, StepsPerSec};
