//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{truncated, ConfigError, Error, Result};

use super::GantryConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use hbot_motion::load_config;
///
/// let config = load_config("gantry.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GantryConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = truncated(&e.to_string());
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<GantryConfig> {
    let config: GantryConfig = toml::from_str(content).map_err(|e| {
        Error::Config(ConfigError::ParseError(truncated(e.message())))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}
