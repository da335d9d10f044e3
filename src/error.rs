//! Error types for hbot-motion.
//!
//! Provides unified error handling across configuration, motor I/O, motion,
//! homing and command handling. None of these is fatal: every caller in the
//! control loop reports the error and keeps servicing the next tick.

use core::fmt;

use crate::motion::MotionState;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all hbot-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor or switch I/O error
    Motor(MotorError),
    /// Move request or scheduler error
    Motion(MotionError),
    /// Homing sequence error
    Homing(HomingError),
    /// Inbound command error
    Command(CommandError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Steps per millimetre must be > 0
    InvalidStepsPerMm(f32),
    /// Board dimensions must be > 0
    InvalidBoardSize {
        /// Configured X travel in mm
        max_x_mm: f32,
        /// Configured Y travel in mm
        max_y_mm: f32,
    },
    /// Maximum speed must be > 0
    InvalidMaxSpeed(f32),
    /// A speed setting is outside (0, max]
    SpeedOutOfRange {
        /// Which setting failed
        setting: &'static str,
        /// Configured value in steps/s
        value: f32,
        /// Configured maximum in steps/s
        max: f32,
    },
    /// Back-off step count must be > 0
    InvalidBackoffSteps(u32),
    /// Seek budget must be > 0
    InvalidSeekBudget(u32),
    /// Step pulse width below the 5 µs driver minimum
    PulseTooShort(u32),
    /// Builder finished without a required part
    MissingField(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor and switch I/O errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// STEP or DIR pin operation failed
    PinError,
    /// Limit switch could not be read
    SwitchError,
}

/// Move request and scheduler errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Move attempted before the gantry has been homed
    NotHomed,
    /// Operation not valid in the current motion state
    Busy(MotionState),
    /// Speed is not a positive finite number
    InvalidSpeed(f32),
    /// Target outside the board under the reject policy
    OutOfBounds {
        /// Requested X in mm
        x_mm: f32,
        /// Requested Y in mm
        y_mm: f32,
    },
}

/// Homing sequence errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomingError {
    /// Homing requested while a homing run is in progress
    AlreadyHoming,
    /// Limit switch never triggered within the seek budget
    Timeout {
        /// Pulses emitted while seeking
        steps: u32,
    },
}

/// Inbound command errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Unparsable line or missing required fields
    Malformed(heapless::String<64>),
    /// Well-formed command of an unknown kind
    UnknownCommand(heapless::String<32>),
    /// Coordinate or speed is NaN or infinite
    NonFinite,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
            Error::Homing(e) => write!(f, "Homing error: {}", e),
            Error::Command(e) => write!(f, "Command error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidStepsPerMm(v) => {
                write!(f, "Invalid steps per mm: {}. Must be > 0", v)
            }
            ConfigError::InvalidBoardSize { max_x_mm, max_y_mm } => {
                write!(f, "Invalid board size {} x {} mm. Both must be > 0", max_x_mm, max_y_mm)
            }
            ConfigError::InvalidMaxSpeed(v) => write!(f, "Invalid max speed: {}. Must be > 0", v),
            ConfigError::SpeedOutOfRange { setting, value, max } => {
                write!(f, "{} speed {} outside (0, {}]", setting, value, max)
            }
            ConfigError::InvalidBackoffSteps(v) => {
                write!(f, "Invalid back-off steps: {}. Must be > 0", v)
            }
            ConfigError::InvalidSeekBudget(v) => {
                write!(f, "Invalid homing seek budget: {}. Must be > 0", v)
            }
            ConfigError::PulseTooShort(v) => {
                write!(f, "Step pulse width {} us is below the 5 us minimum", v)
            }
            ConfigError::MissingField(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::SwitchError => write!(f, "Limit switch read failed"),
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::NotHomed => write!(f, "Gantry not homed"),
            MotionError::Busy(state) => write!(f, "Gantry busy ({})", state.as_str()),
            MotionError::InvalidSpeed(v) => write!(f, "Invalid speed: {}", v),
            MotionError::OutOfBounds { x_mm, y_mm } => {
                write!(f, "Target ({}, {}) mm is outside the board", x_mm, y_mm)
            }
        }
    }
}

impl fmt::Display for HomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomingError::AlreadyHoming => write!(f, "Homing already in progress"),
            HomingError::Timeout { steps } => {
                write!(f, "Limit switch not reached after {} steps", steps)
            }
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Malformed(msg) => write!(f, "Malformed command: {}", msg),
            CommandError::UnknownCommand(name) => write!(f, "Unknown command: {}", name),
            CommandError::NonFinite => write!(f, "Non-finite parameter"),
        }
    }
}

/// Copy as much of `msg` as fits in `N` bytes, cutting on a char boundary.
pub(crate) fn truncated<const N: usize>(msg: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

impl From<HomingError> for Error {
    fn from(e: HomingError) -> Self {
        Error::Homing(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}

#[cfg(feature = "std")]
impl std::error::Error for HomingError {}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_cuts_on_char_boundary() {
        let short: heapless::String<4> = truncated("abcdef");
        assert_eq!(short.as_str(), "abcd");

        // 'é' is two bytes and does not fit after "abc"
        let cut: heapless::String<4> = truncated("abcé");
        assert_eq!(cut.as_str(), "abc");
    }
}
