//! # hbot-motion
//!
//! Non-blocking motion control for a two-motor H-Bot gantry, with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **H-Bot kinematics**: Cartesian targets become coordinated A/B pulses
//! - **Cooperative stepping**: at most one pulse per motor per tick, never waits
//! - **Limit switch homing**: per-tick, abortable, with a seek step budget
//! - **Drift-free position**: derived from the exact per-motor pulse counters
//! - **Line protocol**: typed commands and reports, JSON lines with `std`
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hbot_motion::{CommandInterpreter, HBotMotorsBuilder, MotionController};
//!
//! let config = hbot_motion::load_config("gantry.toml")?;
//!
//! let motors = HBotMotorsBuilder::new()
//!     .from_config(&config.motors)
//!     .step_a(step_a)
//!     .dir_a(dir_a)
//!     .step_b(step_b)
//!     .dir_b(dir_b)
//!     .delay(delay)
//!     .build()?;
//!
//! let mut controller = MotionController::new(&config, motors, ActiveLowSwitch::new(limit_pin))?;
//! let interpreter = CommandInterpreter::new(BoardGeometry::from_config(&config.board));
//!
//! loop {
//!     // Faults stop the motors; report them and keep looping
//!     match controller.tick(clock.now()) {
//!         Ok(Some(event)) => send(interpreter.on_event(event)),
//!         Ok(None) => {}
//!         Err(e) => send(interpreter.on_fault(&e)),
//!     }
//!     // Undecodable lines are logged and dropped
//!     if let Some(Ok(command)) = serial.poll_line().map(|l| hbot_motion::decode_line(&l)) {
//!         if let Some(report) = interpreter.handle(command, &mut controller) {
//!             send(report);
//!         }
//!     }
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing, the JSON codec and the
//!   simulation backend
//! - `alloc`: Enables command decoding for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod log;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod protocol;
#[cfg(feature = "std")]
pub mod sim;

// Re-exports for ergonomic API
pub use config::{validate_config, BoardGeometry, GantryConfig};
pub use error::{Error, Result};
pub use motion::{Direction, LimitSwitch, MotionEvent, MotionState, MotorId, StepOutputs};
pub use motor::{
    ActiveLowSwitch, AxisPosition, HBotMotors, HBotMotorsBuilder, MotionController, MotorSteps,
};
pub use protocol::{Command, CommandInterpreter, Report, StatusKind};

// Configuration loading and the wire codec (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
#[cfg(feature = "std")]
pub use protocol::{decode_line, encode_report};

// Unit types
pub use config::units::{Micros, Millimeters, Steps, StepsPerSec};
