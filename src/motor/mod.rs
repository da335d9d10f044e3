//! Motor module for hbot-motion.
//!
//! Provides the embedded-hal STEP/DIR outputs, position tracking and the
//! motion controller that ties them to the scheduler and homing machine.

mod builder;
mod controller;
mod driver;
mod position;

pub use builder::HBotMotorsBuilder;
pub use controller::MotionController;
pub use driver::{ActiveLowSwitch, HBotMotors, StepperMotor};
pub use position::{AxisPosition, MotorSteps};
