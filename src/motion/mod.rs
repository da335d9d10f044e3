//! Motion module for hbot-motion.
//!
//! Provides the H-Bot transform, the cooperative step scheduler and the
//! homing state machine. Nothing in here blocks: every activity advances by
//! at most one pulse per motor per tick.

mod homing;
pub mod kinematics;
mod outputs;
mod scheduler;
mod state;

pub use homing::{HomingMachine, HomingPhase};
pub use kinematics::{Direction, MotorId};
pub use outputs::{LimitSwitch, StepOutputs};
pub use scheduler::StepScheduler;
pub use state::MotionState;

use crate::error::HomingError;
use crate::motor::AxisPosition;

/// Something the host should hear about, produced by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// A move reached its target.
    MoveComplete(AxisPosition),
    /// Homing finished; position is (0, 0).
    Homed,
    /// Homing gave up; the gantry is idle and not homed.
    HomingFailed(HomingError),
}
