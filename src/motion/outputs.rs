//! Collaborator interfaces consumed by the motion core.
//!
//! Both calls are synchronous and effectively instantaneous relative to the
//! stepping cadence. Hardware implementations live in [`crate::motor`].

use crate::error::Result;

use super::kinematics::{Direction, MotorId};

/// STEP/DIR outputs for the two gantry motors.
pub trait StepOutputs {
    /// Drive the DIR line of `motor`.
    fn set_direction(&mut self, motor: MotorId, direction: Direction) -> Result<()>;

    /// Emit one STEP pulse on `motor` in `direction`.
    ///
    /// Implementations set the direction first and hold the STEP line high
    /// for at least the configured pulse width.
    fn emit_step_pulse(&mut self, motor: MotorId, direction: Direction) -> Result<()>;
}

/// The homing limit switch.
pub trait LimitSwitch {
    /// True while the carriage is pressing the switch.
    fn is_triggered(&mut self) -> Result<bool>;
}

impl<T: StepOutputs + ?Sized> StepOutputs for &mut T {
    fn set_direction(&mut self, motor: MotorId, direction: Direction) -> Result<()> {
        (**self).set_direction(motor, direction)
    }

    fn emit_step_pulse(&mut self, motor: MotorId, direction: Direction) -> Result<()> {
        (**self).emit_step_pulse(motor, direction)
    }
}

impl<T: LimitSwitch + ?Sized> LimitSwitch for &mut T {
    fn is_triggered(&mut self) -> Result<bool> {
        (**self).is_triggered()
    }
}
