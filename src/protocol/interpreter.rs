//! Command interpreter.
//!
//! Turns host commands into controller calls and controller events into
//! reports. Millimetres exist only on this side of the interface; the
//! controller sees steps.

use crate::config::units::{Millimeters, Steps, StepsPerSec};
use crate::config::BoardGeometry;
use crate::error::{Error, HomingError, MotionError, MotorError};
use crate::motion::{LimitSwitch, MotionEvent, MotionState, StepOutputs};
use crate::motor::{AxisPosition, MotionController};

use super::command::Command;
use super::report::{Report, StatusKind};

/// Dispatches commands against a [`MotionController`].
#[derive(Debug, Clone, Copy)]
pub struct CommandInterpreter {
    geometry: BoardGeometry,
}

impl CommandInterpreter {
    /// Create an interpreter for a board.
    pub fn new(geometry: BoardGeometry) -> Self {
        Self { geometry }
    }

    /// Boot status.
    pub fn ready(&self) -> Report {
        Report::status(StatusKind::Ready, "Motor controller initialized")
    }

    /// Execute one command. Returns the immediate report, if any.
    ///
    /// Commands that fail [`Command::check`] are logged and ignored without
    /// touching the controller.
    pub fn handle<O, L>(
        &self,
        command: Command,
        controller: &mut MotionController<O, L>,
    ) -> Option<Report>
    where
        O: StepOutputs,
        L: LimitSwitch,
    {
        if command.check().is_err() {
            log_warn!("ignoring {} with non-finite parameters", command.name());
            return None;
        }

        match command {
            Command::Home => match controller.home() {
                Ok(()) => None,
                Err(e) => Some(error_report(&e)),
            },
            Command::MoveAbsolute { x, y, speed } => {
                self.move_absolute(Millimeters(x), Millimeters(y), speed, controller)
            }
            Command::MoveRelative { dx, dy } => {
                let (x, y) = self.position_mm(controller.position());
                self.move_absolute(x + Millimeters(dx), y + Millimeters(dy), None, controller)
            }
            Command::Stop => {
                controller.stop();
                Some(Report::status(StatusKind::Stopped, "Movement stopped"))
            }
            Command::GetPosition => Some(self.position_report(controller)),
        }
    }

    /// Map a controller event to the report the host expects.
    pub fn on_event(&self, event: MotionEvent) -> Report {
        match event {
            // Moves only run on a homed gantry
            MotionEvent::MoveComplete(position) => {
                let (x, y) = self.position_mm(position);
                Report::position(x.value(), y.value(), true)
            }
            MotionEvent::Homed => Report::status(StatusKind::Homed, "Gantry homed to (0, 0)"),
            MotionEvent::HomingFailed(e) => error_report(&Error::Homing(e)),
        }
    }

    /// Error status for a fault returned by [`MotionController::tick`].
    ///
    /// The controller has already stopped itself; the loop reports and
    /// carries on.
    pub fn on_fault(&self, error: &Error) -> Report {
        error_report(error)
    }

    /// Current position report.
    pub fn position_report<O, L>(&self, controller: &MotionController<O, L>) -> Report
    where
        O: StepOutputs,
        L: LimitSwitch,
    {
        let (x, y) = self.position_mm(controller.position());
        Report::position(x.value(), y.value(), controller.is_homed())
    }

    fn move_absolute<O, L>(
        &self,
        x: Millimeters,
        y: Millimeters,
        speed: Option<f32>,
        controller: &mut MotionController<O, L>,
    ) -> Option<Report>
    where
        O: StepOutputs,
        L: LimitSwitch,
    {
        // Refuse before anything changes: a rejected move keeps the speed
        // and the move in progress.
        match controller.state() {
            MotionState::Homing => {
                return Some(error_report(&MotionError::Busy(MotionState::Homing).into()))
            }
            _ if !controller.is_homed() => {
                return Some(error_report(&MotionError::NotHomed.into()));
            }
            _ => {}
        }

        let Some((x, y)) = self.geometry.limits.apply(x, y) else {
            log_warn!("target ({}, {}) mm is off the board", x.value(), y.value());
            return Some(error_report(
                &MotionError::OutOfBounds {
                    x_mm: x.value(),
                    y_mm: y.value(),
                }
                .into(),
            ));
        };

        if let Some(speed) = speed {
            // Speed may only change while idle
            controller.stop();
            if controller.set_speed(StepsPerSec(speed)).is_err() {
                log_warn!("ignoring speed {} steps/s", speed);
            }
        }

        let Steps(steps_x) = self.geometry.mm_to_steps(x);
        let Steps(steps_y) = self.geometry.mm_to_steps(y);
        match controller.move_to(AxisPosition::new(steps_x, steps_y)) {
            Ok(()) => None,
            Err(e) => Some(error_report(&e)),
        }
    }

    fn position_mm(&self, position: AxisPosition) -> (Millimeters, Millimeters) {
        (
            self.geometry.steps_to_mm(Steps(position.steps_x)),
            self.geometry.steps_to_mm(Steps(position.steps_y)),
        )
    }
}

/// Error status for a failed command.
fn error_report(error: &Error) -> Report {
    let message = match error {
        Error::Motion(MotionError::NotHomed) => "Gantry not homed",
        Error::Motion(MotionError::Busy(MotionState::Homing)) => "Homing in progress",
        Error::Motion(MotionError::Busy(_)) => "Gantry busy",
        Error::Motion(MotionError::OutOfBounds { .. }) => "Target out of bounds",
        Error::Motion(MotionError::InvalidSpeed(_)) => "Invalid speed",
        Error::Homing(HomingError::AlreadyHoming) => "Homing in progress",
        Error::Homing(HomingError::Timeout { .. }) => "Homing failed: limit switch not reached",
        Error::Motor(MotorError::PinError) => "Motor output fault",
        Error::Motor(MotorError::SwitchError) => "Limit switch fault",
        Error::Config(_) | Error::Command(_) => "Command failed",
    };
    log_warn!("command failed: {}", message);
    Report::error(message)
}
