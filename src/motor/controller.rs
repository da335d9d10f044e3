//! Motion controller - owns all motion state and the I/O it drives.
//!
//! One `MotionController` per gantry, passed by exclusive reference into the
//! tick path and the command path. There is no other copy of the position,
//! target or state anywhere.

use crate::config::units::{Micros, StepsPerSec};
use crate::config::{validate_config, GantryConfig};
use crate::error::{MotionError, Result};
use crate::motion::{
    HomingMachine, HomingPhase, LimitSwitch, MotionEvent, MotionState, StepOutputs, StepScheduler,
};

use super::position::{AxisPosition, MotorSteps};

/// H-Bot motion controller.
///
/// Generic over:
/// - `O`: motor outputs (must implement `StepOutputs`)
/// - `L`: homing limit switch (must implement `LimitSwitch`)
pub struct MotionController<O, L>
where
    O: StepOutputs,
    L: LimitSwitch,
{
    scheduler: StepScheduler,
    homing: HomingMachine,
    outputs: O,
    switch: L,
}

impl<O, L> MotionController<O, L>
where
    O: StepOutputs,
    L: LimitSwitch,
{
    /// Create an idle, unhomed controller.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails [`validate_config`].
    /// A zero speed or seek budget would otherwise stall motion silently.
    pub fn new(config: &GantryConfig, outputs: O, switch: L) -> Result<Self> {
        validate_config(config)?;
        Ok(Self {
            scheduler: StepScheduler::from_config(&config.speed),
            homing: HomingMachine::from_config(&config.homing, config.speed.homing),
            outputs,
            switch,
        })
    }

    /// Service motion for one loop iteration.
    ///
    /// Emits at most one pulse per motor. An I/O error stops all motion
    /// before it is returned, so the next tick is a no-op.
    pub fn tick(&mut self, now: Micros) -> Result<Option<MotionEvent>> {
        let result = match self.scheduler.state() {
            MotionState::Idle => Ok(None),
            MotionState::Moving => self.scheduler.tick(now, &mut self.outputs),
            MotionState::Homing => {
                self.homing
                    .tick(now, &mut self.scheduler, &mut self.outputs, &mut self.switch)
            }
        };

        if result.is_err() {
            log_error!("motion fault in state {}, stopping", self.scheduler.state().as_str());
            self.stop();
        }
        result
    }

    /// Start homing. A move in progress is stopped first.
    pub fn home(&mut self) -> Result<()> {
        self.homing.start(&mut self.scheduler)
    }

    /// Move to an absolute position in steps.
    ///
    /// A move in progress is stopped and replaced by this one.
    ///
    /// # Errors
    ///
    /// `Busy` while homing, `NotHomed` before the first successful homing.
    pub fn move_to(&mut self, target: AxisPosition) -> Result<()> {
        match self.scheduler.state() {
            MotionState::Homing => return Err(MotionError::Busy(MotionState::Homing).into()),
            MotionState::Moving => {
                log_debug!("retarget while moving");
                self.scheduler.stop();
            }
            MotionState::Idle => {}
        }
        self.scheduler.begin_move(target)
    }

    /// Stop any motion, aborting homing if it is running.
    pub fn stop(&mut self) {
        if self.scheduler.state() == MotionState::Homing {
            self.homing.abort(&mut self.scheduler);
        }
        self.scheduler.stop();
    }

    /// Change the stepping speed. Only valid while idle.
    pub fn set_speed(&mut self, speed: StepsPerSec) -> Result<StepsPerSec> {
        self.scheduler.set_speed(speed)
    }

    /// Current Cartesian position in steps.
    #[inline]
    pub fn position(&self) -> AxisPosition {
        self.scheduler.position()
    }

    /// Raw motor pulse counters.
    #[inline]
    pub fn motor_steps(&self) -> MotorSteps {
        self.scheduler.motor_steps()
    }

    /// Current motion state.
    #[inline]
    pub fn state(&self) -> MotionState {
        self.scheduler.state()
    }

    /// Whether homing has succeeded.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.scheduler.is_homed()
    }

    /// Current homing phase.
    #[inline]
    pub fn homing_phase(&self) -> HomingPhase {
        self.homing.phase()
    }

    /// Read access to the scheduler.
    #[inline]
    pub fn scheduler(&self) -> &StepScheduler {
        &self.scheduler
    }

    /// Release the motor outputs and the limit switch.
    pub fn release(self) -> (O, L) {
        (self.outputs, self.switch)
    }
}
