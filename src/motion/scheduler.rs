//! Cooperative step scheduler.
//!
//! Called once per control-loop iteration. A tick either returns
//! immediately because the next pulse is not due yet, or emits at most one
//! pulse per motor and returns. It never waits for a deadline.

use crate::config::units::{Micros, StepsPerSec};
use crate::config::SpeedConfig;
use crate::error::{MotionError, Result};
use crate::motor::{AxisPosition, MotorSteps};

use super::kinematics::{self, Direction, MotorId};
use super::outputs::StepOutputs;
use super::state::MotionState;
use super::MotionEvent;

/// Position, target, state and speed of the gantry.
///
/// The pulse counters change by exactly one per pulse actually emitted, so
/// the reported position can never drift from what the motors did.
#[derive(Debug, Clone)]
pub struct StepScheduler {
    /// Pulses emitted per motor since the last zero-reset.
    counts: MotorSteps,

    /// Destination of the current (or last) move.
    target: AxisPosition,

    state: MotionState,

    homed: bool,

    speed: StepsPerSec,

    max_speed: StepsPerSec,

    /// Cached `1 s / speed`.
    step_delay: Micros,

    /// Time of the most recent pulse on either motor.
    last_step: Option<Micros>,
}

impl StepScheduler {
    /// Create an idle, unhomed scheduler at the origin.
    pub fn new(speed: StepsPerSec, max_speed: StepsPerSec) -> Self {
        let speed = if speed.0 > max_speed.0 { max_speed } else { speed };
        Self {
            counts: MotorSteps::default(),
            target: AxisPosition::ORIGIN,
            state: MotionState::Idle,
            homed: false,
            speed,
            max_speed,
            step_delay: speed.step_delay(),
            last_step: None,
        }
    }

    /// Create a scheduler from the speed section of the configuration.
    pub fn from_config(config: &SpeedConfig) -> Self {
        Self::new(config.default, config.max)
    }

    /// Current Cartesian position, derived from the pulse counters.
    #[inline]
    pub fn position(&self) -> AxisPosition {
        self.counts.to_position()
    }

    /// Raw pulse counters.
    #[inline]
    pub fn motor_steps(&self) -> MotorSteps {
        self.counts
    }

    /// Current target.
    #[inline]
    pub fn target(&self) -> AxisPosition {
        self.target
    }

    /// Current motion state.
    #[inline]
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Whether homing has succeeded since power-up (and since the last
    /// homing run started).
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// Current speed setting.
    #[inline]
    pub fn speed(&self) -> StepsPerSec {
        self.speed
    }

    /// Minimum delay between pulses at the current speed.
    #[inline]
    pub fn step_delay(&self) -> Micros {
        self.step_delay
    }

    /// Motor steps still to go, recomputed from the counters.
    ///
    /// Equal to the transform of `target - position`, evaluated on the exact
    /// counters so a half-finished diagonal step is not lost to truncation.
    #[inline]
    pub fn remaining(&self) -> MotorSteps {
        let goal = kinematics::to_motor(self.target);
        MotorSteps::new(goal.a - self.counts.a, goal.b - self.counts.b)
    }

    /// Change the speed setting.
    ///
    /// Speeds above the maximum are clamped. Returns the speed applied.
    ///
    /// # Errors
    ///
    /// `InvalidSpeed` for zero, negative or non-finite values, `Busy` while
    /// a move or homing is in progress.
    pub fn set_speed(&mut self, speed: StepsPerSec) -> Result<StepsPerSec> {
        if !speed.0.is_finite() || speed.0 <= 0.0 {
            return Err(MotionError::InvalidSpeed(speed.0).into());
        }
        if self.state != MotionState::Idle {
            return Err(MotionError::Busy(self.state).into());
        }

        let applied = if speed.0 > self.max_speed.0 {
            self.max_speed
        } else {
            speed
        };
        self.speed = applied;
        self.step_delay = applied.step_delay();
        log_debug!("speed set to {} steps/s", applied.0);
        Ok(applied)
    }

    /// Start a move to an absolute target in steps.
    ///
    /// # Errors
    ///
    /// `NotHomed` if homing has never succeeded, `Busy` unless idle.
    pub fn begin_move(&mut self, target: AxisPosition) -> Result<()> {
        if !self.homed {
            return Err(MotionError::NotHomed.into());
        }
        if self.state != MotionState::Idle {
            return Err(MotionError::Busy(self.state).into());
        }

        self.target = target;
        self.state = MotionState::Moving;
        log_info!("move to ({}, {}) steps", target.steps_x, target.steps_y);
        Ok(())
    }

    /// Advance the current move by at most one pulse per motor.
    ///
    /// Returns `MoveComplete` on the tick that finds nothing left to do.
    pub fn tick<O: StepOutputs>(
        &mut self,
        now: Micros,
        outputs: &mut O,
    ) -> Result<Option<MotionEvent>> {
        if self.state != MotionState::Moving {
            return Ok(None);
        }

        let remaining = self.remaining();
        if remaining.is_zero() {
            self.state = MotionState::Idle;
            let position = self.position();
            log_info!("move complete at ({}, {})", position.steps_x, position.steps_y);
            return Ok(Some(MotionEvent::MoveComplete(position)));
        }

        if !self.is_due(now, self.step_delay) {
            return Ok(None);
        }

        self.pulse(
            now,
            outputs,
            Direction::toward(remaining.a),
            Direction::toward(remaining.b),
        )?;
        Ok(None)
    }

    /// Cancel remaining motion. Valid in any state; idempotent.
    pub fn stop(&mut self) {
        if self.state != MotionState::Idle {
            log_info!("stop in state {}", self.state.as_str());
        }
        // With odd-parity counters this target is half a step away; the
        // next move absorbs it.
        self.target = self.position();
        self.state = MotionState::Idle;
    }

    /// True when at least `delay` has passed since the previous pulse.
    #[inline]
    pub fn is_due(&self, now: Micros, delay: Micros) -> bool {
        match self.last_step {
            Some(last) => now.since(last) >= delay,
            None => true,
        }
    }

    /// Emit up to one pulse per motor and record them in the counters.
    ///
    /// This is the low-level output path shared by moves and homing. It
    /// ignores the target and the Cartesian transform.
    pub(crate) fn pulse<O: StepOutputs>(
        &mut self,
        now: Micros,
        outputs: &mut O,
        a: Option<Direction>,
        b: Option<Direction>,
    ) -> Result<()> {
        if let Some(direction) = a {
            outputs.emit_step_pulse(MotorId::A, direction)?;
            self.counts.a += direction.sign();
            self.last_step = Some(now);
        }
        if let Some(direction) = b {
            outputs.emit_step_pulse(MotorId::B, direction)?;
            self.counts.b += direction.sign();
            self.last_step = Some(now);
        }
        Ok(())
    }

    /// Hand the outputs to the homing machine.
    pub(crate) fn enter_homing(&mut self) {
        self.homed = false;
        self.target = self.position();
        self.state = MotionState::Homing;
    }

    /// Return from homing. On success the counters become the new origin.
    pub(crate) fn finish_homing(&mut self, zeroed: bool) {
        if zeroed {
            self.counts.reset();
            self.homed = true;
        }
        self.target = self.position();
        self.state = MotionState::Idle;
    }
}
