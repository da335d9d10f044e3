//! Host-side simulation backend (std only).
//!
//! A [`SimGantry`] is a shared model of the two motors, the limit switch and
//! a microsecond clock. Hand its [`SimOutputs`] and [`SimLimitSwitch`] to a
//! [`MotionController`](crate::MotionController) and drive ticks with
//! [`SimGantry::advance`]; every pulse is recorded with its timestamp.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use crate::config::units::Micros;
use crate::error::{MotorError, Result};
use crate::motion::{Direction, LimitSwitch, MotorId, StepOutputs};
use crate::motor::{AxisPosition, MotorSteps};

/// One recorded STEP pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    /// Motor that was pulsed.
    pub motor: MotorId,
    /// Direction it stepped.
    pub direction: Direction,
    /// Simulated time of the pulse.
    pub at: Micros,
}

#[derive(Debug, Default)]
struct SimState {
    now: Micros,
    counts: MotorSteps,
    directions: [Option<Direction>; 2],
    pulses: Vec<Pulse>,
    /// X (in steps, from power-up) at or below which the switch closes.
    switch_at_x: Option<i64>,
    switch_polls: u32,
    faulty: bool,
}

/// Shared simulated gantry: motors, limit switch and clock.
#[derive(Debug, Clone, Default)]
pub struct SimGantry {
    state: Rc<RefCell<SimState>>,
}

impl SimGantry {
    /// A gantry at power-up position with no limit switch in reach.
    pub fn new() -> Self {
        Self::default()
    }

    /// Motor outputs bound to this gantry.
    pub fn outputs(&self) -> SimOutputs {
        SimOutputs {
            state: Rc::clone(&self.state),
        }
    }

    /// Limit switch bound to this gantry.
    pub fn limit_switch(&self) -> SimLimitSwitch {
        SimLimitSwitch {
            state: Rc::clone(&self.state),
        }
    }

    /// Current simulated time.
    pub fn now(&self) -> Micros {
        self.state.borrow().now
    }

    /// Move the clock forward and return the new time.
    pub fn advance(&self, us: u64) -> Micros {
        let mut state = self.state.borrow_mut();
        state.now = state.now + Micros(us);
        state.now
    }

    /// Put the switch `steps` X steps behind the carriage's current position.
    pub fn place_switch(&self, steps: i64) {
        let mut state = self.state.borrow_mut();
        let x = state.counts.to_position().steps_x;
        state.switch_at_x = Some(x - steps);
    }

    /// Take the switch out of reach (homing will never trigger it).
    pub fn remove_switch(&self) {
        self.state.borrow_mut().switch_at_x = None;
    }

    /// Make every subsequent pulse fail with a pin error.
    pub fn set_faulty(&self, faulty: bool) {
        self.state.borrow_mut().faulty = faulty;
    }

    /// All pulses recorded so far.
    pub fn pulses(&self) -> Vec<Pulse> {
        self.state.borrow().pulses.clone()
    }

    /// Number of pulses recorded so far.
    pub fn pulse_count(&self) -> usize {
        self.state.borrow().pulses.len()
    }

    /// Forget recorded pulses (counters are kept).
    pub fn clear_pulses(&self) {
        self.state.borrow_mut().pulses.clear();
    }

    /// Physical pulse counters since power-up.
    pub fn counts(&self) -> MotorSteps {
        self.state.borrow().counts
    }

    /// Physical carriage position since power-up.
    pub fn position(&self) -> AxisPosition {
        self.state.borrow().counts.to_position()
    }

    /// Last direction written to `motor`.
    pub fn direction(&self, motor: MotorId) -> Option<Direction> {
        self.state.borrow().directions[index(motor)]
    }

    /// How many times the switch has been read.
    pub fn switch_polls(&self) -> u32 {
        self.state.borrow().switch_polls
    }
}

fn index(motor: MotorId) -> usize {
    match motor {
        MotorId::A => 0,
        MotorId::B => 1,
    }
}

/// [`StepOutputs`] backed by a [`SimGantry`].
#[derive(Debug, Clone)]
pub struct SimOutputs {
    state: Rc<RefCell<SimState>>,
}

impl StepOutputs for SimOutputs {
    fn set_direction(&mut self, motor: MotorId, direction: Direction) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.faulty {
            return Err(MotorError::PinError.into());
        }
        state.directions[index(motor)] = Some(direction);
        Ok(())
    }

    fn emit_step_pulse(&mut self, motor: MotorId, direction: Direction) -> Result<()> {
        self.set_direction(motor, direction)?;

        let mut state = self.state.borrow_mut();
        match motor {
            MotorId::A => state.counts.a += direction.sign(),
            MotorId::B => state.counts.b += direction.sign(),
        }
        let at = state.now;
        state.pulses.push(Pulse {
            motor,
            direction,
            at,
        });
        Ok(())
    }
}

/// [`LimitSwitch`] backed by a [`SimGantry`].
#[derive(Debug, Clone)]
pub struct SimLimitSwitch {
    state: Rc<RefCell<SimState>>,
}

impl LimitSwitch for SimLimitSwitch {
    fn is_triggered(&mut self) -> Result<bool> {
        let mut state = self.state.borrow_mut();
        state.switch_polls += 1;
        let x = state.counts.to_position().steps_x;
        Ok(state.switch_at_x.map_or(false, |at| x <= at))
    }
}
