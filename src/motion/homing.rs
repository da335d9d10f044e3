//! Limit switch homing, one tick at a time.
//!
//! `Seeking` drives both motors in reverse until the switch closes,
//! `BackingOff` drives them forward a fixed number of pulses, `Zeroed`
//! resets the counters and sets the homed flag. Seeking is bounded by a
//! pulse budget so a missing or broken switch ends in `HomingFailed`
//! instead of a carriage grinding against the frame forever.

use crate::config::units::{Micros, StepsPerSec};
use crate::config::HomingConfig;
use crate::error::{HomingError, Result};

use super::kinematics::Direction;
use super::outputs::{LimitSwitch, StepOutputs};
use super::scheduler::StepScheduler;
use super::state::MotionState;
use super::MotionEvent;

/// Pulse direction that moves the carriage toward the switch.
const TOWARD_SWITCH: Direction = Direction::Reverse;

/// Current phase of the homing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomingPhase {
    /// Not homing.
    #[default]
    Idle,
    /// Driving toward the switch.
    Seeking {
        /// Pulse pairs emitted so far.
        steps: u32,
    },
    /// Driving away from the switch.
    BackingOff {
        /// Pulse pairs still to emit.
        remaining: u32,
    },
    /// Back-off done; zero on the next tick.
    Zeroed,
}

/// Per-tick homing state machine.
#[derive(Debug, Clone)]
pub struct HomingMachine {
    phase: HomingPhase,
    backoff_steps: u32,
    max_seek_steps: u32,
    step_delay: Micros,
}

impl HomingMachine {
    /// Create a homing machine.
    pub fn new(backoff_steps: u32, max_seek_steps: u32, speed: StepsPerSec) -> Self {
        Self {
            phase: HomingPhase::Idle,
            backoff_steps,
            max_seek_steps,
            step_delay: speed.step_delay(),
        }
    }

    /// Create a homing machine from configuration.
    pub fn from_config(config: &HomingConfig, speed: StepsPerSec) -> Self {
        Self::new(config.backoff_steps, config.max_seek_steps, speed)
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> HomingPhase {
        self.phase
    }

    /// Begin homing.
    ///
    /// A move in progress is stopped first. Clears the homed flag.
    ///
    /// # Errors
    ///
    /// `AlreadyHoming` if a homing run is in progress.
    pub fn start(&mut self, scheduler: &mut StepScheduler) -> Result<()> {
        match scheduler.state() {
            MotionState::Homing => return Err(HomingError::AlreadyHoming.into()),
            MotionState::Moving => scheduler.stop(),
            MotionState::Idle => {}
        }

        scheduler.enter_homing();
        self.phase = HomingPhase::Seeking { steps: 0 };
        log_info!("homing: seeking limit switch");
        Ok(())
    }

    /// Abandon homing. The homed flag stays cleared.
    pub fn abort(&mut self, scheduler: &mut StepScheduler) {
        if self.phase != HomingPhase::Idle {
            log_warn!("homing aborted");
        }
        self.phase = HomingPhase::Idle;
        if scheduler.state() == MotionState::Homing {
            scheduler.finish_homing(false);
        }
    }

    /// Advance homing by at most one pulse per motor.
    pub fn tick<O, L>(
        &mut self,
        now: Micros,
        scheduler: &mut StepScheduler,
        outputs: &mut O,
        switch: &mut L,
    ) -> Result<Option<MotionEvent>>
    where
        O: StepOutputs,
        L: LimitSwitch,
    {
        if scheduler.state() != MotionState::Homing {
            // Someone stopped the scheduler behind our back
            self.phase = HomingPhase::Idle;
            return Ok(None);
        }

        match self.phase {
            HomingPhase::Idle => Ok(None),
            HomingPhase::Seeking { steps } => {
                if switch.is_triggered()? {
                    log_info!("homing: switch triggered after {} steps", steps);
                    self.phase = self.backing_off(self.backoff_steps);
                    return Ok(None);
                }
                if steps >= self.max_seek_steps {
                    log_error!("homing: switch not reached after {} steps", steps);
                    self.phase = HomingPhase::Idle;
                    scheduler.finish_homing(false);
                    return Ok(Some(MotionEvent::HomingFailed(HomingError::Timeout { steps })));
                }
                if scheduler.is_due(now, self.step_delay) {
                    scheduler.pulse(now, outputs, Some(TOWARD_SWITCH), Some(TOWARD_SWITCH))?;
                    self.phase = HomingPhase::Seeking { steps: steps + 1 };
                }
                Ok(None)
            }
            HomingPhase::BackingOff { remaining } => {
                if scheduler.is_due(now, self.step_delay) {
                    let away = TOWARD_SWITCH.reversed();
                    scheduler.pulse(now, outputs, Some(away), Some(away))?;
                    self.phase = self.backing_off(remaining - 1);
                }
                Ok(None)
            }
            HomingPhase::Zeroed => {
                scheduler.finish_homing(true);
                self.phase = HomingPhase::Idle;
                log_info!("homing complete");
                Ok(Some(MotionEvent::Homed))
            }
        }
    }

    fn backing_off(&self, remaining: u32) -> HomingPhase {
        if remaining == 0 {
            HomingPhase::Zeroed
        } else {
            HomingPhase::BackingOff { remaining }
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::motor::AxisPosition;
    use crate::sim::SimGantry;

    const DELAY_US: u64 = 2000;

    fn setup() -> (SimGantry, StepScheduler, HomingMachine) {
        let sim = SimGantry::new();
        let scheduler = StepScheduler::new(StepsPerSec(2000.0), StepsPerSec(8000.0));
        let homing = HomingMachine::new(100, 1000, StepsPerSec(500.0));
        (sim, scheduler, homing)
    }

    #[test]
    fn test_homing_sequence() {
        let (sim, mut scheduler, mut homing) = setup();
        let mut outputs = sim.outputs();
        let mut switch = sim.limit_switch();
        sim.place_switch(250);

        homing.start(&mut scheduler).unwrap();
        assert_eq!(scheduler.state(), MotionState::Homing);
        assert!(!scheduler.is_homed());

        let mut now = sim.now();
        let mut seen_backing_off = false;
        let mut event = None;
        for _ in 0..10_000 {
            event = homing.tick(now, &mut scheduler, &mut outputs, &mut switch).unwrap();
            if event.is_some() {
                break;
            }
            if let HomingPhase::BackingOff { .. } = homing.phase() {
                if !seen_backing_off {
                    seen_backing_off = true;
                    // 250 reverse pulses per motor reached the switch
                    assert_eq!(sim.pulse_count(), 500);
                    sim.clear_pulses();
                }
            }
            now = sim.advance(DELAY_US);
        }

        assert_eq!(event, Some(MotionEvent::Homed));
        assert!(seen_backing_off);
        let pulses = sim.pulses();
        assert_eq!(pulses.len(), 200);
        assert!(pulses.iter().all(|p| p.direction == Direction::Forward));

        assert_eq!(scheduler.position(), AxisPosition::ORIGIN);
        assert!(scheduler.is_homed());
        assert_eq!(scheduler.state(), MotionState::Idle);
        assert_eq!(homing.phase(), HomingPhase::Idle);
        // The carriage physically sits 100 steps off the switch
        assert_eq!(sim.position(), AxisPosition::new(-150, 0));
    }

    #[test]
    fn test_switch_polled_every_tick() {
        let (sim, mut scheduler, mut homing) = setup();
        let mut outputs = sim.outputs();
        let mut switch = sim.limit_switch();
        sim.place_switch(10);

        homing.start(&mut scheduler).unwrap();
        homing.tick(Micros(0), &mut scheduler, &mut outputs, &mut switch).unwrap();
        // Not due for another 2 ms, but the switch is still read
        for t in 1..5 {
            homing.tick(Micros(t), &mut scheduler, &mut outputs, &mut switch).unwrap();
        }

        assert_eq!(sim.switch_polls(), 5);
        assert_eq!(sim.pulse_count(), 2);
    }

    #[test]
    fn test_homing_times_out() {
        let (sim, mut scheduler, mut homing) = setup();
        let mut outputs = sim.outputs();
        let mut switch = sim.limit_switch();

        homing.start(&mut scheduler).unwrap();
        let mut now = sim.now();
        let mut event = None;
        for _ in 0..10_000 {
            event = homing.tick(now, &mut scheduler, &mut outputs, &mut switch).unwrap();
            if event.is_some() {
                break;
            }
            now = sim.advance(DELAY_US);
        }

        assert_eq!(
            event,
            Some(MotionEvent::HomingFailed(HomingError::Timeout { steps: 1000 }))
        );
        assert_eq!(sim.pulse_count(), 2000);
        assert!(!scheduler.is_homed());
        assert_eq!(scheduler.state(), MotionState::Idle);
    }

    #[test]
    fn test_start_while_homing_rejected() {
        let (_sim, mut scheduler, mut homing) = setup();

        homing.start(&mut scheduler).unwrap();
        assert_eq!(
            homing.start(&mut scheduler),
            Err(HomingError::AlreadyHoming.into())
        );
        assert_eq!(homing.phase(), HomingPhase::Seeking { steps: 0 });
    }

    #[test]
    fn test_start_while_moving_stops_move() {
        let (sim, mut scheduler, mut homing) = setup();
        let mut outputs = sim.outputs();
        scheduler.enter_homing();
        scheduler.finish_homing(true);
        scheduler.begin_move(AxisPosition::new(800, 0)).unwrap();
        scheduler.tick(Micros(0), &mut outputs).unwrap();

        homing.start(&mut scheduler).unwrap();

        assert_eq!(scheduler.state(), MotionState::Homing);
        assert!(!scheduler.is_homed());
        assert_eq!(scheduler.target(), AxisPosition::new(1, 0));
    }

    #[test]
    fn test_abort_leaves_unhomed() {
        let (sim, mut scheduler, mut homing) = setup();
        let mut outputs = sim.outputs();
        let mut switch = sim.limit_switch();

        homing.start(&mut scheduler).unwrap();
        homing.tick(Micros(0), &mut scheduler, &mut outputs, &mut switch).unwrap();
        homing.abort(&mut scheduler);

        assert_eq!(homing.phase(), HomingPhase::Idle);
        assert_eq!(scheduler.state(), MotionState::Idle);
        assert!(!scheduler.is_homed());

        let before = sim.pulse_count();
        homing.tick(Micros(10_000), &mut scheduler, &mut outputs, &mut switch).unwrap();
        assert_eq!(sim.pulse_count(), before);
    }
}
