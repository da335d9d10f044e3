//! STEP/DIR hardware outputs.
//!
//! Generic over embedded-hal 1.0 pin types. [`HBotMotors`] implements
//! [`StepOutputs`] for the two gantry motors; [`ActiveLowSwitch`] implements
//! [`LimitSwitch`] for a switch that pulls its input low when pressed.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::{MotorError, Result};
use crate::motion::{Direction, LimitSwitch, MotorId, StepOutputs};

/// One STEP/DIR stepper channel.
pub struct StepperMotor<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin (high = forward, unless inverted).
    dir_pin: DIR,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Current direction (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,
}

impl<STEP, DIR> StepperMotor<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// Wrap a STEP/DIR pin pair.
    pub fn new(step_pin: STEP, dir_pin: DIR, invert_direction: bool) -> Self {
        Self {
            step_pin,
            dir_pin,
            invert_direction,
            current_direction: None,
        }
    }

    /// Last direction written to the DIR pin.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.current_direction
    }

    /// Drive the DIR pin, skipping the write if it already matches.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        let pin_high = match direction {
            Direction::Forward => !self.invert_direction,
            Direction::Reverse => self.invert_direction,
        };

        if pin_high {
            self.dir_pin.set_high().map_err(|_| MotorError::PinError)?;
        } else {
            self.dir_pin.set_low().map_err(|_| MotorError::PinError)?;
        }

        self.current_direction = Some(direction);
        Ok(())
    }

    /// Emit one STEP pulse, holding it high for `pulse_width_us`.
    pub fn pulse<D: DelayNs>(&mut self, delay: &mut D, pulse_width_us: u32) -> Result<()> {
        self.step_pin.set_high().map_err(|_| MotorError::PinError)?;
        delay.delay_us(pulse_width_us);
        self.step_pin.set_low().map_err(|_| MotorError::PinError)?;
        Ok(())
    }

    /// Release the pins.
    pub fn release(self) -> (STEP, DIR) {
        (self.step_pin, self.dir_pin)
    }
}

/// Motor A and motor B of an H-Bot gantry, plus the delay used to time the
/// STEP high phase.
pub struct HBotMotors<SA, DA, SB, DB, DELAY>
where
    SA: OutputPin,
    DA: OutputPin,
    SB: OutputPin,
    DB: OutputPin,
    DELAY: DelayNs,
{
    motor_a: StepperMotor<SA, DA>,
    motor_b: StepperMotor<SB, DB>,
    delay: DELAY,
    pulse_width_us: u32,
}

impl<SA, DA, SB, DB, DELAY> HBotMotors<SA, DA, SB, DB, DELAY>
where
    SA: OutputPin,
    DA: OutputPin,
    SB: OutputPin,
    DB: OutputPin,
    DELAY: DelayNs,
{
    pub(crate) fn new(
        motor_a: StepperMotor<SA, DA>,
        motor_b: StepperMotor<SB, DB>,
        delay: DELAY,
        pulse_width_us: u32,
    ) -> Self {
        Self {
            motor_a,
            motor_b,
            delay,
            pulse_width_us,
        }
    }

    /// STEP high phase in microseconds.
    #[inline]
    pub fn pulse_width_us(&self) -> u32 {
        self.pulse_width_us
    }

    /// Motor A channel.
    #[inline]
    pub fn motor_a(&self) -> &StepperMotor<SA, DA> {
        &self.motor_a
    }

    /// Motor B channel.
    #[inline]
    pub fn motor_b(&self) -> &StepperMotor<SB, DB> {
        &self.motor_b
    }

    /// Release both channels and the delay.
    pub fn release(self) -> (StepperMotor<SA, DA>, StepperMotor<SB, DB>, DELAY) {
        (self.motor_a, self.motor_b, self.delay)
    }
}

impl<SA, DA, SB, DB, DELAY> StepOutputs for HBotMotors<SA, DA, SB, DB, DELAY>
where
    SA: OutputPin,
    DA: OutputPin,
    SB: OutputPin,
    DB: OutputPin,
    DELAY: DelayNs,
{
    fn set_direction(&mut self, motor: MotorId, direction: Direction) -> Result<()> {
        match motor {
            MotorId::A => self.motor_a.set_direction(direction),
            MotorId::B => self.motor_b.set_direction(direction),
        }
    }

    fn emit_step_pulse(&mut self, motor: MotorId, direction: Direction) -> Result<()> {
        self.set_direction(motor, direction)?;
        match motor {
            MotorId::A => self.motor_a.pulse(&mut self.delay, self.pulse_width_us),
            MotorId::B => self.motor_b.pulse(&mut self.delay, self.pulse_width_us),
        }
    }
}

/// Limit switch wired to pull its input low when pressed.
pub struct ActiveLowSwitch<P: InputPin> {
    pin: P,
}

impl<P: InputPin> ActiveLowSwitch<P> {
    /// Wrap an input pin (pull-up enabled by the caller).
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> LimitSwitch for ActiveLowSwitch<P> {
    fn is_triggered(&mut self) -> Result<bool> {
        self.pin.is_low().map_err(|_| MotorError::SwitchError.into())
    }
}
