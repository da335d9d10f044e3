//! Builder pattern for HBotMotors.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{MotorConfig, MIN_PULSE_WIDTH_US};
use crate::error::{ConfigError, Error, Result};

use super::driver::{HBotMotors, StepperMotor};

/// Builder for creating HBotMotors instances.
pub struct HBotMotorsBuilder<SA, DA, SB, DB, DELAY>
where
    SA: OutputPin,
    DA: OutputPin,
    SB: OutputPin,
    DB: OutputPin,
    DELAY: DelayNs,
{
    step_a: Option<SA>,
    dir_a: Option<DA>,
    step_b: Option<SB>,
    dir_b: Option<DB>,
    delay: Option<DELAY>,
    pulse_width_us: u32,
    invert_a: bool,
    invert_b: bool,
}

impl<SA, DA, SB, DB, DELAY> Default for HBotMotorsBuilder<SA, DA, SB, DB, DELAY>
where
    SA: OutputPin,
    DA: OutputPin,
    SB: OutputPin,
    DB: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<SA, DA, SB, DB, DELAY> HBotMotorsBuilder<SA, DA, SB, DB, DELAY>
where
    SA: OutputPin,
    DA: OutputPin,
    SB: OutputPin,
    DB: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_a: None,
            dir_a: None,
            step_b: None,
            dir_b: None,
            delay: None,
            pulse_width_us: MIN_PULSE_WIDTH_US,
            invert_a: false,
            invert_b: false,
        }
    }

    /// Set motor A's STEP pin.
    pub fn step_a(mut self, pin: SA) -> Self {
        self.step_a = Some(pin);
        self
    }

    /// Set motor A's DIR pin.
    pub fn dir_a(mut self, pin: DA) -> Self {
        self.dir_a = Some(pin);
        self
    }

    /// Set motor B's STEP pin.
    pub fn step_b(mut self, pin: SB) -> Self {
        self.step_b = Some(pin);
        self
    }

    /// Set motor B's DIR pin.
    pub fn dir_b(mut self, pin: DB) -> Self {
        self.dir_b = Some(pin);
        self
    }

    /// Set the delay provider used for the STEP high phase.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the STEP high phase in microseconds.
    pub fn pulse_width_us(mut self, us: u32) -> Self {
        self.pulse_width_us = us;
        self
    }

    /// Invert DIR logic per motor.
    pub fn invert(mut self, a: bool, b: bool) -> Self {
        self.invert_a = a;
        self.invert_b = b;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_config(mut self, config: &MotorConfig) -> Self {
        self.pulse_width_us = config.pulse_width_us;
        self.invert_a = config.invert_a;
        self.invert_b = config.invert_b;
        self
    }

    /// Build the HBotMotors.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin or the delay is missing, or the pulse width
    /// is shorter than the driver minimum.
    pub fn build(self) -> Result<HBotMotors<SA, DA, SB, DB, DELAY>> {
        let step_a = self.step_a.ok_or(missing("step_a"))?;
        let dir_a = self.dir_a.ok_or(missing("dir_a"))?;
        let step_b = self.step_b.ok_or(missing("step_b"))?;
        let dir_b = self.dir_b.ok_or(missing("dir_b"))?;
        let delay = self.delay.ok_or(missing("delay"))?;

        if self.pulse_width_us < MIN_PULSE_WIDTH_US {
            return Err(ConfigError::PulseTooShort(self.pulse_width_us).into());
        }

        Ok(HBotMotors::new(
            StepperMotor::new(step_a, dir_a, self.invert_a),
            StepperMotor::new(step_b, dir_b, self.invert_b),
            delay,
            self.pulse_width_us,
        ))
    }
}

fn missing(field: &'static str) -> Error {
    Error::Config(ConfigError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{Direction, MotorId, StepOutputs};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    type Builder = HBotMotorsBuilder<PinMock, PinMock, PinMock, PinMock, NoopDelay>;

    #[test]
    fn test_missing_pin() {
        let mut step_a = PinMock::new(&[]);
        let mut dir_a = PinMock::new(&[]);

        let result = Builder::new()
            .step_a(step_a.clone())
            .dir_a(dir_a.clone())
            .delay(NoopDelay::new())
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField("step_b")))
        ));
        step_a.done();
        dir_a.done();
    }

    #[test]
    fn test_pulse_too_short() {
        let config = MotorConfig {
            pulse_width_us: 2,
            ..MotorConfig::default()
        };
        let pins: [PinMock; 4] = core::array::from_fn(|_| PinMock::new(&[]));
        let [step_a, dir_a, step_b, dir_b] = pins.clone();

        let result = Builder::new()
            .from_config(&config)
            .step_a(step_a)
            .dir_a(dir_a)
            .step_b(step_b)
            .dir_b(dir_b)
            .delay(NoopDelay::new())
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::PulseTooShort(2)))
        ));
        for mut pin in pins {
            pin.done();
        }
    }

    #[test]
    fn test_build_from_config_applies_inversion() {
        let config = MotorConfig {
            pulse_width_us: 10,
            invert_a: false,
            invert_b: true,
        };
        let mut step_b = PinMock::new(&[Transaction::set(State::High), Transaction::set(State::Low)]);
        // Forward on an inverted channel drives DIR low
        let mut dir_b = PinMock::new(&[Transaction::set(State::Low)]);
        let mut step_a = PinMock::new(&[]);
        let mut dir_a = PinMock::new(&[]);

        let mut motors = Builder::new()
            .from_config(&config)
            .step_a(step_a.clone())
            .dir_a(dir_a.clone())
            .step_b(step_b.clone())
            .dir_b(dir_b.clone())
            .delay(NoopDelay::new())
            .build()
            .unwrap();

        assert_eq!(motors.pulse_width_us(), 10);
        motors.emit_step_pulse(MotorId::B, Direction::Forward).unwrap();

        step_a.done();
        dir_a.done();
        step_b.done();
        dir_b.done();
    }
}
