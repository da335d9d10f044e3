//! H-Bot kinematic transform.
//!
//! Motor A moves the carriage along X + Y and motor B along X - Y:
//!
//! ```text
//! a = dx + dy        dx = (a + b) / 2
//! b = dx - dy        dy = (a - b) / 2
//! ```
//!
//! The inverse is exact only when `a + b` is even. Integer division
//! truncates toward zero, so an odd pair drops half a step on each axis.

use crate::motor::{AxisPosition, MotorSteps};

/// Direction of a single motor pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Positive step count.
    Forward,
    /// Negative step count.
    Reverse,
}

impl Direction {
    /// Direction toward a signed remaining delta, or `None` when it is zero.
    #[inline]
    pub fn toward(delta: i64) -> Option<Self> {
        match delta {
            0 => None,
            d if d > 0 => Some(Direction::Forward),
            _ => Some(Direction::Reverse),
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// One of the two gantry motors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorId {
    /// Motor A (X + Y).
    A,
    /// Motor B (X - Y).
    B,
}

/// Map a Cartesian step delta to motor step deltas.
#[inline]
pub fn to_motor(delta: AxisPosition) -> MotorSteps {
    MotorSteps::new(
        delta.steps_x + delta.steps_y,
        delta.steps_x - delta.steps_y,
    )
}

/// Map motor step deltas back to a Cartesian step delta (truncating).
#[inline]
pub fn to_cartesian(motor: MotorSteps) -> AxisPosition {
    AxisPosition::new((motor.a + motor.b) / 2, (motor.a - motor.b) / 2)
}

/// True when [`to_cartesian`] loses nothing for these motor deltas.
#[inline]
pub fn is_exact(motor: MotorSteps) -> bool {
    (motor.a + motor.b) % 2 == 0
}
