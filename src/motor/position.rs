//! Position tracking for the H-Bot gantry.
//!
//! The per-motor pulse counters are the physical record of every pulse
//! emitted; the Cartesian position is always derived from them.

use crate::motion::kinematics;

/// Cartesian position or delta in steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisPosition {
    /// X axis in steps from origin.
    pub steps_x: i64,
    /// Y axis in steps from origin.
    pub steps_y: i64,
}

impl AxisPosition {
    /// The homed origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new position.
    #[inline]
    pub const fn new(steps_x: i64, steps_y: i64) -> Self {
        Self { steps_x, steps_y }
    }

    /// Component-wise difference `self - other`.
    #[inline]
    pub fn delta_from(self, other: AxisPosition) -> AxisPosition {
        AxisPosition::new(self.steps_x - other.steps_x, self.steps_y - other.steps_y)
    }
}

/// Signed pulse counters for motor A and motor B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotorSteps {
    /// Motor A counter (drives X + Y).
    pub a: i64,
    /// Motor B counter (drives X - Y).
    pub b: i64,
}

impl MotorSteps {
    /// Create new counters.
    #[inline]
    pub const fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// True when neither motor has steps left.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.a == 0 && self.b == 0
    }

    /// Cartesian view of these counters.
    #[inline]
    pub fn to_position(self) -> AxisPosition {
        kinematics::to_cartesian(self)
    }

    /// Reset both counters to zero.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_from() {
        let target = AxisPosition::new(800, -20);
        let current = AxisPosition::new(300, 10);

        assert_eq!(target.delta_from(current), AxisPosition::new(500, -30));
    }

    #[test]
    fn test_counters_to_position() {
        // Both motors forward 10 pulses is 10 steps of pure +X
        assert_eq!(MotorSteps::new(10, 10).to_position(), AxisPosition::new(10, 0));
        // A forward, B reverse is pure +Y
        assert_eq!(MotorSteps::new(10, -10).to_position(), AxisPosition::new(0, 10));
    }

    #[test]
    fn test_reset() {
        let mut counters = MotorSteps::new(-7, 42);
        counters.reset();
        assert!(counters.is_zero());
    }
}
