//! Board geometry derived from configuration.

use super::board::BoardConfig;
use super::limits::BoardLimits;
use super::units::{Millimeters, Steps};

/// Derived conversion parameters computed from board configuration.
///
/// Computed once at start-up and injected into the command interpreter; it
/// is the only place millimetres and steps meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    /// Cartesian steps per millimetre.
    pub steps_per_mm: f32,

    /// Travel limits and out-of-bounds policy.
    pub limits: BoardLimits,
}

impl BoardGeometry {
    /// Compute geometry from board configuration.
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            steps_per_mm: config.steps_per_mm,
            limits: BoardLimits::new(config.max_x_mm, config.max_y_mm, config.limit_policy),
        }
    }

    /// Convert millimetres to steps.
    #[inline]
    pub fn mm_to_steps(&self, mm: Millimeters) -> Steps {
        Steps::from_mm(mm, self.steps_per_mm)
    }

    /// Convert steps to millimetres.
    #[inline]
    pub fn steps_to_mm(&self, steps: Steps) -> Millimeters {
        steps.to_mm(self.steps_per_mm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_board_extent() {
        let geometry = BoardGeometry::from_config(&BoardConfig::default());

        assert_eq!(geometry.mm_to_steps(geometry.limits.max_x), Steps(32000));
        assert_eq!(geometry.mm_to_steps(geometry.limits.max_y), Steps(32000));
    }

    #[test]
    fn test_conversion_round_trip() {
        let geometry = BoardGeometry::from_config(&BoardConfig::default());

        let steps = geometry.mm_to_steps(Millimeters(123.25));
        assert_eq!(steps, Steps(9860));
        assert!((geometry.steps_to_mm(steps).value() - 123.25).abs() < 0.001);
    }
}
