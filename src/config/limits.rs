//! Board travel limits and the out-of-bounds policy.

use serde::Deserialize;

use super::units::Millimeters;

/// Policy for handling targets outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitPolicy {
    /// Clamp target to the nearest board edge.
    #[default]
    Clamp,
    /// Reject moves that would leave the board.
    Reject,
}

/// Board travel in millimetres, from the homed origin at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLimits {
    /// Maximum X travel.
    pub max_x: Millimeters,
    /// Maximum Y travel.
    pub max_y: Millimeters,
    /// What to do when a target is outside the board.
    pub policy: LimitPolicy,
}

impl BoardLimits {
    /// Create new board limits.
    pub fn new(max_x: Millimeters, max_y: Millimeters, policy: LimitPolicy) -> Self {
        Self {
            max_x,
            max_y,
            policy,
        }
    }

    /// Check if limits are valid (both dimensions finite and positive).
    pub fn is_valid(&self) -> bool {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        positive(self.max_x.0) && positive(self.max_y.0)
    }

    /// Check if a point is on the board.
    pub fn contains(&self, x: Millimeters, y: Millimeters) -> bool {
        (0.0..=self.max_x.0).contains(&x.0) && (0.0..=self.max_y.0).contains(&y.0)
    }

    /// Apply the limit policy to a target.
    ///
    /// Returns `Some(target)` if on the board or clamped, `None` if rejected.
    pub fn apply(&self, x: Millimeters, y: Millimeters) -> Option<(Millimeters, Millimeters)> {
        if self.contains(x, y) {
            return Some((x, y));
        }
        match self.policy {
            LimitPolicy::Reject => None,
            LimitPolicy::Clamp => Some((x.clamp_to(self.max_x), y.clamp_to(self.max_y))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(policy: LimitPolicy) -> BoardLimits {
        BoardLimits::new(Millimeters(400.0), Millimeters(300.0), policy)
    }

    #[test]
    fn test_board_clamp() {
        let limits = board(LimitPolicy::Clamp);

        assert_eq!(
            limits.apply(Millimeters(500.0), Millimeters(0.0)),
            Some((Millimeters(400.0), Millimeters(0.0)))
        );
        assert_eq!(
            limits.apply(Millimeters(-10.0), Millimeters(350.0)),
            Some((Millimeters(0.0), Millimeters(300.0)))
        );
        assert_eq!(
            limits.apply(Millimeters(12.0), Millimeters(34.0)),
            Some((Millimeters(12.0), Millimeters(34.0)))
        );
    }

    #[test]
    fn test_limits_validity() {
        let flat = BoardLimits::new(Millimeters(0.0), Millimeters(300.0), LimitPolicy::Clamp);
        let nan = BoardLimits::new(Millimeters(400.0), Millimeters(f32::NAN), LimitPolicy::Clamp);

        assert!(board(LimitPolicy::Clamp).is_valid());
        assert!(!flat.is_valid());
        assert!(!nan.is_valid());
    }

    #[test]
    fn test_board_reject() {
        let limits = board(LimitPolicy::Reject);

        assert!(limits.apply(Millimeters(400.0), Millimeters(300.0)).is_some());
        assert!(limits.apply(Millimeters(0.0), Millimeters(0.0)).is_some());
        assert!(limits.apply(Millimeters(400.1), Millimeters(0.0)).is_none());
        assert!(limits.apply(Millimeters(0.0), Millimeters(-0.1)).is_none());
    }
}
