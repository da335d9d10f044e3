//! Motion state of the gantry.

/// Which activity currently owns the motor outputs.
///
/// Exactly one is active. Only the scheduler emits pulses in `Moving` and
/// only the homing machine emits pulses in `Homing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionState {
    /// Ready for commands; no pulses are emitted.
    #[default]
    Idle,
    /// Executing a Cartesian move.
    Moving,
    /// Executing the homing sequence.
    Homing,
}

impl MotionState {
    /// State name for logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            MotionState::Idle => "Idle",
            MotionState::Moving => "Moving",
            MotionState::Homing => "Homing",
        }
    }
}
