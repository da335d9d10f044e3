//! Inbound commands from the host.

#[cfg(any(feature = "std", feature = "alloc"))]
use serde::Deserialize;
use serde::Serialize;

use crate::error::{CommandError, Result};

/// One host command, tagged by `cmd` on the wire.
///
/// Missing coordinates default to zero. Decoding a tagged enum buffers the
/// object, so `Deserialize` needs `alloc`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(any(feature = "std", feature = "alloc"), derive(Deserialize))]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    /// Run the homing sequence.
    Home,
    /// Move to an absolute position in millimetres.
    MoveAbsolute {
        /// Target X in mm.
        #[serde(default)]
        x: f32,
        /// Target Y in mm.
        #[serde(default)]
        y: f32,
        /// Speed in steps per second, applied before the move.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        speed: Option<f32>,
    },
    /// Move by a delta in millimetres from the current position.
    MoveRelative {
        /// X delta in mm.
        #[serde(default)]
        dx: f32,
        /// Y delta in mm.
        #[serde(default)]
        dy: f32,
    },
    /// Cancel any motion.
    Stop,
    /// Report the current position.
    GetPosition,
}

impl Command {
    /// Wire name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Home => "home",
            Command::MoveAbsolute { .. } => "move_absolute",
            Command::MoveRelative { .. } => "move_relative",
            Command::Stop => "stop",
            Command::GetPosition => "get_position",
        }
    }

    /// True if every numeric parameter is finite.
    pub fn is_finite(&self) -> bool {
        match *self {
            Command::MoveAbsolute { x, y, speed } => {
                x.is_finite() && y.is_finite() && speed.map_or(true, f32::is_finite)
            }
            Command::MoveRelative { dx, dy } => dx.is_finite() && dy.is_finite(),
            Command::Home | Command::Stop | Command::GetPosition => true,
        }
    }

    /// Reject NaN or infinite parameters.
    pub fn check(&self) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(CommandError::NonFinite.into())
        }
    }
}
