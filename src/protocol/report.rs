//! Outbound reports to the host.

use serde::Serialize;

/// Name this subsystem reports under in status messages.
pub const CONTROLLER_NAME: &str = "motor";

/// Status kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Controller booted.
    Ready,
    /// Homing succeeded.
    Homed,
    /// Motion stopped on request.
    Stopped,
    /// A command failed.
    Error,
}

/// One report, tagged by `type` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Report {
    /// Lifecycle or error status.
    Status {
        /// What happened.
        status: StatusKind,
        /// Always [`CONTROLLER_NAME`].
        controller: &'static str,
        /// Human-readable detail.
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<&'static str>,
    },
    /// Current position in millimetres.
    Position {
        /// X in mm.
        x: f32,
        /// Y in mm.
        y: f32,
        /// Whether the position is relative to a homed origin.
        homed: bool,
    },
}

impl Report {
    /// Status report with a message.
    pub fn status(status: StatusKind, message: &'static str) -> Self {
        Report::Status {
            status,
            controller: CONTROLLER_NAME,
            message: Some(message),
        }
    }

    /// Error status with a message.
    pub fn error(message: &'static str) -> Self {
        Self::status(StatusKind::Error, message)
    }

    /// Position report.
    pub fn position(x: f32, y: f32, homed: bool) -> Self {
        Report::Position { x, y, homed }
    }
}
