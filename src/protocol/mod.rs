//! Host protocol for hbot-motion.
//!
//! Commands in, reports out. The interpreter works on typed values and is
//! `no_std`; the JSON line codec needs `std`.

#[cfg(feature = "std")]
mod codec;
mod command;
mod interpreter;
mod report;

#[cfg(feature = "std")]
pub use codec::{decode_line, encode_command, encode_report};
pub use command::Command;
pub use interpreter::CommandInterpreter;
pub use report::{Report, StatusKind, CONTROLLER_NAME};
