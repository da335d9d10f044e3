//! JSON line codec (std only).
//!
//! One JSON object per line in each direction. Decoding separates lines that
//! are not a command at all from well-formed commands of a kind this
//! controller does not handle, so the caller can log them differently.

use serde::Deserialize;
use std::string::String;

use crate::error::{truncated, CommandError, Error, Result};

use super::command::Command;
use super::report::Report;

/// Commands this codec decodes.
const KNOWN_COMMANDS: [&str; 5] = ["home", "move_absolute", "move_relative", "stop", "get_position"];

/// Just the tag, to classify lines that fail full decoding.
#[derive(Deserialize)]
struct Envelope {
    cmd: Option<String>,
}

/// Decode one line into a command.
///
/// Lines that do not decode are logged before the error is returned, so a
/// caller that simply drops them still leaves a trace.
///
/// # Errors
///
/// `UnknownCommand` for a JSON object whose `cmd` is not one of ours,
/// `NonFinite` for a command whose numbers overflow to infinity,
/// `Malformed` for anything else that does not decode.
pub fn decode_line(line: &str) -> Result<Command> {
    let result = classify(line.trim());
    match &result {
        Ok(_) => {}
        Err(Error::Command(CommandError::UnknownCommand(name))) => {
            log_warn!("ignoring unknown command '{}'", name.as_str());
        }
        Err(Error::Command(CommandError::Malformed(msg))) => {
            log_warn!("ignoring malformed command: {}", msg.as_str());
        }
        Err(_) => log_warn!("ignoring command with non-finite parameters"),
    }
    result
}

fn classify(line: &str) -> Result<Command> {
    let err = match serde_json::from_str::<Command>(line) {
        Ok(command) => return command.check().map(|()| command),
        Err(e) => e,
    };

    let envelope: Envelope = serde_json::from_str(line)
        .map_err(|e| Error::Command(CommandError::Malformed(truncated(&e.to_string()))))?;

    match envelope.cmd {
        None => Err(CommandError::Malformed(truncated("no 'cmd' field")).into()),
        Some(name) if KNOWN_COMMANDS.contains(&name.as_str()) => {
            Err(CommandError::Malformed(truncated(&err.to_string())).into())
        }
        Some(name) => Err(CommandError::UnknownCommand(truncated(&name)).into()),
    }
}

/// Encode a report as one line, without the trailing newline.
pub fn encode_report(report: &Report) -> Result<String> {
    serde_json::to_string(report)
        .map_err(|e| Error::Command(CommandError::Malformed(truncated(&e.to_string()))))
}

/// Encode a command as one line, without the trailing newline.
pub fn encode_command(command: &Command) -> Result<String> {
    serde_json::to_string(command)
        .map_err(|e| Error::Command(CommandError::Malformed(truncated(&e.to_string()))))
}
