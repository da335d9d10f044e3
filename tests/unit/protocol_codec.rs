//! Unit tests for the JSON line protocol.

use hbot_motion::error::{CommandError, Error};
use hbot_motion::protocol::{decode_line, encode_report, Command, Report, StatusKind};

/// Every inbound command kind decodes.
#[test]
fn test_decode_every_command() {
    let cases = [
        (r#"{"cmd":"home"}"#, Command::Home),
        (r#"{"cmd":"stop"}"#, Command::Stop),
        (r#"{"cmd":"get_position"}"#, Command::GetPosition),
        (
            r#"{"cmd":"move_absolute","x":200.0,"y":150.5}"#,
            Command::MoveAbsolute {
                x: 200.0,
                y: 150.5,
                speed: None,
            },
        ),
        (
            r#"{"cmd":"move_relative","dx":-10.0,"dy":2.5}"#,
            Command::MoveRelative { dx: -10.0, dy: 2.5 },
        ),
    ];

    for (line, expected) in cases {
        assert_eq!(decode_line(line).expect(line), expected);
    }
}

/// Surrounding whitespace and the line terminator are tolerated.
#[test]
fn test_decode_with_line_ending() {
    assert_eq!(decode_line("  {\"cmd\":\"stop\"}\r\n").unwrap(), Command::Stop);
}

/// Peripheral commands handled by other controllers are unknown here.
#[test]
fn test_peripheral_commands_are_unknown() {
    for line in [
        r#"{"cmd":"magnet_on"}"#,
        r#"{"cmd":"magnet_off","magnet":3}"#,
        r#"{"cmd":"set_fan","fan":1,"speed":128}"#,
    ] {
        let err = decode_line(line).unwrap_err();
        assert!(
            matches!(err, Error::Command(CommandError::UnknownCommand(_))),
            "{line}"
        );
    }
}

/// A line without a `cmd` field is malformed.
#[test]
fn test_missing_cmd_field() {
    let err = decode_line(r#"{"x":10.0}"#).unwrap_err();

    assert!(matches!(err, Error::Command(CommandError::Malformed(_))));
}

/// Reports encode to the documented shapes.
#[test]
fn test_encode_reports() {
    assert_eq!(
        encode_report(&Report::status(StatusKind::Homed, "Gantry homed to (0, 0)")).unwrap(),
        r#"{"type":"status","status":"homed","controller":"motor","message":"Gantry homed to (0, 0)"}"#
    );
    assert_eq!(
        encode_report(&Report::error("Gantry not homed")).unwrap(),
        r#"{"type":"status","status":"error","controller":"motor","message":"Gantry not homed"}"#
    );
    assert_eq!(
        encode_report(&Report::position(0.0, 0.0, false)).unwrap(),
        r#"{"type":"position","x":0.0,"y":0.0,"homed":false}"#
    );
}
