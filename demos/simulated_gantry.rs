//! Simulated gantry example.
//!
//! Runs the cooperative control loop against the simulation backend: each
//! iteration services one motion tick, then feeds the next scripted command
//! line once the gantry is idle. Every report line is printed as it would
//! be written to the host serial port.
//!
//! Run with `cargo run --example simulated_gantry [config.toml]`.

use hbot_motion::config::{load_config, BoardGeometry, GantryConfig};
use hbot_motion::protocol::{decode_line, encode_report, CommandInterpreter, Report};
use hbot_motion::sim::SimGantry;
use hbot_motion::{MotionController, MotionState};

/// Host commands, one JSON object per line.
const SCRIPT: &[&str] = &[
    r#"{"cmd":"move_absolute","x":50.0,"y":50.0}"#,
    r#"{"cmd":"home"}"#,
    r#"{"cmd":"move_absolute","x":50.0,"y":25.0,"speed":6000}"#,
    r#"{"cmd":"move_relative","dx":-12.5,"dy":40.0}"#,
    r#"{"cmd":"magnet_on"}"#,
    r#"{"cmd":"move_absolute","x":900.0,"y":10.0}"#,
    r#"{"cmd":"get_position"}"#,
    r#"{"cmd":"stop"}"#,
];

/// Loop period in microseconds.
const LOOP_US: u64 = 100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(path)?,
        None => GantryConfig::default(),
    };

    let sim = SimGantry::new();
    // Carriage powers up 20 mm in front of the switch
    sim.place_switch((20.0 * config.board.steps_per_mm) as i64);

    let mut controller = MotionController::new(&config, sim.outputs(), sim.limit_switch())?;
    let interpreter = CommandInterpreter::new(BoardGeometry::from_config(&config.board));

    send(&interpreter.ready())?;

    let mut script = SCRIPT.iter();
    loop {
        // Service motion tick; a fault has already stopped the motors
        match controller.tick(sim.now()) {
            Ok(Some(event)) => send(&interpreter.on_event(event))?,
            Ok(None) => {}
            Err(e) => send(&interpreter.on_fault(&e))?,
        }

        // Service protocol input
        if controller.state() == MotionState::Idle {
            let Some(line) = script.next() else { break };
            println!("<- {line}");
            match decode_line(line) {
                Ok(command) => {
                    if let Some(report) = interpreter.handle(command, &mut controller) {
                        send(&report)?;
                    }
                }
                Err(e) => println!("   ignored: {e}"),
            }
        }

        sim.advance(LOOP_US);
    }

    println!(
        "{} pulses in {:.3} s of simulated time",
        sim.pulse_count(),
        sim.now().0 as f64 / 1e6
    );
    Ok(())
}

fn send(report: &Report) -> Result<(), Box<dyn std::error::Error>> {
    println!("-> {}", encode_report(report)?);
    Ok(())
}
