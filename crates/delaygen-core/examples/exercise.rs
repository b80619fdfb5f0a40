//! Delay Generator Exercise Tool
//!
//! A standalone tool to sanity-check a connected generator: sets all
//! four parameters, reads them back, and prints the result.
//!
//! Usage:
//!   cargo run --example exercise -- [OPTIONS] [PORT]
//!
//! Options:
//!   --port PORT       Serial port (default: /dev/ttyACM0)
//!   --baud RATE       Baud rate (default: 115200)
//!   --timeout MS      Read timeout in ms (default: 1000)

use delaygen_core::params::{Parameter, ParameterSet};
use delaygen_core::protocol::{ControllerConfig, DelayController};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut config = ControllerConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                i += 1;
                if i < args.len() {
                    config.port_name = args[i].clone();
                }
            }
            "--baud" | "-b" => {
                i += 1;
                if i < args.len() {
                    config.baud_rate = args[i].parse().unwrap_or(config.baud_rate);
                }
            }
            "--timeout" | "-t" => {
                i += 1;
                if i < args.len() {
                    config.timeout_ms = args[i].parse().unwrap_or(config.timeout_ms);
                }
            }
            "--help" | "-h" => {
                println!("Usage: exercise [--port PORT] [--baud RATE] [--timeout MS] [PORT]");
                return;
            }
            arg if !arg.starts_with('-') => {
                config.port_name = arg.to_string();
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
            }
        }
        i += 1;
    }

    println!("Connecting to {} at {} baud...", config.port_name, config.baud_rate);
    let mut dc = match DelayController::open(config) {
        Ok(dc) => dc,
        Err(e) => {
            eprintln!("Failed to open generator: {}", e);
            eprintln!("Make sure the port exists and you have permission (dialout group)");
            return;
        }
    };

    let mut params = ParameterSet::new();
    params.insert(Parameter::Offset, 100);
    params.insert(Parameter::Length, 20);
    params.insert(Parameter::Spacing, 40);
    params.insert(Parameter::Repeats, 2);

    if let Err(e) = dc.set_parameters(&params) {
        eprintln!("Failed to set parameters: {}", e);
        return;
    }
    println!("Parameters set");

    for param in Parameter::ALL {
        match dc.get_parameter(param) {
            Ok(value) => println!("{}: {}", param, value),
            Err(e) => eprintln!("Failed to read {}: {}", param, e),
        }
    }

    dc.close();
}
