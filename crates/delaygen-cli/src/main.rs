//! DelayGen command line interface
//!
//! Thin adapter over [`delaygen_core`]: translates command line
//! arguments into controller calls and prints the results.

use anyhow::Context;
use clap::Parser;
use delaygen_core::params::{parse_assignment, Parameter, ParameterSet};
use delaygen_core::protocol::{
    list_ports, ControllerConfig, DelayController, DEFAULT_BAUD_RATE, DEFAULT_PORT,
    DEFAULT_TIMEOUT_MS,
};
use tracing_subscriber::EnvFilter;

/// Control delay parameters on a connected pulse delay generator
#[derive(Parser, Debug)]
#[command(name = "delaygen", version, about)]
struct Cli {
    /// Serial port of the generator
    #[arg(long, default_value = DEFAULT_PORT)]
    port: String,

    /// Baud rate
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Response timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout: u64,

    /// Set one or more parameters, values in ns (raw count for repeats),
    /// e.g. --set offset=100 length=200
    #[arg(long, num_args = 1.., value_name = "PARAM=VALUE")]
    set: Vec<String>,

    /// Get one or more parameters (offset, length, spacing, repeats)
    #[arg(long, num_args = 1.., value_name = "PARAM")]
    get: Vec<String>,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_ports {
        for port in list_ports() {
            match port.product {
                Some(product) => println!("{}  ({})", port.name, product),
                None => println!("{}", port.name),
            }
        }
        return Ok(());
    }

    if cli.set.is_empty() && cli.get.is_empty() {
        println!("No action specified. Use --set or --get.");
        return Ok(());
    }

    let config = ControllerConfig {
        port_name: cli.port.clone(),
        baud_rate: cli.baud,
        timeout_ms: cli.timeout,
    };
    let mut dc = DelayController::open(config).with_context(|| format!("opening {}", cli.port))?;

    let mut failures = 0usize;

    // Malformed items are reported individually; the well-formed
    // remainder is still attempted as one atomic batch.
    if !cli.set.is_empty() {
        let mut params = ParameterSet::new();
        for item in &cli.set {
            match parse_assignment(item) {
                Ok((param, value)) => params.insert(param, value),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    failures += 1;
                }
            }
        }
        if !params.is_empty() {
            match dc.set_parameters(&params) {
                Ok(()) => {
                    for (param, value) in params.iter() {
                        println!("Set {} = {}", param, value);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    failures += 1;
                }
            }
        }
    }

    for name in &cli.get {
        let result = name
            .parse::<Parameter>()
            .and_then(|param| dc.get_parameter(param));
        match result {
            Ok(value) => println!("{} = {}", name, value),
            Err(e) => {
                eprintln!("Error: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["delaygen"]).unwrap();
        assert_eq!(cli.port, DEFAULT_PORT);
        assert_eq!(cli.baud, DEFAULT_BAUD_RATE);
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_MS);
        assert!(cli.set.is_empty());
        assert!(cli.get.is_empty());
        assert!(!cli.list_ports);
    }

    #[test]
    fn test_cli_batch_arguments() {
        let cli = Cli::try_parse_from([
            "delaygen",
            "--set",
            "offset=100",
            "length=200",
            "--get",
            "repeats",
        ])
        .unwrap();
        assert_eq!(cli.set, vec!["offset=100", "length=200"]);
        assert_eq!(cli.get, vec!["repeats"]);
    }
}
