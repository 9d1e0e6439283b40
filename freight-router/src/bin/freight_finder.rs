//! Command-line route finder.
//!
//! Reads three lines from stdin (origin port, destination port, criterion)
//! and prints the route as pretty JSON.

use std::io::{self, BufRead};
use std::process::ExitCode;

use freight_router::config::ServerConfig;
use freight_router::planner::RoutePlanner;
use freight_router::snapshot::Snapshot;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays pure JSON
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(io::stdin().lock(), &config) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: impl BufRead, config: &ServerConfig) -> Result<String, String> {
    let lines = input
        .lines()
        .take(3)
        .collect::<Result<Vec<String>, _>>()
        .map_err(|e| e.to_string())?;

    let [origin, destination, criterion] = lines.as_slice() else {
        return Err("Need 3 input lines".to_string());
    };

    let snapshot = Snapshot::load(&config.data_path).map_err(|e| e.to_string())?;

    let planner = RoutePlanner::new(&snapshot, &config.search);
    let result = planner
        .find_route_str(origin, destination, criterion)
        .map_err(|e| e.to_string())?;

    serde_json::to_string_pretty(&result).map_err(|e| e.to_string())
}
