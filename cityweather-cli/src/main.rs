//! Binary crate for the `weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Human-friendly output formatting
//! - Turning errors into messages and exit codes

use std::process::ExitCode;

use clap::Parser;
use cityweather_core::WeatherError;
use tracing_subscriber::EnvFilter;

mod cli;
mod display;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();
    init_tracing(cmd.verbose);

    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<WeatherError>().map_or(1, WeatherError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_errors_keep_their_exit_code() {
        let err = anyhow::Error::from(WeatherError::CityNotFound);
        assert_eq!(exit_code(&err), 5);
    }

    #[test]
    fn other_errors_exit_with_one() {
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }
}
