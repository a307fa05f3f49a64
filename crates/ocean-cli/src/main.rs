//! # ocean
//!
//! Turns `.ocean/config.json` into per-variant build files and a
//! docker-compose manifest, then hands the terminal to docker-compose.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod commands;
mod output;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use ocean_common::constants::FAILURE_EXIT_CODE;
use ocean_common::error::OceanError;

use crate::commands::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.help {
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::from(HELP_EXIT_CODE);
    }

    match commands::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ocean: {err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

/// Status reported after printing usage.
const HELP_EXIT_CODE: u8 = 1;

/// Exit status for a failed run; domain errors keep their own code.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    let code = err
        .downcast_ref::<OceanError>()
        .map_or(FAILURE_EXIT_CODE, OceanError::exit_code);
    u8::try_from(code).unwrap_or(1)
}
