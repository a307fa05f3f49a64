//! CLI definition and dispatch.

pub mod compose;
pub mod single;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use ocean_common::constants::{
    DEFAULT_COMPILER, DEFAULT_CONFIG_PATH, DEFAULT_PACKAGE_PATH, DEFAULT_VARIANT,
};

/// ocean — run a multi-service project under docker-compose, per variant.
#[derive(Parser, Debug)]
#[command(name = "ocean", version, about, long_about = None, disable_help_flag = true)]
pub struct Cli {
    /// Variant to generate and launch (e.g. dev, test).
    #[arg(default_value = DEFAULT_VARIANT)]
    pub variant: String,

    /// Path to the ocean service/variant config.
    #[arg(long, env = "OCEAN_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Build-recipe compiler binary.
    #[arg(long, env = "OCEAN_COMPILER", default_value = DEFAULT_COMPILER)]
    pub compiler: String,

    /// Regenerate artifacts even if the manifest already exists.
    #[arg(long)]
    pub regenerate: bool,

    /// Write build files and the manifest, then exit without launching.
    #[arg(long, conflicts_with = "single")]
    pub generate_only: bool,

    /// Build and run the project as a single image instead of a composition.
    #[arg(long)]
    pub single: bool,

    /// Package metadata used to tag the image in single mode.
    #[arg(long, default_value = DEFAULT_PACKAGE_PATH)]
    pub package: PathBuf,

    /// Show help/usage.
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue)]
    pub help: bool,
}

/// Dispatches the parsed command line.
///
/// # Errors
///
/// Returns an error if any step fails; [`ocean_common::error::OceanError`]
/// values are preserved so the caller can pick the exit code.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let workdir = std::env::current_dir().context("cannot determine working directory")?;
    tracing::debug!(workdir = %workdir.display(), variant = %cli.variant, "starting");

    if cli.single {
        single::execute(&cli, &workdir)
    } else {
        compose::execute(&cli, &workdir)
    }
}
