//! `ocean --single [VARIANT]` — build the project as one image and run it.

use std::path::Path;

use ocean_common::config::{load_optional_ocean_config, load_package_json};
use ocean_recipe::BlubberCli;
use ocean_runtime::image::{DockerBuild, build_and_run};
use ocean_runtime::process::ExecLauncher;

use super::Cli;

/// Executes the single-service flow.
///
/// # Errors
///
/// Returns an error if `package.json` is missing or unnamed, the recipe
/// does not compile, the image build fails, or docker cannot be started.
pub fn execute(cli: &Cli, workdir: &Path) -> anyhow::Result<()> {
    let package = load_package_json(&cli.package)?;
    let config = load_optional_ocean_config(&cli.config)?;
    let compiler = BlubberCli::new(cli.compiler.clone());

    build_and_run(
        workdir,
        &package,
        &config,
        &cli.variant,
        &compiler,
        &DockerBuild,
        &ExecLauncher,
    )?;
    Ok(())
}
