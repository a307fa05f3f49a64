//! `ocean [VARIANT]` — generate the composition if needed and run it.

use std::path::Path;

use ocean_common::config::load_ocean_config;
use ocean_recipe::BlubberCli;
use ocean_runtime::launch::{ensure_and_run, ensure_manifest};
use ocean_runtime::process::ExecLauncher;

use super::Cli;

/// Executes the composition flow.
///
/// # Errors
///
/// Returns an error if the config cannot be read, generation fails, or
/// docker-compose cannot be started.
pub fn execute(cli: &Cli, workdir: &Path) -> anyhow::Result<()> {
    let config = load_ocean_config(&cli.config)?;
    let compiler = BlubberCli::new(cli.compiler.clone());

    if cli.generate_only {
        let prepared = ensure_manifest(workdir, &config, &cli.variant, &compiler, true)?;
        let manifest = ocean_compose::CompositionManifest::read(&prepared.path)?;
        for line in crate::output::summary_lines(&prepared.path, &manifest) {
            eprintln!("{line}");
        }
        return Ok(());
    }

    let _ = ensure_and_run(
        workdir,
        &config,
        &cli.variant,
        &compiler,
        &ExecLauncher,
        cli.regenerate,
    )?;
    Ok(())
}
