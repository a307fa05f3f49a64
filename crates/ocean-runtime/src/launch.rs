//! Composition launch.
//!
//! `Start -> [manifest missing: Generate] -> Launch`. No state is
//! revisited and nothing is retried.

use std::path::{Path, PathBuf};

use ocean_common::config::OceanConfig;
use ocean_common::constants::ORCHESTRATOR_BIN;
use ocean_common::error::Result;
use ocean_compose::naming;
use ocean_recipe::RecipeCompiler;

use crate::process::{Invocation, Launcher};

/// Outcome of [`ensure_manifest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedManifest {
    /// Path of the manifest for the requested variant.
    pub path: PathBuf,
    /// Whether artifacts were generated during this run.
    pub regenerated: bool,
}

/// Orchestrator invocation that rebuilds stale images, removes orphaned
/// containers, and runs attached to the terminal.
#[must_use]
pub fn compose_up_invocation(manifest: &Path) -> Invocation {
    Invocation::new(
        ORCHESTRATOR_BIN,
        [
            "--file".to_owned(),
            manifest.display().to_string(),
            "up".to_owned(),
            "--build".to_owned(),
            "--remove-orphans".to_owned(),
        ],
    )
}

/// Makes sure the manifest for `variant` exists under `root`.
///
/// Generates artifacts when the manifest is absent, or always when
/// `force` is set.
///
/// # Errors
///
/// Propagates any generation error.
pub fn ensure_manifest(
    root: &Path,
    config: &OceanConfig,
    variant: &str,
    compiler: &dyn RecipeCompiler,
    force: bool,
) -> Result<PreparedManifest> {
    let path = root.join(naming::manifest_file_name(variant));
    let regenerated = force || !path.exists();

    if regenerated {
        tracing::info!(variant, path = %path.display(), force, "generating composition");
        let _ = ocean_compose::generate(root, config, variant, compiler)?;
    } else {
        tracing::info!(variant, path = %path.display(), "reusing existing manifest");
    }

    Ok(PreparedManifest { path, regenerated })
}

/// Ensures the manifest for `variant` exists, then hands off to the
/// orchestrator.
///
/// With a process-replacing launcher this only returns on error.
///
/// # Errors
///
/// Returns any generation error, or the launcher's error if the
/// orchestrator cannot be started.
pub fn ensure_and_run(
    root: &Path,
    config: &OceanConfig,
    variant: &str,
    compiler: &dyn RecipeCompiler,
    launcher: &dyn Launcher,
    force: bool,
) -> Result<PreparedManifest> {
    let prepared = ensure_manifest(root, config, variant, compiler, force)?;
    launcher.launch(&compose_up_invocation(&prepared.path))?;
    Ok(prepared)
}
