//! Single-service flow.
//!
//! Builds one image straight from the compiled recipe (no build file is
//! written to disk) and replaces the process with `docker run`, mounting
//! the working directory over the application directory.

use std::path::Path;
use std::process::{Command, Stdio};

use ocean_common::config::{OceanConfig, PackageJson};
use ocean_common::constants::RUNTIME_BIN;
use ocean_common::error::{OceanError, Result};
use ocean_compose::generator::volumes_for;
use ocean_compose::naming::suffix_for;
use ocean_recipe::{RecipeCompiler, compile_service};

use crate::process::{Invocation, Launcher, run_with_input};

/// Builds a tagged image from build file content.
pub trait ImageBuilder {
    /// Builds `recipe` in `context` and tags the result `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`OceanError::Exec`] if the build cannot run or fails.
    fn build(&self, tag: &str, context: &Path, recipe: &[u8]) -> Result<()>;
}

/// Builds images with `docker build --file -`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerBuild;

impl ImageBuilder for DockerBuild {
    fn build(&self, tag: &str, context: &Path, recipe: &[u8]) -> Result<()> {
        let docker = which::which(RUNTIME_BIN).map_err(|e| OceanError::Exec {
            program: RUNTIME_BIN.to_owned(),
            message: e.to_string(),
        })?;
        tracing::info!(tag, context = %context.display(), "building image");

        let mut command = Command::new(docker);
        let _ = command
            .args(["build", "--tag", tag, "--file", "-", "."])
            .current_dir(context)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let status = run_with_input(command, RUNTIME_BIN, recipe.to_vec())?;
        if !status.success() {
            return Err(OceanError::Exec {
                program: RUNTIME_BIN.to_owned(),
                message: format!("image build exited with {status}"),
            });
        }
        Ok(())
    }
}

/// Image tag for `package` built as `variant`, e.g. `mathoid-dev`.
#[must_use]
pub fn image_tag(package: &str, variant: &str) -> String {
    format!("{package}{}", suffix_for(variant))
}

/// `docker run` invocation for the single-service flow.
///
/// `workdir` is mounted over `lives_in` with the dependency directory
/// shadowed. A port, when given, is published on the same host port.
#[must_use]
pub fn run_invocation(workdir: &Path, lives_in: &str, port: Option<u16>, tag: &str) -> Invocation {
    let mut args: Vec<String> = ["run", "--rm", "--interactive", "--tty"]
        .into_iter()
        .map(str::to_owned)
        .collect();
    for volume in volumes_for(&workdir.display().to_string(), lives_in) {
        args.push("--volume".to_owned());
        args.push(volume);
    }
    if let Some(port) = port {
        args.push("-p".to_owned());
        args.push(format!("{port}:{port}"));
    }
    args.push(tag.to_owned());
    Invocation::new(RUNTIME_BIN, args)
}

/// Compiles the project at `workdir`, builds its image, and runs it.
///
/// # Errors
///
/// Returns any compile, build, or launch error.
pub fn build_and_run(
    workdir: &Path,
    package: &PackageJson,
    config: &OceanConfig,
    variant: &str,
    compiler: &dyn RecipeCompiler,
    builder: &dyn ImageBuilder,
    launcher: &dyn Launcher,
) -> Result<()> {
    let recipe = compile_service(compiler, workdir, variant)?;
    let tag = image_tag(&package.name, variant);
    builder.build(&tag, workdir, &recipe.content)?;
    launcher.launch(&run_invocation(
        workdir,
        &recipe.lives_in,
        config.port(variant),
        &tag,
    ))
}
