//! Build-recipe compilation.
//!
//! [`RecipeCompiler`] is the seam between ocean and the external compiler.
//! Generation code only ever talks to the trait, which keeps it testable
//! without a compiler binary installed.

use std::path::Path;
use std::process::{Command, Stdio};

use ocean_common::constants::BUILD_CONFIG_PATH;
use ocean_common::error::{OceanError, Result};

use crate::blubber::BlubberConfig;

/// A compiled build file plus the metadata needed to mount it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecipe {
    /// Build file content.
    pub content: Vec<u8>,
    /// In-container application directory.
    pub lives_in: String,
}

/// Compiles a build configuration for one variant.
pub trait RecipeCompiler {
    /// Compiles the config at `config` for `variant`.
    ///
    /// # Errors
    ///
    /// Returns [`OceanError::Compile`] if the config is malformed or does
    /// not define `variant`, and [`OceanError::Exec`] if the compiler
    /// cannot be run.
    fn compile(&self, config: &Path, variant: &str) -> Result<BuildRecipe>;
}

/// Compiles the conventional build config of the service rooted at `service_dir`.
///
/// # Errors
///
/// Propagates any error from `compiler`.
pub fn compile_service(
    compiler: &dyn RecipeCompiler,
    service_dir: &Path,
    variant: &str,
) -> Result<BuildRecipe> {
    let config = service_dir.join(BUILD_CONFIG_PATH);
    tracing::info!(config = %config.display(), variant, "compiling build recipe");
    compiler.compile(&config, variant)
}

/// Drives the `blubber` command-line compiler.
///
/// The config is inspected up front so that malformed configs and unknown
/// variants are reported as compile errors before any process is spawned.
#[derive(Debug, Clone)]
pub struct BlubberCli {
    program: String,
}

impl BlubberCli {
    /// Creates a compiler that runs `program` (looked up on `PATH`).
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Name of the compiler binary.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for BlubberCli {
    fn default() -> Self {
        Self::new(ocean_common::constants::DEFAULT_COMPILER)
    }
}

impl RecipeCompiler for BlubberCli {
    fn compile(&self, config: &Path, variant: &str) -> Result<BuildRecipe> {
        let blubber = BlubberConfig::load(config, variant)?;
        let lives_in = blubber.lives_in(config, variant)?;

        let binary = which::which(&self.program).map_err(|e| OceanError::Exec {
            program: self.program.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(binary = %binary.display(), variant, "running build-recipe compiler");

        let output = Command::new(&binary)
            .arg(config)
            .arg(variant)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| OceanError::Exec {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(OceanError::Compile {
                path: config.to_path_buf(),
                variant: variant.to_owned(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(BuildRecipe {
            content: output.stdout,
            lives_in,
        })
    }
}
