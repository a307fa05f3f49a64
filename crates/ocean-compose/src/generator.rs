//! Composition generation.
//!
//! For one variant, compiles every declared service, writes its build
//! file, and assembles and writes the composition manifest. Generation is
//! fail-fast: the first error stops the pass before the manifest is
//! written, so no manifest ever references a build file that was not
//! produced.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ocean_common::config::{OceanConfig, ServiceSpec};
use ocean_common::constants::{DEFAULT_MANIFEST_LINK, DEPENDENCY_DIR, PUBLISHED_VARIANT};
use ocean_common::error::{OceanError, Result};
use ocean_recipe::{RecipeCompiler, compile_service};

use crate::manifest::{BuildReference, CompositionManifest, ServiceEntry};
use crate::naming;

/// Generates every artifact for `variant` under `root`.
///
/// `root` is the project directory; all paths embedded in the manifest
/// stay relative to it. For the `dev` variant the manifest is also linked
/// as `docker-compose.yml`.
///
/// # Errors
///
/// Returns the first configuration, compile, or I/O error encountered.
pub fn generate(
    root: &Path,
    config: &OceanConfig,
    variant: &str,
    compiler: &dyn RecipeCompiler,
) -> Result<CompositionManifest> {
    let services = config.services(variant);
    if services.is_empty() {
        tracing::warn!(variant, "variant declares no services");
    }

    let mut manifest = CompositionManifest::new();
    for (name, service) in services {
        let entry = generate_service(root, name, service, variant, compiler)?;
        let _ = manifest
            .services
            .insert(naming::service_key(name, variant), entry);
    }

    let manifest_path = root.join(naming::manifest_file_name(variant));
    manifest.write(&manifest_path)?;

    if variant == PUBLISHED_VARIANT {
        publish_default_manifest(root, &naming::manifest_file_name(variant))?;
    }

    Ok(manifest)
}

fn generate_service(
    root: &Path,
    name: &str,
    service: &ServiceSpec,
    variant: &str,
    compiler: &dyn RecipeCompiler,
) -> Result<ServiceEntry> {
    let context = service_context(name, &service.path)?;
    let build_variant = naming::effective_build_variant(service, variant);
    let dockerfile = naming::build_file_name(build_variant);
    tracing::info!(service = name, context = %context, build_variant, "generating service");

    let service_dir = root.join(&context);
    let recipe = compile_service(compiler, &service_dir, build_variant)?;

    let dockerfile_path = service_dir.join(&dockerfile);
    std::fs::write(&dockerfile_path, &recipe.content)
        .map_err(|e| OceanError::io(&dockerfile_path, e))?;
    tracing::debug!(path = %dockerfile_path.display(), "wrote build file");

    Ok(ServiceEntry {
        image: None,
        volumes: volumes_for(&context, &recipe.lives_in),
        build: Some(BuildReference {
            dockerfile,
            context,
        }),
        ports: service.ports.clone(),
        command: Some(service.command.clone()).filter(|c| !c.is_empty()),
    })
}

/// Normalized build context of a service.
///
/// # Errors
///
/// Returns [`OceanError::Config`] if `path` is absolute.
fn service_context(name: &str, path: &str) -> Result<String> {
    if Path::new(path).is_absolute() {
        return Err(OceanError::Config {
            path: PathBuf::from(path),
            message: format!("service \"{name}\" must use a path relative to the project root"),
        });
    }
    Ok(naming::normalize_path(path))
}

/// Mounts the service source over `lives_in` and shadows its dependency
/// directory so the container keeps its own installed dependencies.
#[must_use]
pub fn volumes_for(context: &str, lives_in: &str) -> Vec<String> {
    let trimmed = lives_in.trim_end_matches('/');
    if trimmed.is_empty() && !lives_in.is_empty() {
        return vec![format!("{context}:/"), format!("/{DEPENDENCY_DIR}")];
    }
    vec![
        format!("{context}:{trimmed}"),
        format!("{trimmed}/{DEPENDENCY_DIR}"),
    ]
}

/// Links `docker-compose.yml` to `manifest_name` inside `root`.
///
/// An existing link or file is left untouched.
///
/// # Errors
///
/// Returns an error if the link cannot be created for any other reason.
pub fn publish_default_manifest(root: &Path, manifest_name: &str) -> Result<()> {
    let link = root.join(DEFAULT_MANIFEST_LINK);
    match symlink(Path::new(manifest_name), &link) {
        Ok(()) => {
            tracing::info!(link = %link.display(), target = manifest_name, "published default manifest");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::debug!(link = %link.display(), "default manifest already present");
            Ok(())
        }
        Err(e) => Err(OceanError::io(link, e)),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
