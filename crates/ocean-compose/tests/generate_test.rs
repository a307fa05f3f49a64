//! End-to-end tests for composition generation.
//!
//! A fake compiler stands in for blubber so the full pass (build files,
//! manifest, default link) runs against a temporary project directory.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ocean_common::config::{OceanConfig, ServiceSpec, VariantSpec};
use ocean_common::error::{OceanError, Result};
use ocean_compose::manifest::CompositionManifest;
use ocean_recipe::{BuildRecipe, RecipeCompiler};

struct FakeCompiler {
    fail_for: Option<&'static str>,
    calls: RefCell<Vec<(PathBuf, String)>>,
}

impl FakeCompiler {
    fn new() -> Self {
        Self {
            fail_for: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing_for(service_dir: &'static str) -> Self {
        Self {
            fail_for: Some(service_dir),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl RecipeCompiler for FakeCompiler {
    fn compile(&self, config: &Path, variant: &str) -> Result<BuildRecipe> {
        self.calls
            .borrow_mut()
            .push((config.to_path_buf(), variant.to_owned()));
        if let Some(dir) = self.fail_for {
            if config.components().any(|c| c.as_os_str() == dir) {
                return Err(OceanError::Compile {
                    path: config.to_path_buf(),
                    variant: variant.to_owned(),
                    message: "variant is not defined".into(),
                });
            }
        }
        Ok(BuildRecipe {
            content: format!("FROM node:20\n# variant {variant}\n").into_bytes(),
            lives_in: "/srv/service".into(),
        })
    }
}

fn config_with(variant: &str, services: &[(&str, ServiceSpec)]) -> OceanConfig {
    let services: BTreeMap<String, ServiceSpec> = services
        .iter()
        .map(|(name, spec)| ((*name).to_owned(), spec.clone()))
        .collect();
    let mut variants = BTreeMap::new();
    let _ = variants.insert(
        variant.to_owned(),
        VariantSpec {
            port: 0,
            services,
        },
    );
    OceanConfig {
        version: "1".into(),
        variants,
    }
}

fn api_service() -> ServiceSpec {
    ServiceSpec {
        path: String::new(),
        ports: vec!["8080".into()],
        command: String::new(),
        build_variant: String::new(),
    }
}

// ── Scenario A: dev variant ──────────────────────────────────────────

#[test]
fn dev_variant_writes_build_file_manifest_and_link() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_with("dev", &[("api", api_service())]);
    let compiler = FakeCompiler::new();

    let manifest = ocean_compose::generate(dir.path(), &config, "dev", &compiler).expect("generate");

    let dockerfile = std::fs::read_to_string(dir.path().join("Dockerfile-dev")).expect("dockerfile");
    assert!(dockerfile.contains("variant dev"));

    let on_disk =
        CompositionManifest::read(&dir.path().join("docker-compose-dev.yml")).expect("manifest");
    assert_eq!(on_disk, manifest);
    assert_eq!(on_disk.services.len(), 1);

    let entry = &on_disk.services["api-dev"];
    let build = entry.build.as_ref().expect("build reference");
    assert_eq!(build.context, ".");
    assert_eq!(build.dockerfile, "Dockerfile-dev");
    assert_eq!(entry.ports, vec!["8080"]);
    assert_eq!(entry.volumes, vec![".:/srv/service", "/srv/service/node_modules"]);
    assert!(entry.image.is_none());
    assert!(entry.command.is_none());

    let link = std::fs::read_link(dir.path().join("docker-compose.yml")).expect("link");
    assert_eq!(link, Path::new("docker-compose-dev.yml"));
}

// ── Scenario B: non-default variant ──────────────────────────────────

#[test]
fn test_variant_writes_manifest_without_link() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_with("test", &[("api", api_service())]);
    let compiler = FakeCompiler::new();

    let _ = ocean_compose::generate(dir.path(), &config, "test", &compiler).expect("generate");

    assert!(dir.path().join("docker-compose-test.yml").exists());
    assert!(dir.path().join("Dockerfile-test").exists());
    assert!(
        std::fs::symlink_metadata(dir.path().join("docker-compose.yml")).is_err(),
        "only the dev variant publishes docker-compose.yml"
    );
}

// ── Overrides ────────────────────────────────────────────────────────

#[test]
fn service_overrides_flow_into_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("worker")).expect("mkdir");
    let worker = ServiceSpec {
        path: "worker".into(),
        ports: Vec::new(),
        command: "npm run worker".into(),
        build_variant: "prod".into(),
    };
    let config = config_with("dev", &[("worker", worker)]);
    let compiler = FakeCompiler::new();

    let manifest = ocean_compose::generate(dir.path(), &config, "dev", &compiler).expect("generate");

    assert!(dir.path().join("worker").join("Dockerfile-prod").exists());
    let entry = &manifest.services["worker-dev"];
    let build = entry.build.as_ref().expect("build reference");
    assert_eq!(build.context, "./worker");
    assert_eq!(build.dockerfile, "Dockerfile-prod");
    assert_eq!(entry.command.as_deref(), Some("npm run worker"));
    assert_eq!(entry.volumes[0], "./worker:/srv/service");

    let calls = compiler.calls.borrow();
    assert_eq!(calls[0].1, "prod");
    assert!(calls[0].0.ends_with("worker/.pipeline/blubber.yaml"));
}

#[test]
fn unknown_variant_produces_empty_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_with("dev", &[("api", api_service())]);
    let compiler = FakeCompiler::new();

    let manifest =
        ocean_compose::generate(dir.path(), &config, "staging", &compiler).expect("generate");

    assert!(manifest.services.is_empty());
    assert!(compiler.calls.borrow().is_empty());
    assert!(dir.path().join("docker-compose-staging.yml").exists());
}

// ── Idempotence ──────────────────────────────────────────────────────

#[test]
fn regeneration_is_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in ["web", "api", "db"] {
        std::fs::create_dir_all(dir.path().join(name)).expect("mkdir");
    }
    let service = |path: &str| ServiceSpec {
        path: path.into(),
        ports: vec!["3000:3000".into()],
        ..ServiceSpec::default()
    };
    let config = config_with(
        "dev",
        &[("web", service("web")), ("api", service("api")), ("db", service("db"))],
    );
    let compiler = FakeCompiler::new();
    let manifest_path = dir.path().join("docker-compose-dev.yml");

    let _ = ocean_compose::generate(dir.path(), &config, "dev", &compiler).expect("first");
    let first = std::fs::read(&manifest_path).expect("read first");
    let _ = ocean_compose::generate(dir.path(), &config, "dev", &compiler).expect("second");
    let second = std::fs::read(&manifest_path).expect("read second");

    assert_eq!(first, second);
}

// ── Fault injection ──────────────────────────────────────────────────

#[test]
fn compile_failure_aborts_before_manifest_and_later_services() {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in ["a", "b", "c"] {
        std::fs::create_dir_all(dir.path().join(name)).expect("mkdir");
    }
    let service = |path: &str| ServiceSpec {
        path: path.into(),
        ..ServiceSpec::default()
    };
    let config = config_with(
        "dev",
        &[("a", service("a")), ("b", service("b")), ("c", service("c"))],
    );
    let compiler = FakeCompiler::failing_for("b");

    let err = ocean_compose::generate(dir.path(), &config, "dev", &compiler)
        .expect_err("generation should fail");

    assert!(matches!(err, OceanError::Compile { .. }));
    assert!(dir.path().join("a").join("Dockerfile-dev").exists());
    assert!(!dir.path().join("c").join("Dockerfile-dev").exists());
    assert!(!dir.path().join("docker-compose-dev.yml").exists());
    assert!(std::fs::symlink_metadata(dir.path().join("docker-compose.yml")).is_err());
    assert_eq!(compiler.calls.borrow().len(), 2);
}

#[test]
fn missing_service_directory_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_with(
        "dev",
        &[(
            "ghost",
            ServiceSpec {
                path: "ghost".into(),
                ..ServiceSpec::default()
            },
        )],
    );
    let compiler = FakeCompiler::new();

    let err = ocean_compose::generate(dir.path(), &config, "dev", &compiler)
        .expect_err("generation should fail");

    assert!(matches!(err, OceanError::Io { .. }));
    assert!(!dir.path().join("docker-compose-dev.yml").exists());
}
