//! Composition manifest model.
//!
//! Mirrors the subset of the docker-compose file format that ocean
//! generates. Services are kept in a `BTreeMap` so the serialized output
//! is byte-stable across runs.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use ocean_common::constants::MANIFEST_VERSION;
use ocean_common::error::{OceanError, Result};

/// A generated docker-compose document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionManifest {
    /// Compose file format version.
    pub version: String,
    /// Entries keyed by `<service>-<variant>`.
    #[serde(default)]
    pub services: BTreeMap<String, ServiceEntry>,
}

/// One service of the manifest.
///
/// Exactly one of `image` or `build` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Pre-built image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Build context and build file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildReference>,
    /// Port mappings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    /// Volume mounts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,
    /// Command override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

/// The `build` block of a service entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReference {
    /// Build file name relative to `context`.
    pub dockerfile: String,
    /// Build context directory.
    pub context: String,
}

impl CompositionManifest {
    /// Creates an empty manifest at the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION.to_owned(),
            services: BTreeMap::new(),
        }
    }

    /// Serializes the manifest as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Parses a manifest from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if `yaml` is not a valid manifest.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads a manifest from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| OceanError::io(path, e))?;
        Self::from_yaml(&yaml)
    }

    /// Writes the manifest to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| OceanError::io(path, e))?;
        tracing::info!(path = %path.display(), services = self.services.len(), "wrote manifest");
        Ok(())
    }
}

impl Default for CompositionManifest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ServiceEntry {
        ServiceEntry {
            build: Some(BuildReference {
                dockerfile: "Dockerfile-dev".into(),
                context: ".".into(),
            }),
            ports: vec!["8080".into()],
            volumes: vec![".:/srv/app".into(), "/srv/app/node_modules".into()],
            ..ServiceEntry::default()
        }
    }

    #[test]
    fn yaml_omits_unset_fields() {
        let mut manifest = CompositionManifest::new();
        let _ = manifest.services.insert("api-dev".into(), entry());

        let yaml = manifest.to_yaml().expect("yaml");
        assert!(yaml.contains("version: '3'") || yaml.contains("version: \"3\""));
        assert!(yaml.contains("api-dev:"));
        assert!(yaml.contains("dockerfile: Dockerfile-dev"));
        assert!(!yaml.contains("image:"));
        assert!(!yaml.contains("command:"));
    }

    #[test]
    fn services_serialize_in_key_order() {
        let mut manifest = CompositionManifest::new();
        let _ = manifest.services.insert("web-dev".into(), entry());
        let _ = manifest.services.insert("api-dev".into(), entry());

        let yaml = manifest.to_yaml().expect("yaml");
        let api = yaml.find("api-dev").expect("api");
        let web = yaml.find("web-dev").expect("web");
        assert!(api < web);
    }

    #[test]
    fn write_then_read_preserves_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("docker-compose-dev.yml");
        let mut manifest = CompositionManifest::new();
        let mut with_command = entry();
        with_command.command = Some("npm run watch".into());
        let _ = manifest.services.insert("api-dev".into(), with_command);

        manifest.write(&path).expect("write");
        let loaded = CompositionManifest::read(&path).expect("read");
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn write_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("docker-compose-dev.yml");
        let err = CompositionManifest::new().write(&path).expect_err("should fail");
        assert!(matches!(err, OceanError::Io { .. }));
    }
}
