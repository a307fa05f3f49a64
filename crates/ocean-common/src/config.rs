//! Declarative service/variant description and package metadata.
//!
//! Decoding only: no policy lives here. Every optional field falls back to
//! an empty value so downstream code never has to handle absence.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{OceanError, Result};

/// Root of `.ocean/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OceanConfig {
    /// Schema version declared by the file.
    #[serde(alias = "Version")]
    pub version: String,
    /// Variants keyed by name.
    #[serde(alias = "Variants")]
    pub variants: BTreeMap<String, VariantSpec>,
}

/// One named configuration profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VariantSpec {
    /// Port published by the single-service flow; `0` publishes nothing.
    #[serde(alias = "Port")]
    pub port: u16,
    /// Services keyed by name.
    #[serde(alias = "Services")]
    pub services: BTreeMap<String, ServiceSpec>,
}

/// One deployable unit within a variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceSpec {
    /// Build context relative to the project root; empty means `.`.
    #[serde(deserialize_with = "null_as_empty")]
    pub path: String,
    /// Port mappings passed through verbatim.
    #[serde(deserialize_with = "port_strings")]
    pub ports: Vec<String>,
    /// Runtime command override; empty keeps the image default.
    #[serde(deserialize_with = "null_as_empty")]
    pub command: String,
    /// Build-recipe variant override; empty uses the outer variant.
    #[serde(alias = "buildVariantOverride", deserialize_with = "null_as_empty")]
    pub build_variant: String,
}

impl OceanConfig {
    /// Services declared by `variant`, in name order.
    ///
    /// An unknown variant yields no services.
    pub fn services(&self, variant: &str) -> Vec<(&str, &ServiceSpec)> {
        self.variants.get(variant).map_or_else(Vec::new, |v| {
            v.services
                .iter()
                .map(|(name, spec)| (name.as_str(), spec))
                .collect()
        })
    }

    /// Port published by `variant` in the single-service flow.
    pub fn port(&self, variant: &str) -> Option<u16> {
        self.variants
            .get(variant)
            .map(|v| v.port)
            .filter(|&p| p != 0)
    }
}

/// Node-style `package.json`; only the name is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PackageJson {
    /// Package name used to derive image tags.
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Text(String),
    Number(u64),
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn port_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<PortValue>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(|p| match p {
            PortValue::Text(s) => s,
            PortValue::Number(n) => n.to_string(),
        })
        .collect())
}

/// Reads and decodes the ocean configuration.
///
/// `.yaml`/`.yml` files are decoded as YAML, everything else as JSON.
///
/// # Errors
///
/// Returns [`OceanError::Config`] if the file is absent or malformed.
pub fn load_ocean_config(path: &Path) -> Result<OceanConfig> {
    tracing::debug!(path = %path.display(), "loading ocean config");
    let data = read_config(path)?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&data).map_err(|e| config_error(path, e))
    } else {
        serde_json::from_str(&data).map_err(|e| config_error(path, e))
    }
}

/// Like [`load_ocean_config`], but an absent file yields an empty config.
///
/// # Errors
///
/// Returns [`OceanError::Config`] if the file exists but is malformed.
pub fn load_optional_ocean_config(path: &Path) -> Result<OceanConfig> {
    if path.exists() {
        load_ocean_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no ocean config, using defaults");
        Ok(OceanConfig::default())
    }
}

/// Reads `package.json` and checks that it names the package.
///
/// # Errors
///
/// Returns [`OceanError::Config`] if the file is absent, malformed, or has
/// no `name` field.
pub fn load_package_json(path: &Path) -> Result<PackageJson> {
    let data = read_config(path)?;
    let pkg: PackageJson = serde_json::from_str(&data).map_err(|e| config_error(path, e))?;
    if pkg.name.is_empty() {
        return Err(OceanError::Config {
            path: path.to_path_buf(),
            message: "missing a name field".into(),
        });
    }
    Ok(pkg)
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| config_error(path, e))
}

fn config_error(path: &Path, err: impl std::fmt::Display) -> OceanError {
    OceanError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
