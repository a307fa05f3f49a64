//! Read-only view of a blubber build configuration.
//!
//! Only the parts ocean needs are decoded: which variants exist, how they
//! include each other, and where the application lives inside the image.
//! Everything else is left to the compiler.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use ocean_common::constants::DEFAULT_LIVES_IN;
use ocean_common::error::{OceanError, Result};

/// Subset of a blubber config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlubberConfig {
    /// Config schema version (e.g. `v4`).
    pub version: String,
    /// Top-level defaults.
    pub lives: Lives,
    /// Named variants.
    pub variants: BTreeMap<String, VariantConfig>,
}

/// The `lives` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Lives {
    /// In-container application directory.
    #[serde(rename = "in")]
    pub dir: Option<String>,
}

/// A named variant.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VariantConfig {
    /// Variants merged underneath this one, in order.
    pub includes: Vec<String>,
    /// Variant-level override of the top-level `lives` block.
    pub lives: Lives,
}

impl BlubberConfig {
    /// Parses a blubber config from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`OceanError::Compile`] if the text is not a valid config.
    pub fn parse(path: &Path, variant: &str, yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| compile_error(path, variant, e.to_string()))
    }

    /// Reads and parses the blubber config at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`OceanError::Compile`] if the file cannot be read or parsed.
    pub fn load(path: &Path, variant: &str) -> Result<Self> {
        tracing::debug!(path = %path.display(), "reading build config");
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| compile_error(path, variant, e.to_string()))?;
        Self::parse(path, variant, &yaml)
    }

    /// Resolves the in-container application directory for `variant`.
    ///
    /// Lookup order: the variant itself, then its includes (later includes
    /// win), then the top-level `lives.in`, then [`DEFAULT_LIVES_IN`].
    ///
    /// # Errors
    ///
    /// Returns [`OceanError::Compile`] if `variant` (or anything it
    /// includes) is undefined, or if includes form a cycle.
    pub fn lives_in(&self, path: &Path, variant: &str) -> Result<String> {
        let mut chain = Vec::new();
        let found = self
            .variant_lives_in(variant, &mut chain)
            .map_err(|message| compile_error(path, variant, message))?;

        Ok(found
            .or(self.lives.dir.as_deref())
            .unwrap_or(DEFAULT_LIVES_IN)
            .to_owned())
    }

    fn variant_lives_in<'a>(
        &'a self,
        name: &'a str,
        chain: &mut Vec<&'a str>,
    ) -> std::result::Result<Option<&'a str>, String> {
        if chain.contains(&name) {
            chain.push(name);
            return Err(format!("variant includes form a cycle: {}", chain.join(" -> ")));
        }
        let Some(variant) = self.variants.get(name) else {
            return Err(match chain.last() {
                Some(parent) => format!("variant \"{parent}\" includes undefined variant \"{name}\""),
                None => format!("variant \"{name}\" is not defined"),
            });
        };

        chain.push(name);
        let mut found = variant.lives.dir.as_deref();
        for include in variant.includes.iter().rev() {
            let inherited = self.variant_lives_in(include, chain)?;
            if found.is_none() {
                found = inherited;
            }
        }
        let _ = chain.pop();
        Ok(found)
    }
}

fn compile_error(path: &Path, variant: &str, message: String) -> OceanError {
    OceanError::Compile {
        path: path.to_path_buf(),
        variant: variant.to_owned(),
        message,
    }
}
