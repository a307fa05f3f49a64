//! # ocean-compose
//!
//! Resolves a variant of the ocean config into on-disk composition
//! artifacts.
//!
//! Handles:
//! - **Naming**: Deterministic build-file, manifest, and service-key names.
//! - **Manifest**: The docker-compose document model and its serialization.
//! - **Generator**: Compiling every service of a variant, writing build
//!   files, and assembling the manifest.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod generator;
pub mod manifest;
pub mod naming;

pub use generator::generate;
pub use manifest::CompositionManifest;
