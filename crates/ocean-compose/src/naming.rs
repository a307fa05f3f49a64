//! Artifact naming conventions.
//!
//! Pure functions only; nothing here touches the filesystem.

use ocean_common::config::ServiceSpec;
use ocean_common::constants::{BUILD_FILE_STEM, MANIFEST_EXTENSION, MANIFEST_STEM};

/// Suffix appended to names derived from `variant`.
#[must_use]
pub fn suffix_for(variant: &str) -> String {
    format!("-{variant}")
}

/// Composition manifest file name for `variant`, e.g. `docker-compose-dev.yml`.
#[must_use]
pub fn manifest_file_name(variant: &str) -> String {
    format!("{MANIFEST_STEM}{}{MANIFEST_EXTENSION}", suffix_for(variant))
}

/// Build file name for `build_variant`, e.g. `Dockerfile-dev`.
#[must_use]
pub fn build_file_name(build_variant: &str) -> String {
    format!("{BUILD_FILE_STEM}{}", suffix_for(build_variant))
}

/// Manifest key of `service` within `variant`, e.g. `api-dev`.
#[must_use]
pub fn service_key(service: &str, variant: &str) -> String {
    format!("{service}{}", suffix_for(variant))
}

/// Build-recipe variant compiled for `service` when running `variant`.
#[must_use]
pub fn effective_build_variant<'a>(service: &'a ServiceSpec, variant: &'a str) -> &'a str {
    if service.build_variant.is_empty() {
        variant
    } else {
        &service.build_variant
    }
}

/// Normalizes a configured service path into a `.`-rooted relative path.
///
/// `""` becomes `"."` and `"svc"` becomes `"./svc"`. An existing `./`
/// prefix or trailing `/` is not repeated.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_start_matches("./").trim_end_matches('/');
    if trimmed.is_empty() || trimmed == "." {
        ".".to_owned()
    } else {
        format!("./{trimmed}")
    }
}
