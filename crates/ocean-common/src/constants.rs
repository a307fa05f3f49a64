//! File-naming conventions and default values.

/// Default location of the ocean service/variant description.
pub const DEFAULT_CONFIG_PATH: &str = ".ocean/config.json";

/// Package metadata file read by the single-service flow.
pub const DEFAULT_PACKAGE_PATH: &str = "package.json";

/// Variant selected when none is given on the command line.
pub const DEFAULT_VARIANT: &str = "dev";

/// The variant whose manifest is also published as `docker-compose.yml`.
pub const PUBLISHED_VARIANT: &str = "dev";

/// Build configuration location relative to a service directory.
pub const BUILD_CONFIG_PATH: &str = ".pipeline/blubber.yaml";

/// Default build-recipe compiler binary.
pub const DEFAULT_COMPILER: &str = "blubber";

/// In-container working directory used when the build config declares none.
pub const DEFAULT_LIVES_IN: &str = "/srv/app";

/// Host dependency directory shadowed inside the container.
pub const DEPENDENCY_DIR: &str = "node_modules";

/// Stem of every build file name.
pub const BUILD_FILE_STEM: &str = "Dockerfile";

/// Stem of every composition manifest name.
pub const MANIFEST_STEM: &str = "docker-compose";

/// Extension of composition manifests.
pub const MANIFEST_EXTENSION: &str = ".yml";

/// Unqualified manifest name the orchestrator picks up by default.
pub const DEFAULT_MANIFEST_LINK: &str = "docker-compose.yml";

/// Format version written into every composition manifest.
pub const MANIFEST_VERSION: &str = "3";

/// Composition orchestrator binary.
pub const ORCHESTRATOR_BIN: &str = "docker-compose";

/// Container runtime binary.
pub const RUNTIME_BIN: &str = "docker";

/// Exit code used for configuration failures.
pub const CONFIG_EXIT_CODE: i32 = 6;

/// Exit code used for every other failure.
pub const FAILURE_EXIT_CODE: i32 = 1;
