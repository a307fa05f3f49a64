//! Unified error types for the ocean workspace.
//!
//! Every failure is fatal: nothing is retried, and the CLI maps each
//! variant to a process exit code via [`OceanError::exit_code`].

use std::path::PathBuf;

use thiserror::Error;

use crate::constants::{CONFIG_EXIT_CODE, FAILURE_EXIT_CODE};

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum OceanError {
    /// A configuration file is missing, unreadable, or malformed.
    #[error("failed to read configuration {path}: {message}")]
    Config {
        /// Configuration file that could not be decoded.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// A build recipe could not be compiled.
    #[error("failed to compile build recipe {path} for variant \"{variant}\": {message}")]
    Compile {
        /// Build configuration that was being compiled.
        path: PathBuf,
        /// Build variant that was requested.
        variant: String,
        /// Description of the failure.
        message: String,
    },

    /// An I/O operation on a generated artifact failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An external program could not be located or exited unsuccessfully.
    #[error("failed to execute {program}: {message}")]
    Exec {
        /// Program that was being executed.
        program: String,
        /// Description of the failure.
        message: String,
    },

    /// A generated artifact could not be serialized.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_yaml::Error,
    },
}

impl OceanError {
    /// Builds an [`OceanError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code reported when this error terminates the run.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => CONFIG_EXIT_CODE,
            _ => FAILURE_EXIT_CODE,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, OceanError>;
