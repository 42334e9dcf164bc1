//! Error types for launcher construction and operation.
//!
//! Platform and missing-binary problems never show up here: they are logged
//! and the host keeps running. What remains are failures the host loader or
//! a developer must see.

use onlyfans_core::{ConfigError, ProcessError, SettingsError};
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or driving the backend launcher.
#[derive(Debug, Error)]
pub enum LauncherError {
    // === Debug configuration ===
    /// Debug port requested but the variable is not set.
    #[error("Debug port variable {var} is not set")]
    DebugPortMissing { var: String },

    /// Debug port variable is not a valid port number.
    #[error("Debug port variable {var}='{value}' is not a valid port: {source}")]
    DebugPortInvalid {
        var: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    // === Filesystem ===
    /// The executable bit could not be read or set.
    #[error("Failed to make backend executable at {path}: {source}")]
    Permission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Collaborators ===
    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for launcher operations
pub type LauncherResult<T> = Result<T, LauncherError>;
