//! Error types for battray-core.
//!
//! Classification and gating never fail; the only fallible concerns are
//! configuration persistence and icon rendering, and a render failure is
//! non-fatal to the evaluation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration directory cannot be determined or created.
    #[error("Cannot access configuration directory: {0}")]
    NoConfigDir(#[source] std::io::Error),

    /// Failed to read the configuration file.
    #[error("Failed to read configuration from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the configuration file.
    #[error("Failed to write configuration to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(#[from] toml::de::Error),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    /// Unknown dot-path key passed to `get`/`set`.
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Serialization/deserialization errors from the dot-path machinery.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A display sink failed to accept an icon update.
///
/// Transient by design: the monitor retries a bounded number of times and
/// then records the final error as a diagnostics flag instead of aborting
/// the evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("icon render failed: {0}")]
pub struct RenderError(pub String);

/// Result type alias for ConfigError
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
