//! Error types and Result alias for pingdeck

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pingdeck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pingdeck
#[derive(Debug, Error)]
pub enum Error {
    // === Validation errors ===
    /// No usable probe target was entered; caught before any process is spawned
    #[error("no target entered - type a host name or address first")]
    EmptyTarget,

    // === Execution errors ===
    /// The child process could not be created
    #[error("failed to start '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },

    /// The merged output stream failed mid-run
    #[error("output stream lost: {reason}")]
    StreamRead { reason: String },

    /// A termination signal could not be delivered to the child
    #[error("failed to signal process {pid}: {reason}")]
    SignalSendFailed { pid: u32, reason: String },

    // === Configuration errors ===
    /// Failed to read a configuration file
    #[error("failed to load config from '{path}': {reason}")]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Configuration value rejected by validation
    #[error("configuration validation failed for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    // === I/O and parsing errors ===
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
