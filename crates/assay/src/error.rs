//! Error types for the Assay library.

use std::path::PathBuf;
use thiserror::Error;

use crate::engine::EngineKind;

/// Main error type for Assay operations.
#[derive(Debug, Error)]
pub enum AssayError {
    /// The engine descriptor does not name a registered engine type.
    #[error("Cannot resolve engine '{class_name}' in module '{module_name}'")]
    Resolution {
        module_name: String,
        class_name: String,
    },

    /// The batch data does not have the representation the engine requires.
    #[error("{engine} ({kind}) requires {expected} for its batch, found {found}")]
    TypeMismatch {
        engine: String,
        kind: EngineKind,
        expected: &'static str,
        found: &'static str,
    },

    /// An engine type that declares no capability at all.
    #[error("Engine '{class_name}' does not declare any supported capability")]
    Unsupported { class_name: String },

    /// A relational batch reference that cannot produce init options.
    #[error("Invalid batch reference: {0}")]
    InvalidReference(String),

    /// An initialization option with an unusable value.
    #[error("Invalid option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    /// A malformed engine descriptor.
    #[error("Invalid engine descriptor: {0}")]
    InvalidDescriptor(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Empty input or no data rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AssayError {
    /// Whether this is a failure to resolve an engine type.
    pub fn is_resolution(&self) -> bool {
        matches!(self, AssayError::Resolution { .. })
    }

    /// Whether this is a batch/engine representation mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, AssayError::TypeMismatch { .. })
    }
}

/// Result type alias for Assay operations.
pub type Result<T> = std::result::Result<T, AssayError>;
