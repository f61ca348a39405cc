//! # Configuration Metadata Errors
//!
//! Fatal error taxonomy for the configuration metadata engine.
//!
//! - Uses `thiserror` for structured error definitions
//! - Every variant carries named fields so callers can match on context
//! - Validation findings are *not* errors; they are reported as data by the
//!   `metadata` crate

use thiserror::Error;

/// Group scanning errors.
///
/// Any of these aborts the whole scan: a malformed declaration would
/// otherwise corrupt the catalog silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("Invalid group prefix {prefix:?} in declaration #{index}")]
    InvalidPrefix { index: usize, prefix: String },

    #[error("Group {prefix} declares no fields")]
    EmptyGroup { prefix: String },

    #[error("Invalid field name {name:?} in group {prefix}")]
    InvalidField { prefix: String, name: String },

    #[error("Unsupported type {declared_type:?} for property {path}")]
    UnsupportedType { path: String, declared_type: String },

    #[error("Default value {value:?} for property {path} is not a valid {expected}")]
    InvalidDefault {
        path: String,
        value: String,
        expected: String
    }
}

impl ScanError {
    /// Short machine-readable kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::InvalidPrefix { .. } => "invalid-prefix",
            ScanError::EmptyGroup { .. } => "empty-group",
            ScanError::InvalidField { .. } => "invalid-field",
            ScanError::UnsupportedType { .. } => "unsupported-type",
            ScanError::InvalidDefault { .. } => "invalid-default"
        }
    }
}

/// Catalog construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Duplicate property path: {path}")]
    DuplicatePath { path: String }
}

impl CatalogError {
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::DuplicatePath { .. } => "duplicate-path"
        }
    }
}

/// Errors raised while reading declaration or bound-value documents.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse {format} document {path}: {reason}")]
    Parse {
        format: String,
        path: String,
        reason: String
    },

    #[error("File has no extension: {path}")]
    NoExtension { path: String },

    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid declaration document {path}: {reason}")]
    InvalidDocument { path: String, reason: String }
}

/// Umbrella error for pipelines that load, scan and build in one call.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Load(#[from] LoadError)
}
