//! Core error types for schedule-builder-core.
//!
//! The grid model and the selection engine never fail; errors come from the
//! people store, its validation rules and configuration I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for schedule-builder-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// People store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the data directory
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not name a configuration field
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Input rejected before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Entity name is blank
    #[error("Name must not be empty")]
    EmptyName,

    /// A required attribute has no value
    #[error("Missing required attribute '{name}'")]
    MissingRequiredAttribute { name: String },

    /// Value not among the attribute's allowed values
    #[error("Invalid value '{value}' for '{name}' (allowed: {})", .allowed.join(", "))]
    DisallowedAttributeValue {
        name: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors from people store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("No entity with id '{0}'")]
    UnknownEntity(String),

    #[error("Entity id '{0}' appears more than once")]
    DuplicateEntity(String),

    #[error("Entity '{0}' is not a student")]
    NotAStudent(String),

    #[error("No educator with id '{0}'")]
    UnknownEducator(String),

    #[error("No entity is selected")]
    NothingSelected,

    #[error("Attribute key '{key}' is already used")]
    DuplicateAttributeKey { key: String },

    #[error("Attribute key must not be empty")]
    EmptyAttributeKey,

    #[error("Attribute index {index} out of bounds (length: {len})")]
    AttributeIndexOutOfBounds { index: usize, len: usize },

    #[error("Required attribute '{0}' already exists")]
    DuplicateRequiredAttribute(String),

    #[error("No required attribute named '{0}'")]
    UnknownRequiredAttribute(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
