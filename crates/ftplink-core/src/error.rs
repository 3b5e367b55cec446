//! Error types for endpoint construction
//!
//! Every failure aborts `build_endpoint`; nothing here is retried.

use thiserror::Error;

/// Result type for endpoint construction
pub type EndpointResult<T> = std::result::Result<T, EndpointError>;

#[derive(Error, Debug)]
pub enum EndpointError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Reference resolution error: {0}")]
    ReferenceResolution(#[from] ReferenceResolutionError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Failures raised by external collaborators (custom appliers, registries)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EndpointError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_reference_resolution(&self) -> bool {
        matches!(self, Self::ReferenceResolution(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("invalid endpoint uri '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("endpoint uri '{0}' has no host")]
    MissingHost(String),
    #[error("cannot convert '{value}' to {expected}")]
    InvalidValue {
        value: String,
        expected: &'static str,
    },
    #[error("invalid value for option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid component settings: {0}")]
    InvalidSettings(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceResolutionError {
    #[error("no object bound under name '{name}'")]
    NotFound { name: String },
    #[error("object bound under name '{name}' is not of type {expected}")]
    WrongType {
        name: String,
        expected: &'static str,
    },
}
