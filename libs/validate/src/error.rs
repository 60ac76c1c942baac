//! Validation error types.

use azrm_id::IdError;
use azrm_sdk::SkuError;
use thiserror::Error;

/// A validation failure for one attribute.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The attribute must be a string.
    #[error("expected {key} to be a string, got {actual}")]
    NotAString { key: String, actual: &'static str },

    #[error("{key}: {source}")]
    InvalidResourceId {
        key: String,
        #[source]
        source: IdError,
    },

    #[error("{key}: {value:?} {reason}")]
    InvalidName {
        key: String,
        value: String,
        reason: String,
    },

    #[error("{key}: {source}")]
    InvalidSku {
        key: String,
        #[source]
        source: SkuError,
    },

    /// A required attribute was not set.
    #[error("{key} is required")]
    Required { key: String },
}

impl ValidationError {
    /// Returns the attribute key this error concerns.
    pub fn key(&self) -> &str {
        match self {
            ValidationError::NotAString { key, .. }
            | ValidationError::InvalidResourceId { key, .. }
            | ValidationError::InvalidName { key, .. }
            | ValidationError::InvalidSku { key, .. }
            | ValidationError::Required { key } => key,
        }
    }
}
