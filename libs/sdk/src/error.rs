//! SDK error types.

use std::fmt;

use azrm_id::ResourceId;
use thiserror::Error;

/// Errors from parsing a DataBox Edge SKU string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SkuError {
    #[error("SKU name cannot be empty")]
    Empty,

    #[error("SKU {input:?} has an empty name before the tier")]
    MissingName { input: String },

    #[error("SKU {input:?} has an empty tier after '-'")]
    MissingTier { input: String },

    #[error("SKU {input:?} has unknown tier {tier:?}, expected one of: {expected}")]
    UnknownTier {
        input: String,
        tier: String,
        expected: String,
    },
}

/// Errors from checking EventGrid subscription filters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The filters carry more values than one subscription allows.
    #[error(
        "the total number of advanced filter values allowed on a single event subscription is {max}, but {count} are configured"
    )]
    TooManyValues { count: usize, max: usize },
}

/// Errors surfaced by SDK operations.
#[derive(Debug, Error)]
pub enum SdkError {
    /// The service rejected an operation on a resource.
    #[error("{operation} {id}: {message}")]
    Upstream {
        operation: String,
        /// The resource's human-readable description.
        id: String,
        message: String,
    },

    #[error(transparent)]
    Sku(#[from] SkuError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl SdkError {
    /// Wraps a service error with the operation and the resource it targeted.
    pub fn upstream<T: ResourceId>(
        operation: impl Into<String>,
        id: &T,
        err: impl fmt::Display,
    ) -> Self {
        Self::Upstream {
            operation: operation.into(),
            id: id.describe(),
            message: err.to_string(),
        }
    }

    /// Returns true for errors reported by the service.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}
