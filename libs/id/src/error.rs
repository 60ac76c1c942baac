//! Error types for resource ID parsing and registration.

use thiserror::Error;

/// Errors that can occur when parsing a resource ID.
///
/// Every variant carries the ID type being parsed and the raw input so the
/// message is useful on its own when surfaced from a plan or apply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// A required segment was missing or empty.
    #[error(
        "parsing {input:?} as {id_type}: the segment `{segment}` was not found, \
         expected an ID in the format {expected:?}"
    )]
    SegmentNotSpecified {
        id_type: &'static str,
        segment: &'static str,
        expected: String,
        input: String,
    },

    /// A fixed segment did not hold the expected literal.
    #[error(
        "parsing {input:?} as {id_type}: expected the segment `{segment}` to be {expected:?} \
         but got {actual:?}"
    )]
    UnexpectedSegment {
        id_type: &'static str,
        segment: &'static str,
        expected: &'static str,
        actual: String,
        input: String,
    },

    /// A segment was present but its value is not acceptable.
    #[error("parsing {input:?} as {id_type}: the segment `{segment}` is invalid: {reason}")]
    InvalidSegmentValue {
        id_type: &'static str,
        segment: &'static str,
        reason: String,
        input: String,
    },

    /// The input continued past the last declared segment.
    #[error("parsing {input:?} as {id_type}: unexpected trailing segments {extra:?}")]
    TrailingSegments {
        id_type: &'static str,
        extra: String,
        input: String,
    },
}

impl IdError {
    /// Returns the raw input that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            IdError::SegmentNotSpecified { input, .. }
            | IdError::UnexpectedSegment { input, .. }
            | IdError::InvalidSegmentValue { input, .. }
            | IdError::TrailingSegments { input, .. } => input,
        }
    }

    /// Returns the name of the offending segment, if the error is tied to one.
    pub fn segment(&self) -> Option<&'static str> {
        match self {
            IdError::SegmentNotSpecified { segment, .. }
            | IdError::UnexpectedSegment { segment, .. }
            | IdError::InvalidSegmentValue { segment, .. } => Some(*segment),
            IdError::TrailingSegments { .. } => None,
        }
    }

    /// Returns true if a segment was missing or empty.
    pub fn is_missing_segment(&self) -> bool {
        matches!(self, IdError::SegmentNotSpecified { .. })
    }

    /// Returns true if a fixed segment did not match.
    pub fn is_unexpected_segment(&self) -> bool {
        matches!(self, IdError::UnexpectedSegment { .. })
    }
}

/// Errors raised while building a [`crate::ResourceIdRegistry`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A spec with the same type name is already registered.
    #[error("resource ID type {0:?} is already registered")]
    DuplicateType(String),

    /// The spec declares more than one scope segment.
    #[error("resource ID type {0:?} declares more than one scope segment")]
    MultipleScopes(String),
}
