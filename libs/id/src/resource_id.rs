//! The trait implemented by every typed resource ID.

use crate::error::IdError;
use crate::spec::{ParseMode, ParseResult, ResourceIdSpec};

/// A strongly-typed resource ID.
///
/// Implementations are normally generated by [`crate::define_resource_id!`];
/// only `spec`, `from_parse_result` and `segment_values` vary per type.
pub trait ResourceId: Sized {
    /// Returns the segment table for this type.
    fn spec() -> &'static ResourceIdSpec;

    /// Builds the typed ID from values captured by [`ResourceIdSpec::parse`].
    fn from_parse_result(parsed: ParseResult) -> Result<Self, IdError>;

    /// Returns the value of each named segment, in segment order.
    fn segment_values(&self) -> Vec<&str>;

    /// Returns the canonical ID string.
    fn id(&self) -> String {
        Self::spec().format(&self.segment_values())
    }

    /// Returns the human-readable description used in error messages.
    fn describe(&self) -> String {
        Self::spec().describe(&self.segment_values())
    }

    /// Parses an ID, matching literal segments case-sensitively.
    fn parse(input: &str) -> Result<Self, IdError> {
        Self::parse_with(input, ParseMode::Strict)
    }

    /// Parses an ID, matching literal segments regardless of case.
    ///
    /// Values keep the casing they had in the input.
    fn parse_insensitively(input: &str) -> Result<Self, IdError> {
        Self::parse_with(input, ParseMode::Insensitive)
    }

    /// Parses an ID using the given mode.
    fn parse_with(input: &str, mode: ParseMode) -> Result<Self, IdError> {
        let parsed = Self::spec().parse_with(input, mode)?;
        Self::from_parse_result(parsed)
    }
}
