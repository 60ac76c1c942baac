//! Error handling and display for the CLI.

use azrm_id::IdError;
use azrm_sdk::{FilterError, SkuError};
use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown resource ID type {0:?}")]
    UnknownType(String),

    #[error("{0:?} does not match any known resource ID type")]
    Unidentified(String),

    #[error("Invalid segment assignment {0:?}, expected NAME=VALUE")]
    InvalidAssignment(String),

    #[error("{id_type} has no segment named {segment:?}")]
    UnknownSegment { id_type: String, segment: String },

    #[error("No value given for segment {segment:?} of {id_type}")]
    MissingSegment { id_type: String, segment: String },

    #[error("Validation failed with {0} error(s)")]
    ValidationFailed(usize),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    // Check for specific error types and provide hints
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::UnknownType(_) | CliError::Unidentified(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: Run `azrm ids list` to see the known types.".yellow()
                );
            }
            CliError::UnknownSegment { .. } | CliError::MissingSegment { .. } => {
                eprintln!(
                    "\n{}",
                    "Hint: Run `azrm ids list` to see each type's segments.".yellow()
                );
            }
            _ => {}
        }
    } else if let Some(id_err) = err.downcast_ref::<IdError>() {
        if id_err.is_unexpected_segment() {
            eprintln!(
                "\n{}",
                "Hint: Pass --insensitive to accept IDs with non-canonical casing.".yellow()
            );
        }
    } else if let Some(SkuError::UnknownTier { .. }) = err.downcast_ref::<SkuError>() {
        eprintln!(
            "\n{}",
            "Hint: Omit the tier to use the default `Standard` tier.".yellow()
        );
    } else if let Some(FilterError::TooManyValues { .. }) = err.downcast_ref::<FilterError>() {
        eprintln!(
            "\n{}",
            "Hint: Remove filter values or split them across several subscriptions.".yellow()
        );
    }
}
