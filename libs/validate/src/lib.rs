//! # azrm-validate
//!
//! Validation functions for configuration attributes.
//!
//! Every validator has the shape of [`ValidateFunc`]: it receives the raw
//! attribute value and its key, and returns warnings and errors instead of
//! failing fast. [`SchemaValidator`] runs a set of them over a whole
//! attribute map.

mod error;
mod schema;

use azrm_id::ResourceId;
use azrm_sdk::parse_device_sku_name;
use serde_json::Value;
use tracing::debug;

pub use error::ValidationError;
pub use schema::{Diagnostics, SchemaValidator};

/// A validator over one attribute: `(value, key) -> (warnings, errors)`.
pub type ValidateFunc = fn(&Value, &str) -> (Vec<String>, Vec<ValidationError>);

/// Shortest allowed DataBox Edge device name.
pub const DEVICE_NAME_MIN_LENGTH: usize = 2;

/// Longest allowed DataBox Edge device name.
pub const DEVICE_NAME_MAX_LENGTH: usize = 50;

/// Validates that the value is a resource ID of type `T`.
///
/// Literal segments must match exactly, e.g. `resourceGroups` and not
/// `resourcegroups`.
pub fn resource_id<T: ResourceId>(
    value: &Value,
    key: &str,
) -> (Vec<String>, Vec<ValidationError>) {
    check_resource_id::<T>(value, key, azrm_id::ParseMode::Strict)
}

/// Validates that the value is a resource ID of type `T`, ignoring the
/// casing of literal segments.
pub fn resource_id_insensitively<T: ResourceId>(
    value: &Value,
    key: &str,
) -> (Vec<String>, Vec<ValidationError>) {
    check_resource_id::<T>(value, key, azrm_id::ParseMode::Insensitive)
}

fn check_resource_id<T: ResourceId>(
    value: &Value,
    key: &str,
    mode: azrm_id::ParseMode,
) -> (Vec<String>, Vec<ValidationError>) {
    let input = match as_str(value, key) {
        Ok(input) => input,
        Err(err) => return (Vec::new(), vec![err]),
    };

    match T::parse_with(input, mode) {
        Ok(_) => (Vec::new(), Vec::new()),
        Err(source) => {
            debug!(key, error = %source, "Resource ID failed validation");
            (
                Vec::new(),
                vec![ValidationError::InvalidResourceId {
                    key: key.to_string(),
                    source,
                }],
            )
        }
    }
}

/// Validates a DataBox Edge device name.
///
/// Names are 2 to 50 characters of letters, digits and `-`, and must start
/// and end with a letter or digit.
pub fn data_box_edge_device_name(value: &Value, key: &str) -> (Vec<String>, Vec<ValidationError>) {
    let name = match as_str(value, key) {
        Ok(name) => name,
        Err(err) => return (Vec::new(), vec![err]),
    };

    let reason = if !(DEVICE_NAME_MIN_LENGTH..=DEVICE_NAME_MAX_LENGTH).contains(&name.len()) {
        Some(format!(
            "must be between {DEVICE_NAME_MIN_LENGTH} and {DEVICE_NAME_MAX_LENGTH} characters"
        ))
    } else if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Some("may only contain letters, digits and hyphens".to_string())
    } else if name.starts_with('-') || name.ends_with('-') {
        Some("must start and end with a letter or digit".to_string())
    } else {
        None
    };

    match reason {
        None => (Vec::new(), Vec::new()),
        Some(reason) => (
            Vec::new(),
            vec![ValidationError::InvalidName {
                key: key.to_string(),
                value: name.to_string(),
                reason,
            }],
        ),
    }
}

/// Validates a DataBox Edge SKU such as `EdgeP_Base-Standard`.
///
/// Unrecognised SKU names produce a warning, since new hardware ships before
/// clients learn about it. Malformed SKUs and unknown tiers are errors.
pub fn data_box_edge_sku_name(value: &Value, key: &str) -> (Vec<String>, Vec<ValidationError>) {
    let input = match as_str(value, key) {
        Ok(input) => input,
        Err(err) => return (Vec::new(), vec![err]),
    };

    match parse_device_sku_name(input) {
        Ok(sku) if sku.name.is_known() => (Vec::new(), Vec::new()),
        Ok(sku) => (
            vec![format!(
                "{key}: SKU name {:?} is not a known DataBox Edge SKU; known names are: {}",
                sku.name.as_str(),
                azrm_sdk::SkuName::possible_values().join(", ")
            )],
            Vec::new(),
        ),
        Err(source) => (
            Vec::new(),
            vec![ValidationError::InvalidSku {
                key: key.to_string(),
                source,
            }],
        ),
    }
}

fn as_str<'a>(value: &'a Value, key: &str) -> Result<&'a str, ValidationError> {
    value.as_str().ok_or_else(|| ValidationError::NotAString {
        key: key.to_string(),
        actual: json_type(value),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
