//! Runs validators over a map of attributes.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ValidationError;
use crate::ValidateFunc;

/// Warnings and errors collected from a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
    pub errors: Vec<ValidationError>,
}

impl Diagnostics {
    /// Returns true if no errors were collected.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn extend(&mut self, (warnings, errors): (Vec<String>, Vec<ValidationError>)) {
        self.warnings.extend(warnings);
        self.errors.extend(errors);
    }
}

#[derive(Debug, Clone)]
struct Attribute {
    required: bool,
    checks: Vec<ValidateFunc>,
}

/// Validators for a set of attributes, keyed by attribute name.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    attributes: BTreeMap<String, Attribute>,
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an optional attribute. Its checks only run when it is present.
    pub fn optional(mut self, key: impl Into<String>, check: ValidateFunc) -> Self {
        self.attribute(key.into(), false).checks.push(check);
        self
    }

    /// Adds a required attribute.
    pub fn required(mut self, key: impl Into<String>, check: ValidateFunc) -> Self {
        self.attribute(key.into(), true).checks.push(check);
        self
    }

    fn attribute(&mut self, key: String, required: bool) -> &mut Attribute {
        let attribute = self.attributes.entry(key).or_insert(Attribute {
            required,
            checks: Vec::new(),
        });
        attribute.required |= required;
        attribute
    }

    /// Validates every attribute, collecting all diagnostics.
    ///
    /// Attributes are checked in key order. Keys without validators are
    /// ignored, and a `null` value counts as absent.
    pub fn validate(&self, values: &Map<String, Value>) -> Diagnostics {
        let mut diagnostics = Diagnostics::default();

        for (key, attribute) in &self.attributes {
            match values.get(key) {
                None | Some(Value::Null) => {
                    if attribute.required {
                        diagnostics.errors.push(ValidationError::Required { key: key.clone() });
                    }
                }
                Some(value) => {
                    for check in &attribute.checks {
                        diagnostics.extend(check(value, key));
                    }
                }
            }
        }

        debug!(
            warnings = diagnostics.warnings.len(),
            errors = diagnostics.errors.len(),
            "Validated attributes"
        );
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data_box_edge_device_name, data_box_edge_sku_name, resource_id};
    use azrm_id::{ResourceGroupId, ResourceId, EXAMPLE_SUBSCRIPTION_ID};
    use serde_json::json;

    fn device_schema() -> SchemaValidator {
        SchemaValidator::new()
            .required("name", data_box_edge_device_name)
            .required("resource_group_id", resource_id::<ResourceGroupId>)
            .optional("sku_name", data_box_edge_sku_name)
    }

    fn attributes(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_valid_attributes() {
        let group = ResourceGroupId::new(EXAMPLE_SUBSCRIPTION_ID, "group1").id();
        let diagnostics = device_schema().validate(&attributes(json!({
            "name": "edge-01",
            "resource_group_id": group,
            "sku_name": "EdgeP_Base-Standard",
            "tags": {"env": "test"}
        })));
        assert!(diagnostics.is_ok());
        assert!(diagnostics.warnings.is_empty());
    }

    #[test]
    fn test_collects_every_error() {
        let diagnostics = device_schema().validate(&attributes(json!({
            "name": "-bad-",
            "resource_group_id": "/subscriptions/nope",
            "sku_name": "Mystery-Standard"
        })));

        let keys: Vec<&str> = diagnostics.errors.iter().map(ValidationError::key).collect();
        assert_eq!(keys, vec!["name", "resource_group_id"]);
        assert_eq!(diagnostics.warnings.len(), 1);
    }

    #[test]
    fn test_missing_required_attributes() {
        let diagnostics = device_schema().validate(&attributes(json!({"name": null})));
        assert_eq!(
            diagnostics.errors,
            vec![
                ValidationError::Required { key: "name".to_string() },
                ValidationError::Required { key: "resource_group_id".to_string() },
            ]
        );
    }
}
