//! EventGrid event subscription filters.
//!
//! Advanced filters are a tagged union discriminated on `operatorType`.
//! Filters whose operator is missing or unknown decode into
//! [`AdvancedFilter::Raw`], which keeps every field so the filter can be
//! written back unchanged.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::FilterError;

/// Most advanced filter values allowed on one event subscription.
pub const MAX_ADVANCED_FILTER_VALUES: usize = 25;

/// The JSON discriminator for advanced filters.
const OPERATOR_TYPE: &str = "operatorType";

/// Operator types and their configuration block names.
const OPERATORS: &[(&str, &str)] = &[
    ("BoolEquals", "bool_equals"),
    ("NumberGreaterThan", "number_greater_than"),
    ("NumberGreaterThanOrEquals", "number_greater_than_or_equals"),
    ("NumberLessThan", "number_less_than"),
    ("NumberLessThanOrEquals", "number_less_than_or_equals"),
    ("NumberIn", "number_in"),
    ("NumberNotIn", "number_not_in"),
    ("NumberInRange", "number_in_range"),
    ("NumberNotInRange", "number_not_in_range"),
    ("StringBeginsWith", "string_begins_with"),
    ("StringNotBeginsWith", "string_not_begins_with"),
    ("StringEndsWith", "string_ends_with"),
    ("StringNotEndsWith", "string_not_ends_with"),
    ("StringContains", "string_contains"),
    ("StringNotContains", "string_not_contains"),
    ("StringIn", "string_in"),
    ("StringNotIn", "string_not_in"),
    ("IsNotNull", "is_not_null"),
    ("IsNullOrUndefined", "is_null_or_undefined"),
];

// =============================================================================
// Advanced filters
// =============================================================================

/// A single advanced filter on an event field.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvancedFilter {
    BoolEquals { key: String, value: bool },
    NumberGreaterThan { key: String, value: f64 },
    NumberGreaterThanOrEquals { key: String, value: f64 },
    NumberLessThan { key: String, value: f64 },
    NumberLessThanOrEquals { key: String, value: f64 },
    NumberIn { key: String, values: Vec<f64> },
    NumberNotIn { key: String, values: Vec<f64> },
    NumberInRange { key: String, values: Vec<[f64; 2]> },
    NumberNotInRange { key: String, values: Vec<[f64; 2]> },
    StringBeginsWith { key: String, values: Vec<String> },
    StringNotBeginsWith { key: String, values: Vec<String> },
    StringEndsWith { key: String, values: Vec<String> },
    StringNotEndsWith { key: String, values: Vec<String> },
    StringContains { key: String, values: Vec<String> },
    StringNotContains { key: String, values: Vec<String> },
    StringIn { key: String, values: Vec<String> },
    StringNotIn { key: String, values: Vec<String> },
    IsNotNull { key: String },
    IsNullOrUndefined { key: String },
    /// A filter with a missing or unrecognised operator type.
    Raw(RawAdvancedFilter),
}

/// The undecoded fields of an advanced filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAdvancedFilter {
    pub fields: Map<String, Value>,
}

impl RawAdvancedFilter {
    /// Returns the operator type, if the payload carried a string one.
    pub fn operator_type(&self) -> Option<&str> {
        self.fields.get(OPERATOR_TYPE).and_then(Value::as_str)
    }

    /// Returns the filtered key, if present.
    pub fn key(&self) -> Option<&str> {
        self.fields.get("key").and_then(Value::as_str)
    }

    fn value_count(&self) -> usize {
        match self.fields.get("values") {
            Some(Value::Array(values)) => values.len(),
            _ if self.fields.contains_key("value") => 1,
            _ => 0,
        }
    }
}

/// The value payload of a decoded filter, borrowed for serialization.
enum FilterValue<'a> {
    None,
    Bool(bool),
    Number(f64),
    Numbers(&'a [f64]),
    Ranges(&'a [[f64; 2]]),
    Strings(&'a [String]),
}

impl AdvancedFilter {
    /// Returns the `operatorType` discriminator.
    pub fn operator_type(&self) -> Option<&str> {
        let op = match self {
            Self::BoolEquals { .. } => "BoolEquals",
            Self::NumberGreaterThan { .. } => "NumberGreaterThan",
            Self::NumberGreaterThanOrEquals { .. } => "NumberGreaterThanOrEquals",
            Self::NumberLessThan { .. } => "NumberLessThan",
            Self::NumberLessThanOrEquals { .. } => "NumberLessThanOrEquals",
            Self::NumberIn { .. } => "NumberIn",
            Self::NumberNotIn { .. } => "NumberNotIn",
            Self::NumberInRange { .. } => "NumberInRange",
            Self::NumberNotInRange { .. } => "NumberNotInRange",
            Self::StringBeginsWith { .. } => "StringBeginsWith",
            Self::StringNotBeginsWith { .. } => "StringNotBeginsWith",
            Self::StringEndsWith { .. } => "StringEndsWith",
            Self::StringNotEndsWith { .. } => "StringNotEndsWith",
            Self::StringContains { .. } => "StringContains",
            Self::StringNotContains { .. } => "StringNotContains",
            Self::StringIn { .. } => "StringIn",
            Self::StringNotIn { .. } => "StringNotIn",
            Self::IsNotNull { .. } => "IsNotNull",
            Self::IsNullOrUndefined { .. } => "IsNullOrUndefined",
            Self::Raw(raw) => return raw.operator_type(),
        };
        Some(op)
    }

    /// Returns the event field this filter applies to.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::BoolEquals { key, .. }
            | Self::NumberGreaterThan { key, .. }
            | Self::NumberGreaterThanOrEquals { key, .. }
            | Self::NumberLessThan { key, .. }
            | Self::NumberLessThanOrEquals { key, .. }
            | Self::NumberIn { key, .. }
            | Self::NumberNotIn { key, .. }
            | Self::NumberInRange { key, .. }
            | Self::NumberNotInRange { key, .. }
            | Self::StringBeginsWith { key, .. }
            | Self::StringNotBeginsWith { key, .. }
            | Self::StringEndsWith { key, .. }
            | Self::StringNotEndsWith { key, .. }
            | Self::StringContains { key, .. }
            | Self::StringNotContains { key, .. }
            | Self::StringIn { key, .. }
            | Self::StringNotIn { key, .. }
            | Self::IsNotNull { key }
            | Self::IsNullOrUndefined { key } => Some(key),
            Self::Raw(raw) => raw.key(),
        }
    }

    /// Returns the configuration block name, e.g. `number_in_range`.
    ///
    /// Raw filters have none.
    pub fn config_name(&self) -> Option<&'static str> {
        if self.is_raw() {
            return None;
        }
        let op = self.operator_type()?;
        OPERATORS
            .iter()
            .find(|(operator, _)| *operator == op)
            .map(|(_, name)| *name)
    }

    /// Returns true for filters that were not decoded.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Counts the values this filter contributes towards
    /// [`MAX_ADVANCED_FILTER_VALUES`].
    pub fn value_count(&self) -> usize {
        match self.value() {
            FilterValue::None => match self {
                Self::Raw(raw) => raw.value_count(),
                _ => 0,
            },
            FilterValue::Bool(_) | FilterValue::Number(_) => 1,
            FilterValue::Numbers(values) => values.len(),
            FilterValue::Ranges(values) => values.len(),
            FilterValue::Strings(values) => values.len(),
        }
    }

    fn value(&self) -> FilterValue<'_> {
        match self {
            Self::BoolEquals { value, .. } => FilterValue::Bool(*value),
            Self::NumberGreaterThan { value, .. }
            | Self::NumberGreaterThanOrEquals { value, .. }
            | Self::NumberLessThan { value, .. }
            | Self::NumberLessThanOrEquals { value, .. } => FilterValue::Number(*value),
            Self::NumberIn { values, .. } | Self::NumberNotIn { values, .. } => {
                FilterValue::Numbers(values)
            }
            Self::NumberInRange { values, .. } | Self::NumberNotInRange { values, .. } => {
                FilterValue::Ranges(values)
            }
            Self::StringBeginsWith { values, .. }
            | Self::StringNotBeginsWith { values, .. }
            | Self::StringEndsWith { values, .. }
            | Self::StringNotEndsWith { values, .. }
            | Self::StringContains { values, .. }
            | Self::StringNotContains { values, .. }
            | Self::StringIn { values, .. }
            | Self::StringNotIn { values, .. } => FilterValue::Strings(values),
            Self::IsNotNull { .. } | Self::IsNullOrUndefined { .. } | Self::Raw(_) => {
                FilterValue::None
            }
        }
    }

    fn decode(op: &str, fields: &Map<String, Value>) -> Result<Self, String> {
        let key = || required::<String>(fields, op, "key");
        let value = || required::<f64>(fields, op, "value");
        let strings = || listed::<String>(fields, op);
        let numbers = || listed::<f64>(fields, op);
        let ranges = || listed::<[f64; 2]>(fields, op);

        Ok(match op {
            "BoolEquals" => Self::BoolEquals {
                key: key()?,
                value: required(fields, op, "value")?,
            },
            "NumberGreaterThan" => Self::NumberGreaterThan {
                key: key()?,
                value: value()?,
            },
            "NumberGreaterThanOrEquals" => Self::NumberGreaterThanOrEquals {
                key: key()?,
                value: value()?,
            },
            "NumberLessThan" => Self::NumberLessThan {
                key: key()?,
                value: value()?,
            },
            "NumberLessThanOrEquals" => Self::NumberLessThanOrEquals {
                key: key()?,
                value: value()?,
            },
            "NumberIn" => Self::NumberIn {
                key: key()?,
                values: numbers()?,
            },
            "NumberNotIn" => Self::NumberNotIn {
                key: key()?,
                values: numbers()?,
            },
            "NumberInRange" => Self::NumberInRange {
                key: key()?,
                values: ranges()?,
            },
            "NumberNotInRange" => Self::NumberNotInRange {
                key: key()?,
                values: ranges()?,
            },
            "StringBeginsWith" => Self::StringBeginsWith {
                key: key()?,
                values: strings()?,
            },
            "StringNotBeginsWith" => Self::StringNotBeginsWith {
                key: key()?,
                values: strings()?,
            },
            "StringEndsWith" => Self::StringEndsWith {
                key: key()?,
                values: strings()?,
            },
            "StringNotEndsWith" => Self::StringNotEndsWith {
                key: key()?,
                values: strings()?,
            },
            "StringContains" => Self::StringContains {
                key: key()?,
                values: strings()?,
            },
            "StringNotContains" => Self::StringNotContains {
                key: key()?,
                values: strings()?,
            },
            "StringIn" => Self::StringIn {
                key: key()?,
                values: strings()?,
            },
            "StringNotIn" => Self::StringNotIn {
                key: key()?,
                values: strings()?,
            },
            "IsNotNull" => Self::IsNotNull { key: key()? },
            "IsNullOrUndefined" => Self::IsNullOrUndefined { key: key()? },
            _ => Self::Raw(RawAdvancedFilter {
                fields: fields.clone(),
            }),
        })
    }
}

fn required<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    op: &str,
    name: &str,
) -> Result<T, String> {
    let value = fields
        .get(name)
        .ok_or_else(|| format!("{op} filter is missing `{name}`"))?;
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{op} filter has invalid `{name}`: {e}"))
}

fn listed<T: DeserializeOwned>(fields: &Map<String, Value>, op: &str) -> Result<Vec<T>, String> {
    match fields.get("values") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(values) => serde_json::from_value(values.clone())
            .map_err(|e| format!("{op} filter has invalid `values`: {e}")),
    }
}

impl Serialize for AdvancedFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Self::Raw(raw) = self {
            return raw.serialize(serializer);
        }

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(OPERATOR_TYPE, &self.operator_type())?;
        map.serialize_entry("key", &self.key())?;
        match self.value() {
            FilterValue::None => {}
            FilterValue::Bool(value) => map.serialize_entry("value", &value)?,
            FilterValue::Number(value) => map.serialize_entry("value", &value)?,
            FilterValue::Numbers(values) => map.serialize_entry("values", values)?,
            FilterValue::Ranges(values) => map.serialize_entry("values", values)?,
            FilterValue::Strings(values) => map.serialize_entry("values", values)?,
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AdvancedFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let op = fields
            .get(OPERATOR_TYPE)
            .and_then(Value::as_str)
            .filter(|op| OPERATORS.iter().any(|(operator, _)| operator == op));

        match op {
            Some(op) => Self::decode(op, &fields).map_err(D::Error::custom),
            None => {
                debug!(
                    operator_type = ?fields.get(OPERATOR_TYPE),
                    "Keeping advanced filter with unrecognised operator as raw"
                );
                Ok(Self::Raw(RawAdvancedFilter { fields }))
            }
        }
    }
}

// =============================================================================
// Subscription filter
// =============================================================================

/// The filter block of an event subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubscriptionFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included_event_types: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_begins_with: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_ends_with: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_subject_case_sensitive: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advanced_filters: Vec<AdvancedFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_advanced_filtering_on_arrays: Option<bool>,
}

impl EventSubscriptionFilter {
    /// Total number of values across all advanced filters.
    pub fn value_count(&self) -> usize {
        self.advanced_filters
            .iter()
            .map(AdvancedFilter::value_count)
            .sum()
    }

    /// Iterates over filters that could not be decoded.
    pub fn raw_filters(&self) -> impl Iterator<Item = &RawAdvancedFilter> {
        self.advanced_filters.iter().filter_map(|filter| match filter {
            AdvancedFilter::Raw(raw) => Some(raw),
            _ => None,
        })
    }
}

/// Checks that the advanced filters stay within
/// [`MAX_ADVANCED_FILTER_VALUES`], returning the value count.
pub fn validate_advanced_filter_limit(
    filter: &EventSubscriptionFilter,
) -> Result<usize, FilterError> {
    let count = filter.value_count();
    if count > MAX_ADVANCED_FILTER_VALUES {
        return Err(FilterError::TooManyValues {
            count,
            max: MAX_ADVANCED_FILTER_VALUES,
        });
    }
    Ok(count)
}
