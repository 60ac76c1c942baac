//! Table-driven parse and format for resource IDs.
//!
//! A [`ResourceIdSpec`] is a type name plus an ordered list of segments. The
//! same interpreter parses and formats every resource ID type; the typed
//! structs produced by [`crate::define_resource_id!`] only move values in and
//! out of a [`ParseResult`].

use crate::error::IdError;
use crate::segment::{Segment, SegmentKind};

/// How literal segments are matched during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Literal segments must match exactly.
    #[default]
    Strict,

    /// Literal segments match regardless of ASCII case.
    Insensitive,
}

impl ParseMode {
    fn matches(self, expected: &str, actual: &str) -> bool {
        match self {
            ParseMode::Strict => expected == actual,
            ParseMode::Insensitive => expected.eq_ignore_ascii_case(actual),
        }
    }
}

/// The named values captured by a successful parse, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    id_type: &'static str,
    raw_input: String,
    values: Vec<(&'static str, String)>,
}

impl ParseResult {
    /// Returns the type name of the spec that produced this result.
    pub fn id_type(&self) -> &'static str {
        self.id_type
    }

    /// Returns the input exactly as it was given to the parser.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Returns the value captured for the named segment.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(segment, _)| *segment == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over `(segment name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.values
            .iter()
            .map(|(segment, value)| (*segment, value.as_str()))
    }

    /// Returns the number of captured values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the result, returning the captured values in order.
    pub fn into_values(self) -> Vec<String> {
        self.values.into_iter().map(|(_, value)| value).collect()
    }
}

/// The description of one resource ID type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceIdSpec {
    type_name: &'static str,
    segments: &'static [Segment],
}

impl ResourceIdSpec {
    /// Creates a spec from a type name and its ordered segments.
    pub const fn new(type_name: &'static str, segments: &'static [Segment]) -> Self {
        Self {
            type_name,
            segments,
        }
    }

    /// Returns the type name, e.g. `Order`.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns every segment in order.
    pub const fn segments(&self) -> &'static [Segment] {
        self.segments
    }

    /// Iterates over the segments that capture a value.
    pub fn named_segments(&self) -> impl Iterator<Item = &'static Segment> {
        self.segments.iter().filter(|segment| segment.is_named())
    }

    /// Returns the number of segments that capture a value.
    pub fn named_count(&self) -> usize {
        self.named_segments().count()
    }

    /// Returns the number of scope segments.
    pub fn scope_count(&self) -> usize {
        self.segments.iter().filter(|segment| segment.is_scope()).count()
    }

    /// Returns true if the spec contains a scope segment.
    pub fn is_scoped(&self) -> bool {
        self.scope_count() > 0
    }

    /// Formats the named values, given in declaration order, into an ID.
    ///
    /// Formatting never fails: a missing value becomes an empty component.
    pub fn format<S: AsRef<str>>(&self, values: &[S]) -> String {
        let mut values = values.iter().map(AsRef::as_ref);
        let mut out = String::new();
        for segment in self.segments {
            out.push('/');
            match segment.literal() {
                Some(literal) => out.push_str(literal),
                None => {
                    let value = values.next().unwrap_or_default();
                    if segment.is_scope() {
                        out.push_str(value.trim_start_matches('/'));
                    } else {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }

    /// Returns an example ID built from each segment's example value.
    pub fn example_id(&self) -> String {
        let examples: Vec<&str> = self.named_segments().map(Segment::example).collect();
        self.format(&examples)
    }

    /// Returns the human-readable form of the named values.
    ///
    /// ```text
    /// Order (Subscription: "…"
    /// Resource Group Name: "…"
    /// Data Box Edge Device Name: "…"
    /// Name: "…")
    /// ```
    pub fn describe<S: AsRef<str>>(&self, values: &[S]) -> String {
        let components: Vec<String> = self
            .named_segments()
            .zip(values.iter().map(AsRef::as_ref))
            .map(|(segment, value)| format!("{}: {:?}", segment.label(), value))
            .collect();
        format!("{} ({})", self.type_name, components.join("\n"))
    }

    /// Parses an ID, matching literal segments case-sensitively.
    pub fn parse(&self, input: &str) -> Result<ParseResult, IdError> {
        self.parse_with(input, ParseMode::Strict)
    }

    /// Parses an ID, matching literal segments regardless of case.
    pub fn parse_insensitively(&self, input: &str) -> Result<ParseResult, IdError> {
        self.parse_with(input, ParseMode::Insensitive)
    }

    /// Parses an ID using the given mode.
    pub fn parse_with(&self, input: &str, mode: ParseMode) -> Result<ParseResult, IdError> {
        let trimmed = input.strip_prefix('/').unwrap_or(input);
        let components: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        let mut values = Vec::with_capacity(self.named_count());
        let mut pos = 0;

        for (index, segment) in self.segments.iter().enumerate() {
            match segment.kind() {
                SegmentKind::Static(literal) | SegmentKind::ResourceProvider(literal) => {
                    let component = self.component(&components, pos, segment, input)?;
                    if !mode.matches(literal, component) {
                        return Err(IdError::UnexpectedSegment {
                            id_type: self.type_name,
                            segment: segment.name(),
                            expected: literal,
                            actual: component.to_string(),
                            input: input.to_string(),
                        });
                    }
                    pos += 1;
                }
                SegmentKind::Scope => {
                    let remaining = self.segments.len() - index - 1;
                    let available = components.len().saturating_sub(pos);
                    if available <= remaining {
                        return Err(self.missing(segment, input));
                    }
                    let end = components.len() - remaining;
                    let parts = &components[pos..end];
                    if parts.iter().any(|part| part.is_empty()) {
                        return Err(self.missing(segment, input));
                    }
                    values.push((segment.name(), format!("/{}", parts.join("/"))));
                    pos = end;
                }
                SegmentKind::SubscriptionId => {
                    let component = self.component(&components, pos, segment, input)?;
                    if !is_guid(component) {
                        return Err(IdError::InvalidSegmentValue {
                            id_type: self.type_name,
                            segment: segment.name(),
                            reason: format!("{component:?} is not a valid subscription ID (GUID)"),
                            input: input.to_string(),
                        });
                    }
                    values.push((segment.name(), component.to_string()));
                    pos += 1;
                }
                SegmentKind::ResourceGroup | SegmentKind::UserSpecified { .. } => {
                    let component = self.component(&components, pos, segment, input)?;
                    values.push((segment.name(), component.to_string()));
                    pos += 1;
                }
                SegmentKind::Constant(allowed) => {
                    let component = self.component(&components, pos, segment, input)?;
                    let Some(canonical) = allowed
                        .iter()
                        .find(|candidate| mode.matches(candidate, component))
                    else {
                        return Err(IdError::InvalidSegmentValue {
                            id_type: self.type_name,
                            segment: segment.name(),
                            reason: format!("{component:?} is not one of {allowed:?}"),
                            input: input.to_string(),
                        });
                    };
                    values.push((segment.name(), (*canonical).to_string()));
                    pos += 1;
                }
            }
        }

        if pos < components.len() {
            return Err(IdError::TrailingSegments {
                id_type: self.type_name,
                extra: format!("/{}", components[pos..].join("/")),
                input: input.to_string(),
            });
        }

        Ok(ParseResult {
            id_type: self.type_name,
            raw_input: input.to_string(),
            values,
        })
    }

    /// Rewrites an ID with canonical literal casing, keeping its values.
    pub fn recase(&self, input: &str) -> Result<String, IdError> {
        let parsed = self.parse_insensitively(input)?;
        Ok(self.format(&parsed.into_values()))
    }

    fn component<'a>(
        &self,
        components: &[&'a str],
        pos: usize,
        segment: &Segment,
        input: &str,
    ) -> Result<&'a str, IdError> {
        match components.get(pos) {
            Some(component) if !component.is_empty() => Ok(component),
            _ => Err(self.missing(segment, input)),
        }
    }

    fn missing(&self, segment: &Segment, input: &str) -> IdError {
        IdError::SegmentNotSpecified {
            id_type: self.type_name,
            segment: segment.name(),
            expected: self.example_id(),
            input: input.to_string(),
        }
    }
}

fn is_guid(value: &str) -> bool {
    value.len() == 36 && uuid::Uuid::parse_str(value).is_ok()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const WIDGET_SEGMENTS: &[Segment] = &[
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
        Segment::static_segment("staticResourceGroups", "resourceGroups"),
        Segment::resource_group("resourceGroupName"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider("staticMicrosoftWidgets", "Microsoft.Widgets"),
        Segment::static_segment("staticWidgets", "widgets"),
        Segment::user_specified("widgetName", "widgetValue"),
        Segment::static_segment("staticModes", "modes"),
        Segment::constant("modeName", &["Fast", "Slow"]),
    ];
    const WIDGET: ResourceIdSpec = ResourceIdSpec::new("Widget", WIDGET_SEGMENTS);

    const SCOPED_SEGMENTS: &[Segment] = &[
        Segment::scope("scope"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider("staticMicrosoftWidgets", "Microsoft.Widgets"),
        Segment::static_segment("staticWidgets", "widgets"),
        Segment::user_specified("widgetName", "widgetValue"),
    ];
    const SCOPED: ResourceIdSpec = ResourceIdSpec::new("ScopedWidget", SCOPED_SEGMENTS);

    const VALID: &str = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/group1/providers/Microsoft.Widgets/widgets/widget1/modes/Fast";

    #[test]
    fn test_parse_captures_values_in_order() {
        let parsed = WIDGET.parse(VALID).unwrap();
        assert_eq!(parsed.id_type(), "Widget");
        assert_eq!(parsed.raw_input(), VALID);
        assert_eq!(
            parsed.iter().collect::<Vec<_>>(),
            vec![
                ("subscriptionId", "12345678-1234-9876-4563-123456789012"),
                ("resourceGroupName", "group1"),
                ("widgetName", "widget1"),
                ("modeName", "Fast"),
            ]
        );
    }

    #[test]
    fn test_format_roundtrip() {
        let parsed = WIDGET.parse(VALID).unwrap();
        let values = parsed.into_values();
        assert_eq!(WIDGET.format(&values), VALID);
    }

    #[test]
    fn test_leading_slash_is_optional() {
        let parsed = WIDGET.parse(VALID.trim_start_matches('/')).unwrap();
        assert_eq!(parsed.get("widgetName"), Some("widget1"));
    }

    #[test]
    fn test_constant_is_normalized_insensitively() {
        let input = VALID.replace("/modes/Fast", "/MODES/fast");
        assert!(WIDGET.parse(&input).is_err());

        let parsed = WIDGET.parse_insensitively(&input).unwrap();
        assert_eq!(parsed.get("modeName"), Some("Fast"));
    }

    #[test]
    fn test_constant_outside_set_is_invalid() {
        let input = VALID.replace("/modes/Fast", "/modes/Medium");
        let err = WIDGET.parse_insensitively(&input).unwrap_err();
        assert!(matches!(
            err,
            IdError::InvalidSegmentValue {
                segment: "modeName",
                ..
            }
        ));
    }

    #[test]
    fn test_subscription_must_be_guid() {
        let input = VALID.replace("12345678-1234-9876-4563-123456789012", "not-a-guid");
        let err = WIDGET.parse(&input).unwrap_err();
        assert_eq!(err.segment(), Some("subscriptionId"));
    }

    #[rstest]
    #[case::empty("", "staticSubscriptions")]
    #[case::root("/", "staticSubscriptions")]
    #[case::no_subscription("/subscriptions/", "subscriptionId")]
    #[case::no_group(
        "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups",
        "resourceGroupName"
    )]
    #[case::empty_group(
        "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups//providers",
        "resourceGroupName"
    )]
    #[case::no_name(
        "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/group1/providers/Microsoft.Widgets/widgets",
        "widgetName"
    )]
    #[case::trailing_slash_before_name(
        "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/group1/providers/Microsoft.Widgets/widgets/",
        "widgetName"
    )]
    fn test_missing_segments(#[case] input: &str, #[case] segment: &str) {
        let err = WIDGET.parse(input).unwrap_err();
        assert!(err.is_missing_segment(), "{err}");
        assert_eq!(err.segment(), Some(segment));
        assert_eq!(err.input(), input);
    }

    #[rstest]
    #[case::extra_component("/extra")]
    #[case::trailing_slash("/")]
    fn test_trailing_segments(#[case] suffix: &str) {
        let input = format!("{VALID}{suffix}");
        let err = WIDGET.parse(&input).unwrap_err();
        assert!(matches!(err, IdError::TrailingSegments { .. }), "{err}");
    }

    #[test]
    fn test_wrong_literal_is_unexpected() {
        let input = VALID.replace("/widgets/", "/gadgets/");
        let err = WIDGET.parse_insensitively(&input).unwrap_err();
        assert!(err.is_unexpected_segment());
        assert_eq!(err.segment(), Some("staticWidgets"));
    }

    #[test]
    fn test_provider_case() {
        let input = VALID.replace("Microsoft.Widgets", "microsoft.widgets");
        let err = WIDGET.parse(&input).unwrap_err();
        assert_eq!(err.segment(), Some("staticMicrosoftWidgets"));
        assert!(WIDGET.parse_insensitively(&input).is_ok());
    }

    #[test]
    fn test_scope_spans_multiple_components() {
        let input = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/group1/providers/Microsoft.Widgets/widgets/widget1";
        let parsed = SCOPED.parse(input).unwrap();
        assert_eq!(
            parsed.get("scope"),
            Some("/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/group1")
        );
        assert_eq!(parsed.get("widgetName"), Some("widget1"));
        assert_eq!(SCOPED.format(&parsed.into_values()), input);
    }

    #[test]
    fn test_scope_can_contain_providers() {
        let scope = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/group1/providers/Microsoft.Storage/storageAccounts/acct1";
        let input = format!("{scope}/providers/Microsoft.Widgets/widgets/widget1");
        let parsed = SCOPED.parse(&input).unwrap();
        assert_eq!(parsed.get("scope"), Some(scope));
    }

    #[test]
    fn test_scope_must_not_be_empty() {
        let err = SCOPED
            .parse("/providers/Microsoft.Widgets/widgets/widget1")
            .unwrap_err();
        assert_eq!(err.segment(), Some("scope"));
        assert!(err.is_missing_segment());

        let err = SCOPED
            .parse("//x/providers/Microsoft.Widgets/widgets/widget1")
            .unwrap_err();
        assert_eq!(err.segment(), Some("scope"));
    }

    #[test]
    fn test_example_id_parses() {
        assert!(WIDGET.parse(&WIDGET.example_id()).is_ok());
        assert!(SCOPED.parse(&SCOPED.example_id()).is_ok());
    }

    #[test]
    fn test_describe() {
        let description = WIDGET.describe(&["sub", "group1", "widget1", "Fast"]);
        assert_eq!(
            description,
            "Widget (Subscription: \"sub\"\nResource Group Name: \"group1\"\nWidget Name: \"widget1\"\nMode Name: \"Fast\")"
        );
    }

    #[test]
    fn test_recase() {
        let shouted = VALID
            .replace("subscriptions", "SUBSCRIPTIONS")
            .replace("resourceGroups", "resourcegroups")
            .replace("Microsoft.Widgets", "MICROSOFT.WIDGETS");
        assert_eq!(WIDGET.recase(&shouted).unwrap(), VALID);
    }

    #[test]
    fn test_format_never_fails() {
        let formatted = WIDGET.format::<&str>(&[]);
        assert!(formatted.starts_with("/subscriptions//resourceGroups//"));
    }
}
