//! Macros for defining typed resource ID types.

/// Macro to define a typed resource ID from its segment table.
///
/// The field list names the struct fields, one per non-literal segment, in
/// the order the segments appear. This generates:
/// - A `SEGMENTS` table and a `SPEC` constant
/// - `new()` taking every field value
/// - A [`ResourceId`](crate::ResourceId) implementation
/// - `Display` (canonical ID) and `FromStr` (strict parse)
/// - `Serialize` and `Deserialize` as the canonical string
///
/// # Example
///
/// ```ignore
/// define_resource_id! {
///     /// A widget.
///     WidgetId, "Widget" {
///         subscription_id,
///         resource_group_name,
///         widget_name,
///     } => [
///         Segment::static_segment("staticSubscriptions", "subscriptions"),
///         Segment::subscription_id("subscriptionId"),
///         Segment::static_segment("staticResourceGroups", "resourceGroups"),
///         Segment::resource_group("resourceGroupName"),
///         Segment::static_segment("staticProviders", "providers"),
///         Segment::resource_provider("staticMicrosoftWidgets", "Microsoft.Widgets"),
///         Segment::static_segment("staticWidgets", "widgets"),
///         Segment::user_specified("widgetName", "widgetValue"),
///     ]
/// }
///
/// let id = WidgetId::new("12345678-1234-9876-4563-123456789012", "group", "widget");
/// let parsed = WidgetId::parse(&id.id())?;
/// ```
#[macro_export]
macro_rules! define_resource_id {
    (
        $(#[$meta:meta])*
        $name:ident, $type_name:literal {
            $($field:ident),+ $(,)?
        } => [
            $($segment:expr),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            $(pub $field: String,)+
        }

        impl $name {
            /// The segment table for this ID type.
            pub const SEGMENTS: &'static [$crate::Segment] = &[$($segment),+];

            /// The spec for this ID type.
            pub const SPEC: $crate::ResourceIdSpec =
                $crate::ResourceIdSpec::new($type_name, Self::SEGMENTS);

            /// Struct field names, in segment order.
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),+];

            /// Creates an ID from each of its segment values.
            #[must_use]
            pub fn new($($field: impl Into<String>),+) -> Self {
                Self {
                    $($field: $field.into(),)+
                }
            }
        }

        impl $crate::ResourceId for $name {
            fn spec() -> &'static $crate::ResourceIdSpec {
                &Self::SPEC
            }

            fn from_parse_result(
                parsed: $crate::ParseResult,
            ) -> Result<Self, $crate::IdError> {
                let input = parsed.raw_input().to_string();
                let mut values = parsed.into_values().into_iter();
                Ok(Self {
                    $($field: values.next().ok_or_else(|| {
                        $crate::IdError::SegmentNotSpecified {
                            id_type: $type_name,
                            segment: stringify!($field),
                            expected: Self::SPEC.example_id(),
                            input: input.clone(),
                        }
                    })?,)+
                })
            }

            fn segment_values(&self) -> Vec<&str> {
                vec![$(self.$field.as_str()),+]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&$crate::ResourceId::id(self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::ResourceId>::parse(s)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&$crate::ResourceId::id(self))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::ResourceId>::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
