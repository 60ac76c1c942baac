//! Segment descriptors.
//!
//! A resource ID type is described by an ordered list of [`Segment`]s. Static
//! and provider segments are literals matched during parsing; every other kind
//! captures a value under the segment's logical name.

/// Subscription ID used when rendering example IDs.
pub const EXAMPLE_SUBSCRIPTION_ID: &str = "12345678-1234-9876-4563-123456789012";

/// Resource group name used when rendering example IDs.
pub const EXAMPLE_RESOURCE_GROUP: &str = "example-resource-group";

/// Scope used when rendering example IDs.
pub const EXAMPLE_SCOPE: &str =
    "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/some-resource-group";

/// The kind of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A fixed literal such as `subscriptions` or `resourceGroups`.
    Static(&'static str),

    /// A GUID-shaped subscription ID.
    SubscriptionId,

    /// A resource group name.
    ResourceGroup,

    /// A resource provider namespace such as `Microsoft.DataBoxEdge`.
    ResourceProvider(&'static str),

    /// A user-specified resource name.
    UserSpecified {
        /// Value used when rendering example IDs.
        example: &'static str,
    },

    /// An arbitrary ARM scope spanning one or more path components.
    Scope,

    /// One of a fixed set of values.
    Constant(&'static [&'static str]),
}

/// A single named segment of a resource ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    name: &'static str,
    kind: SegmentKind,
}

impl Segment {
    /// A fixed literal segment.
    pub const fn static_segment(name: &'static str, literal: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::Static(literal),
        }
    }

    /// A subscription ID segment.
    pub const fn subscription_id(name: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::SubscriptionId,
        }
    }

    /// A resource group name segment.
    pub const fn resource_group(name: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::ResourceGroup,
        }
    }

    /// A resource provider namespace segment.
    pub const fn resource_provider(name: &'static str, namespace: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::ResourceProvider(namespace),
        }
    }

    /// A user-specified value segment.
    pub const fn user_specified(name: &'static str, example: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::UserSpecified { example },
        }
    }

    /// A scope segment.
    pub const fn scope(name: &'static str) -> Self {
        Self {
            name,
            kind: SegmentKind::Scope,
        }
    }

    /// A segment restricted to a fixed set of values.
    pub const fn constant(name: &'static str, values: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: SegmentKind::Constant(values),
        }
    }

    /// Returns the logical name of this segment.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the kind of this segment.
    pub const fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Returns the literal for static and provider segments.
    pub const fn literal(&self) -> Option<&'static str> {
        match self.kind {
            SegmentKind::Static(literal) | SegmentKind::ResourceProvider(literal) => Some(literal),
            _ => None,
        }
    }

    /// Returns true if this segment captures a value.
    pub const fn is_named(&self) -> bool {
        self.literal().is_none()
    }

    /// Returns true if this is a scope segment.
    pub const fn is_scope(&self) -> bool {
        matches!(self.kind, SegmentKind::Scope)
    }

    /// Returns the value used for this segment in example IDs.
    pub fn example(&self) -> &'static str {
        match self.kind {
            SegmentKind::Static(literal) | SegmentKind::ResourceProvider(literal) => literal,
            SegmentKind::SubscriptionId => EXAMPLE_SUBSCRIPTION_ID,
            SegmentKind::ResourceGroup => EXAMPLE_RESOURCE_GROUP,
            SegmentKind::UserSpecified { example } => example,
            SegmentKind::Scope => EXAMPLE_SCOPE,
            SegmentKind::Constant(values) => values.first().copied().unwrap_or_default(),
        }
    }

    /// Returns the human-readable label for this segment.
    ///
    /// `dataBoxEdgeDeviceName` becomes `Data Box Edge Device Name`.
    pub fn label(&self) -> String {
        match self.kind {
            SegmentKind::SubscriptionId => "Subscription".to_string(),
            SegmentKind::ResourceGroup => "Resource Group Name".to_string(),
            _ => humanize(self.name),
        }
    }
}

fn humanize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_ascii_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}
