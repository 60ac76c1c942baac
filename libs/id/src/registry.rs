//! Registry of known resource ID types.
//!
//! The registry is an ordinary value: build it once at startup and pass it to
//! whatever needs to identify or recase arbitrary IDs. Nothing registers
//! itself implicitly.

use tracing::debug;

use crate::error::RegistryError;
use crate::resource_id::ResourceId;
use crate::spec::{ParseResult, ResourceIdSpec};
use crate::types::*;

/// ARM keywords canonicalized when an ID matches no registered type.
const COMMON_SEGMENTS: &[&str] = &["subscriptions", "resourceGroups", "providers"];

/// Specs for every built-in ID type.
pub const BUILTIN_SPECS: &[&ResourceIdSpec] = &[
    &SubscriptionId::SPEC,
    &ResourceGroupId::SPEC,
    &DataBoxEdgeDeviceId::SPEC,
    &OrderId::SPEC,
    &LogAnalyticsWorkspaceId::SPEC,
    &LogAnalyticsSavedSearchId::SPEC,
    &LogAnalyticsLinkedServiceId::SPEC,
    &SpacecraftId::SPEC,
    &ContactProfileId::SPEC,
    &SpatialAnchorsAccountId::SPEC,
    &EventSubscriptionId::SPEC,
];

/// A set of resource ID specs, addressable by type name.
#[derive(Debug, Clone, Default)]
pub struct ResourceIdRegistry {
    specs: Vec<&'static ResourceIdSpec>,
}

impl ResourceIdRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in ID type.
    pub fn builtin() -> Self {
        Self {
            specs: BUILTIN_SPECS.to_vec(),
        }
    }

    /// Registers a typed ID.
    pub fn register<T: ResourceId>(&mut self) -> Result<&mut Self, RegistryError> {
        self.register_spec(T::spec())
    }

    /// Registers a spec.
    pub fn register_spec(
        &mut self,
        spec: &'static ResourceIdSpec,
    ) -> Result<&mut Self, RegistryError> {
        if self.get(spec.type_name()).is_some() {
            return Err(RegistryError::DuplicateType(spec.type_name().to_string()));
        }
        if spec.scope_count() > 1 {
            return Err(RegistryError::MultipleScopes(spec.type_name().to_string()));
        }

        debug!(id_type = spec.type_name(), "Registered resource ID type");
        self.specs.push(spec);
        Ok(self)
    }

    /// Looks up a spec by type name, ignoring case.
    pub fn get(&self, type_name: &str) -> Option<&'static ResourceIdSpec> {
        self.specs
            .iter()
            .copied()
            .find(|spec| spec.type_name().eq_ignore_ascii_case(type_name))
    }

    /// Iterates over the registered specs in registration order.
    pub fn specs(&self) -> impl Iterator<Item = &'static ResourceIdSpec> + '_ {
        self.specs.iter().copied()
    }

    /// Returns the number of registered specs.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Finds the registered type an ID belongs to, ignoring literal case.
    ///
    /// Unscoped specs are tried before scoped ones, and longer specs before
    /// shorter ones, so the most specific match wins.
    pub fn identify(&self, input: &str) -> Option<(&'static ResourceIdSpec, ParseResult)> {
        let mut candidates = self.specs.clone();
        candidates.sort_by_key(|spec| {
            (
                spec.is_scoped(),
                std::cmp::Reverse(spec.segments().len()),
            )
        });

        let found = candidates.into_iter().find_map(|spec| {
            spec.parse_insensitively(input)
                .ok()
                .map(|parsed| (spec, parsed))
        });

        match &found {
            Some((spec, _)) => debug!(id_type = spec.type_name(), "Identified resource ID"),
            None => debug!(input, "Resource ID matched no registered type"),
        }
        found
    }

    /// Rewrites an ID with canonical literal casing.
    ///
    /// IDs of a registered type are rebuilt from their spec. Anything else
    /// only has its common ARM keywords recased and is otherwise returned
    /// unchanged.
    pub fn recase(&self, input: &str) -> String {
        if let Some((spec, parsed)) = self.identify(input) {
            return spec.format(&parsed.into_values());
        }

        input
            .split('/')
            .map(|component| {
                COMMON_SEGMENTS
                    .iter()
                    .find(|keyword| keyword.eq_ignore_ascii_case(component))
                    .copied()
                    .unwrap_or(component)
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::EXAMPLE_SUBSCRIPTION_ID as SUBSCRIPTION;
    use crate::Segment;

    #[test]
    fn test_builtin_types_are_unique() {
        let mut registry = ResourceIdRegistry::new();
        for spec in BUILTIN_SPECS {
            registry.register_spec(spec).unwrap();
        }
        assert_eq!(registry.len(), ResourceIdRegistry::builtin().len());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = ResourceIdRegistry::new();
        registry.register::<OrderId>().unwrap();
        let err = registry.register::<OrderId>().unwrap_err();
        assert_eq!(err, RegistryError::DuplicateType("Order".to_string()));
    }

    #[test]
    fn test_multiple_scopes_rejected() {
        const SEGMENTS: &[Segment] = &[
            Segment::scope("outer"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::scope("inner"),
        ];
        static DOUBLE: ResourceIdSpec = ResourceIdSpec::new("Double", SEGMENTS);
        let err = ResourceIdRegistry::new().register_spec(&DOUBLE).unwrap_err();
        assert!(matches!(err, RegistryError::MultipleScopes(_)));
    }

    #[test]
    fn test_get_ignores_case() {
        let registry = ResourceIdRegistry::builtin();
        assert_eq!(registry.get("order").map(|s| s.type_name()), Some("Order"));
        assert!(registry.get("Nope").is_none());
    }

    #[test]
    fn test_identify_prefers_specific_types() {
        let registry = ResourceIdRegistry::builtin();

        let order = OrderId::new(SUBSCRIPTION, "rg", "device", "default").id();
        let (spec, _) = registry.identify(&order).unwrap();
        assert_eq!(spec.type_name(), "Order");

        let group = ResourceGroupId::new(SUBSCRIPTION, "rg").id();
        let (spec, _) = registry.identify(&group).unwrap();
        assert_eq!(spec.type_name(), "ResourceGroup");

        let event = format!("{group}/providers/Microsoft.EventGrid/eventSubscriptions/sub1");
        let (spec, parsed) = registry.identify(&event).unwrap();
        assert_eq!(spec.type_name(), "EventSubscription");
        assert_eq!(parsed.get("scope"), Some(group.as_str()));
    }

    #[test]
    fn test_identify_unknown() {
        let registry = ResourceIdRegistry::builtin();
        assert!(registry.identify("/not/an/azure/id").is_none());
        assert!(
            ResourceIdRegistry::new().identify(&OrderId::SPEC.example_id()).is_none()
        );
    }

    #[test]
    fn test_recase_known_id() {
        let registry = ResourceIdRegistry::builtin();
        let canonical = SpacecraftId::new(SUBSCRIPTION, "Group", "Craft").id();
        let shouted = canonical
            .replace("spacecrafts", "SPACECRAFTS")
            .replace("Microsoft.Orbital", "microsoft.orbital")
            .replace("resourceGroups", "resourcegroups");
        assert_eq!(registry.recase(&shouted), canonical);
    }

    #[test]
    fn test_recase_unknown_id() {
        let registry = ResourceIdRegistry::builtin();
        let input = format!(
            "/SUBSCRIPTIONS/{SUBSCRIPTION}/resourcegroups/Group/PROVIDERS/Microsoft.Web/sites/App"
        );
        assert_eq!(
            registry.recase(&input),
            format!("/subscriptions/{SUBSCRIPTION}/resourceGroups/Group/providers/Microsoft.Web/sites/App")
        );
    }
}
