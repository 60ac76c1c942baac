//! Typed ID definitions for the built-in resource types.
//!
//! Each type is a segment table plus one field per captured value. Parsing and
//! formatting are shared; see [`crate::ResourceIdSpec`].

use crate::define_resource_id;
use crate::Segment;

// =============================================================================
// Subscriptions and Resource Groups
// =============================================================================

define_resource_id! {
    /// An Azure subscription.
    SubscriptionId, "Subscription" {
        subscription_id,
    } => [
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
    ]
}

define_resource_id! {
    /// A resource group within a subscription.
    ResourceGroupId, "ResourceGroup" {
        subscription_id,
        resource_group_name,
    } => [
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
        Segment::static_segment("staticResourceGroups", "resourceGroups"),
        Segment::resource_group("resourceGroupName"),
    ]
}

// =============================================================================
// DataBox Edge
// =============================================================================

define_resource_id! {
    /// A DataBox Edge device.
    DataBoxEdgeDeviceId, "DataBoxEdgeDevice" {
        subscription_id,
        resource_group_name,
        data_box_edge_device_name,
    } => [
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
        Segment::static_segment("staticResourceGroups", "resourceGroups"),
        Segment::resource_group("resourceGroupName"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider("staticMicrosoftDataBoxEdge", "Microsoft.DataBoxEdge"),
        Segment::static_segment("staticDataBoxEdgeDevices", "dataBoxEdgeDevices"),
        Segment::user_specified("dataBoxEdgeDeviceName", "dataBoxEdgeDeviceValue"),
    ]
}

define_resource_id! {
    /// An order placed for a DataBox Edge device.
    OrderId, "Order" {
        subscription_id,
        resource_group_name,
        data_box_edge_device_name,
        name,
    } => [
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
        Segment::static_segment("staticResourceGroups", "resourceGroups"),
        Segment::resource_group("resourceGroupName"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider("staticMicrosoftDataBoxEdge", "Microsoft.DataBoxEdge"),
        Segment::static_segment("staticDataBoxEdgeDevices", "dataBoxEdgeDevices"),
        Segment::user_specified("dataBoxEdgeDeviceName", "dataBoxEdgeDeviceValue"),
        Segment::static_segment("staticOrders", "orders"),
        Segment::user_specified("name", "default"),
    ]
}

// =============================================================================
// Log Analytics
// =============================================================================

define_resource_id! {
    /// A Log Analytics workspace.
    LogAnalyticsWorkspaceId, "LogAnalyticsWorkspace" {
        subscription_id,
        resource_group_name,
        workspace_name,
    } => [
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
        Segment::static_segment("staticResourceGroups", "resourceGroups"),
        Segment::resource_group("resourceGroupName"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider(
            "staticMicrosoftOperationalInsights",
            "Microsoft.OperationalInsights"
        ),
        Segment::static_segment("staticWorkspaces", "workspaces"),
        Segment::user_specified("workspaceName", "workspaceValue"),
    ]
}

define_resource_id! {
    /// A saved search within a Log Analytics workspace.
    LogAnalyticsSavedSearchId, "LogAnalyticsSavedSearch" {
        subscription_id,
        resource_group_name,
        workspace_name,
        saved_search_name,
    } => [
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
        Segment::static_segment("staticResourceGroups", "resourceGroups"),
        Segment::resource_group("resourceGroupName"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider(
            "staticMicrosoftOperationalInsights",
            "Microsoft.OperationalInsights"
        ),
        Segment::static_segment("staticWorkspaces", "workspaces"),
        Segment::user_specified("workspaceName", "workspaceValue"),
        Segment::static_segment("staticSavedSearches", "savedSearches"),
        Segment::user_specified("savedSearchName", "savedSearchValue"),
    ]
}

define_resource_id! {
    /// A linked service of a Log Analytics workspace.
    ///
    /// The service name is either `Automation` (read access) or `Cluster`
    /// (write access).
    LogAnalyticsLinkedServiceId, "LogAnalyticsLinkedService" {
        subscription_id,
        resource_group_name,
        workspace_name,
        linked_service_name,
    } => [
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
        Segment::static_segment("staticResourceGroups", "resourceGroups"),
        Segment::resource_group("resourceGroupName"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider(
            "staticMicrosoftOperationalInsights",
            "Microsoft.OperationalInsights"
        ),
        Segment::static_segment("staticWorkspaces", "workspaces"),
        Segment::user_specified("workspaceName", "workspaceValue"),
        Segment::static_segment("staticLinkedServices", "linkedServices"),
        Segment::constant("linkedServiceName", &["Automation", "Cluster"]),
    ]
}

// =============================================================================
// Orbital
// =============================================================================

define_resource_id! {
    /// An Orbital spacecraft.
    SpacecraftId, "Spacecraft" {
        subscription_id,
        resource_group_name,
        spacecraft_name,
    } => [
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
        Segment::static_segment("staticResourceGroups", "resourceGroups"),
        Segment::resource_group("resourceGroupName"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider("staticMicrosoftOrbital", "Microsoft.Orbital"),
        Segment::static_segment("staticSpacecrafts", "spacecrafts"),
        Segment::user_specified("spacecraftName", "spacecraftValue"),
    ]
}

define_resource_id! {
    /// An Orbital contact profile.
    ContactProfileId, "ContactProfile" {
        subscription_id,
        resource_group_name,
        contact_profile_name,
    } => [
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
        Segment::static_segment("staticResourceGroups", "resourceGroups"),
        Segment::resource_group("resourceGroupName"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider("staticMicrosoftOrbital", "Microsoft.Orbital"),
        Segment::static_segment("staticContactProfiles", "contactProfiles"),
        Segment::user_specified("contactProfileName", "contactProfileValue"),
    ]
}

// =============================================================================
// Mixed Reality
// =============================================================================

define_resource_id! {
    /// A Mixed Reality spatial anchors account.
    SpatialAnchorsAccountId, "SpatialAnchorsAccount" {
        subscription_id,
        resource_group_name,
        spatial_anchors_account_name,
    } => [
        Segment::static_segment("staticSubscriptions", "subscriptions"),
        Segment::subscription_id("subscriptionId"),
        Segment::static_segment("staticResourceGroups", "resourceGroups"),
        Segment::resource_group("resourceGroupName"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider("staticMicrosoftMixedReality", "Microsoft.MixedReality"),
        Segment::static_segment("staticSpatialAnchorsAccounts", "spatialAnchorsAccounts"),
        Segment::user_specified("spatialAnchorsAccountName", "spatialAnchorsAccountValue"),
    ]
}

// =============================================================================
// EventGrid (scoped)
// =============================================================================

define_resource_id! {
    /// An EventGrid event subscription attached to any scope.
    ///
    /// The scope keeps its leading slash, e.g.
    /// `/subscriptions/{id}/resourceGroups/{name}`.
    EventSubscriptionId, "EventSubscription" {
        scope,
        event_subscription_name,
    } => [
        Segment::scope("scope"),
        Segment::static_segment("staticProviders", "providers"),
        Segment::resource_provider("staticMicrosoftEventGrid", "Microsoft.EventGrid"),
        Segment::static_segment("staticEventSubscriptions", "eventSubscriptions"),
        Segment::user_specified("eventSubscriptionName", "eventSubscriptionValue"),
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::{IdError, ResourceId, ResourceIdSpec};

    const SUBSCRIPTION: &str = "12345678-1234-9876-4563-123456789012";
    const ORDER: &str = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.DataBoxEdge/dataBoxEdgeDevices/device1/orders/default";

    /// Formats the values with every literal segment upper-cased.
    fn shout_literals(spec: &ResourceIdSpec, values: &[&str]) -> String {
        let mut values = values.iter();
        let mut out = String::new();
        for segment in spec.segments() {
            out.push('/');
            match segment.literal() {
                Some(literal) => out.push_str(&literal.to_uppercase()),
                None => out.push_str(values.next().unwrap().trim_start_matches('/')),
            }
        }
        out
    }

    #[test]
    fn test_order_id_new_formats() {
        let id = OrderId::new(SUBSCRIPTION, "resGroup1", "device1", "default");
        assert_eq!(id.id(), ORDER);
        assert_eq!(id.to_string(), ORDER);
    }

    #[test]
    fn test_order_id_parse() {
        let id = OrderId::parse(ORDER).unwrap();
        assert_eq!(id.subscription_id, SUBSCRIPTION);
        assert_eq!(id.resource_group_name, "resGroup1");
        assert_eq!(id.data_box_edge_device_name, "device1");
        assert_eq!(id.name, "default");
    }

    #[test]
    fn test_order_id_upper_case() {
        let shouted = ORDER.to_uppercase();
        assert!(OrderId::parse(&shouted).is_err());

        let id = OrderId::parse_insensitively(&shouted).unwrap();
        assert_eq!(id.subscription_id, SUBSCRIPTION);
        assert_eq!(id.resource_group_name, "RESGROUP1");
        assert_eq!(id.data_box_edge_device_name, "DEVICE1");
        assert_eq!(id.name, "DEFAULT");
    }

    #[test]
    fn test_order_id_describe() {
        let id = OrderId::new(SUBSCRIPTION, "resGroup1", "device1", "default");
        assert_eq!(
            id.describe(),
            "Order (Subscription: \"12345678-1234-9876-4563-123456789012\"\n\
             Resource Group Name: \"resGroup1\"\n\
             Data Box Edge Device Name: \"device1\"\n\
             Name: \"default\")"
        );
    }

    #[rstest]
    #[case::empty("")]
    #[case::subscription_only("/subscriptions/")]
    #[case::device_only(
        "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.DataBoxEdge/dataBoxEdgeDevices/device1"
    )]
    #[case::no_order_name(
        "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.DataBoxEdge/dataBoxEdgeDevices/device1/orders"
    )]
    #[case::empty_order_name(
        "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.DataBoxEdge/dataBoxEdgeDevices/device1/orders/"
    )]
    fn test_order_id_missing_segments(#[case] input: &str) {
        let err = OrderId::parse(input).unwrap_err();
        assert!(err.is_missing_segment(), "{err}");
    }

    #[test]
    fn test_order_id_extra_segment() {
        let err = OrderId::parse(&format!("{ORDER}/extra")).unwrap_err();
        assert!(matches!(err, IdError::TrailingSegments { .. }));
    }

    #[test]
    fn test_order_id_from_str() {
        let id: OrderId = ORDER.parse().unwrap();
        assert_eq!(id.name, "default");
    }

    #[test]
    fn test_order_id_json_roundtrip() {
        let id = OrderId::new(SUBSCRIPTION, "resGroup1", "device1", "default");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{ORDER}\""));
        let parsed: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_json_rejects_malformed_id() {
        let result: Result<OrderId, _> = serde_json::from_str("\"/subscriptions/\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_device_id_is_not_an_order() {
        let device = DataBoxEdgeDeviceId::new(SUBSCRIPTION, "resGroup1", "device1");
        assert!(OrderId::parse(&device.id()).is_err());
        assert!(
            DataBoxEdgeDeviceId::parse(&format!("{}/orders/default", device)).is_err()
        );
    }

    #[test]
    fn test_linked_service_constant() {
        let id = LogAnalyticsLinkedServiceId::new(SUBSCRIPTION, "rg", "ws", "Cluster");
        assert_eq!(LogAnalyticsLinkedServiceId::parse(&id.id()).unwrap(), id);

        let lowered = id.id().replace("/Cluster", "/cluster");
        assert!(LogAnalyticsLinkedServiceId::parse(&lowered).is_err());
        let parsed = LogAnalyticsLinkedServiceId::parse_insensitively(&lowered).unwrap();
        assert_eq!(parsed.linked_service_name, "Cluster");

        let other = id.id().replace("/Cluster", "/Storage");
        assert!(
            LogAnalyticsLinkedServiceId::parse_insensitively(&other).is_err()
        );
    }

    #[test]
    fn test_event_subscription_scope() {
        let input = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/rg1/providers/Microsoft.EventGrid/eventSubscriptions/sub1";
        let id = EventSubscriptionId::parse(input).unwrap();
        assert_eq!(
            id.scope,
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/rg1"
        );
        assert_eq!(id.event_subscription_name, "sub1");
        assert_eq!(id.id(), input);
    }

    #[test]
    fn test_all_fields_match_segments() {
        let specs: Vec<(&ResourceIdSpec, &[&str])> = vec![
            (&SubscriptionId::SPEC, SubscriptionId::FIELDS),
            (&ResourceGroupId::SPEC, ResourceGroupId::FIELDS),
            (&DataBoxEdgeDeviceId::SPEC, DataBoxEdgeDeviceId::FIELDS),
            (&OrderId::SPEC, OrderId::FIELDS),
            (&LogAnalyticsWorkspaceId::SPEC, LogAnalyticsWorkspaceId::FIELDS),
            (&LogAnalyticsSavedSearchId::SPEC, LogAnalyticsSavedSearchId::FIELDS),
            (&LogAnalyticsLinkedServiceId::SPEC, LogAnalyticsLinkedServiceId::FIELDS),
            (&SpacecraftId::SPEC, SpacecraftId::FIELDS),
            (&ContactProfileId::SPEC, ContactProfileId::FIELDS),
            (&SpatialAnchorsAccountId::SPEC, SpatialAnchorsAccountId::FIELDS),
            (&EventSubscriptionId::SPEC, EventSubscriptionId::FIELDS),
        ];

        for (spec, fields) in specs {
            assert_eq!(spec.named_count(), fields.len(), "{}", spec.type_name());
            assert!(
                spec.parse(&spec.example_id()).is_ok(),
                "{}",
                spec.type_name()
            );
        }
    }

    fn subscription() -> impl Strategy<Value = String> {
        any::<u128>().prop_map(|bits| uuid::Uuid::from_u128(bits).to_string())
    }

    fn name() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9_.-]{0,24}"
    }

    proptest! {
        #[test]
        fn prop_order_roundtrip(
            sub in subscription(),
            group in name(),
            device in name(),
            order in name(),
        ) {
            let id = OrderId::new(sub, group, device, order);
            let parsed = OrderId::parse(&id.id()).unwrap();
            prop_assert_eq!(parsed, id);
        }

        #[test]
        fn prop_event_subscription_roundtrip(
            sub in subscription(),
            group in name(),
            subscription_name in name(),
        ) {
            let scope = ResourceGroupId::new(sub, group).id();
            let id = EventSubscriptionId::new(scope, subscription_name);
            let parsed = EventSubscriptionId::parse(&id.id()).unwrap();
            prop_assert_eq!(parsed, id);
        }

        #[test]
        fn prop_upper_cased_literals(
            sub in subscription(),
            group in name(),
            workspace in name(),
            search in name(),
        ) {
            let id = LogAnalyticsSavedSearchId::new(sub, group, workspace, search);
            let shouted = shout_literals(&LogAnalyticsSavedSearchId::SPEC, &id.segment_values());

            prop_assert!(LogAnalyticsSavedSearchId::parse(&shouted).is_err());
            let parsed = LogAnalyticsSavedSearchId::parse_insensitively(&shouted).unwrap();
            prop_assert_eq!(parsed, id);
        }
    }
}
