//! # azrm-id
//!
//! Typed Azure Resource Manager resource IDs.
//!
//! ## Design Principles
//!
//! - Every resource type is a table of segments; one interpreter parses and
//!   formats all of them
//! - Parsing is strict by default, with an explicit case-insensitive variant
//!   for IDs returned by the API in inconsistent casing
//! - IDs roundtrip (format → parse → format) without loss
//! - IDs are typed so one resource's ID cannot be passed where another's is
//!   expected
//!
//! ## ID Format
//!
//! IDs are `/`-separated ARM paths:
//!
//! - `/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}`
//! - `/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.DataBoxEdge/dataBoxEdgeDevices/{dataBoxEdgeDeviceName}/orders/{name}`
//! - `/{scope}/providers/Microsoft.EventGrid/eventSubscriptions/{eventSubscriptionName}`
//!
//! Every segment is required. A missing, empty or unexpected segment fails
//! with an [`IdError`] naming the segment.

mod error;
mod macros;
mod registry;
mod resource_id;
mod segment;
mod spec;
mod types;

pub use error::{IdError, RegistryError};
pub use registry::{ResourceIdRegistry, BUILTIN_SPECS};
pub use resource_id::ResourceId;
pub use segment::{
    Segment, SegmentKind, EXAMPLE_RESOURCE_GROUP, EXAMPLE_SCOPE, EXAMPLE_SUBSCRIPTION_ID,
};
pub use spec::{ParseMode, ParseResult, ResourceIdSpec};
pub use types::*;
