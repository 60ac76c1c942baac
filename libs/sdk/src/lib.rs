//! # azrm-sdk
//!
//! Resource Manager payload models shared by the validators and the CLI.
//!
//! ## Design Principles
//!
//! - Enums never reject values the service adds later; unknown values are
//!   kept verbatim
//! - Polymorphic payloads are tagged unions with a raw fallback, so nothing
//!   is lost when a discriminator is not recognised
//! - Service errors name the operation and the resource they concern

pub mod databoxedge;
mod enums;
mod error;
pub mod eventgrid;

pub use databoxedge::{parse_device_sku_name, DeviceSku, SkuName, SkuTier};
pub use error::{FilterError, SdkError, SkuError};
pub use eventgrid::{
    validate_advanced_filter_limit, AdvancedFilter, EventSubscriptionFilter, RawAdvancedFilter,
    MAX_ADVANCED_FILTER_VALUES,
};
