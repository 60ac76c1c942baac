//! DataBox Edge device models.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::define_string_enum;
use crate::error::SkuError;

// =============================================================================
// Enums
// =============================================================================

define_string_enum! {
    /// The hardware SKU of a DataBox Edge device.
    SkuName {
        Ep2x128Gpu1Mx1W => "EP2_128_GPU1_Mx1_W",
        Ep2x128x1T4Mx1W => "EP2_128_1T4_Mx1_W",
        Ep2x64Mx1W => "EP2_64_Mx1_W",
        Ep2x64x1VpuW => "EP2_64_1VPU_W",
        Ep2x256Gpu2Mx1 => "EP2_256_GPU2_Mx1",
        Ep2x256x2T4W => "EP2_256_2T4_W",
        Edge => "Edge",
        EdgeMrMini => "EdgeMR_Mini",
        EdgeMrTcp => "EdgeMR_TCP",
        EdgePBase => "EdgeP_Base",
        EdgePHigh => "EdgeP_High",
        EdgePrBase => "EdgePR_Base",
        EdgePrBaseUps => "EdgePR_Base_UPS",
        Gpu => "GPU",
        Gateway => "Gateway",
        Management => "Management",
        RcaLarge => "RCA_Large",
        RcaSmall => "RCA_Small",
        Rdc => "RDC",
        TcaLarge => "TCA_Large",
        TcaSmall => "TCA_Small",
        Tdc => "TDC",
        Tea4NodeHeater => "TEA_4Node_Heater",
        Tea4NodeUpsHeater => "TEA_4Node_UPS_Heater",
        Tea1Node => "TEA_1Node",
        Tea1NodeHeater => "TEA_1Node_Heater",
        Tea1NodeUps => "TEA_1Node_UPS",
        Tea1NodeUpsHeater => "TEA_1Node_UPS_Heater",
        Tma => "TMA",
    }
}

define_string_enum! {
    /// The billing tier of a DataBox Edge SKU.
    SkuTier {
        Standard => "Standard",
    }
}

define_string_enum! {
    /// The kind of DataBox Edge device.
    DataBoxEdgeDeviceKind {
        AzureDataBoxGateway => "AzureDataBoxGateway",
        AzureModularDataCentre => "AzureModularDataCentre",
        AzureStackEdge => "AzureStackEdge",
        AzureStackHub => "AzureStackHub",
    }
}

define_string_enum! {
    /// Connection status of a DataBox Edge device.
    DataBoxEdgeDeviceStatus {
        Disconnected => "Disconnected",
        Maintenance => "Maintenance",
        NeedsAttention => "NeedsAttention",
        Offline => "Offline",
        Online => "Online",
        PartiallyDisconnected => "PartiallyDisconnected",
        ReadyToSetup => "ReadyToSetup",
    }
}

// =============================================================================
// SKU
// =============================================================================

/// A device SKU as written in configuration, e.g. `EdgeP_Base-Standard`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceSku {
    pub name: SkuName,
    pub tier: SkuTier,
}

impl fmt::Display for DeviceSku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.name, self.tier)
    }
}

/// Parses a `{name}-{tier}` SKU string.
///
/// The string is split on its last `-`, since tiers never contain one. When
/// there is no `-` the tier defaults to `Standard`. Names are matched without
/// regard to case; an unrecognised name is returned as [`SkuName::Other`] so
/// that newly released hardware can still be described. An unrecognised tier
/// is an error.
pub fn parse_device_sku_name(input: &str) -> Result<DeviceSku, SkuError> {
    if input.is_empty() {
        return Err(SkuError::Empty);
    }

    let (name, tier) = match input.rsplit_once('-') {
        Some((_, "")) => {
            return Err(SkuError::MissingTier {
                input: input.to_string(),
            })
        }
        Some((name, tier)) => (name, Some(tier)),
        None => (input, None),
    };

    if name.is_empty() {
        return Err(SkuError::MissingName {
            input: input.to_string(),
        });
    }

    let tier = match tier {
        None => SkuTier::Standard,
        Some(raw) => match SkuTier::from(raw) {
            SkuTier::Other(tier) => {
                return Err(SkuError::UnknownTier {
                    input: input.to_string(),
                    tier,
                    expected: SkuTier::possible_values().join(", "),
                })
            }
            tier => tier,
        },
    };

    let name = SkuName::from(name);
    if !name.is_known() {
        debug!(sku = input, "Unrecognised DataBox Edge SKU name");
    }

    Ok(DeviceSku { name, tier })
}
