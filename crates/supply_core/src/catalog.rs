//! Static catalog of delivery hub archetypes.

use serde::{Deserialize, Serialize};

/// Fulfilment tier. Controls the distance and base-ETA ranges used when a hub
/// is synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Quick-commerce dark store: near and fast.
    Express,
    /// Warehouse or supermarket delivery: farther and slower.
    Bulk,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Express => "express",
            Self::Bulk => "bulk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubArchetype {
    pub name: &'static str,
    pub platform_id: &'static str,
    pub color: &'static str,
    pub vehicle_type: &'static str,
    pub tier: Tier,
}

/// Reference catalog. Order matters: the archetype index selects the
/// sequence offsets and the position spread of each hub.
pub const HUB_ARCHETYPES: &[HubArchetype] = &[
    HubArchetype {
        name: "Blinkit Hub",
        platform_id: "blinkit",
        color: "#f59e0b",
        vehicle_type: "EV Bike",
        tier: Tier::Express,
    },
    HubArchetype {
        name: "Zepto Darkstore",
        platform_id: "zepto",
        color: "#a855f7",
        vehicle_type: "Bike",
        tier: Tier::Express,
    },
    HubArchetype {
        name: "BigBasket Warehouse",
        platform_id: "bigbasket",
        color: "#22c55e",
        vehicle_type: "Truck",
        tier: Tier::Express,
    },
    HubArchetype {
        name: "Swiggy Instamart",
        platform_id: "swiggy_instamart",
        color: "#f97316",
        vehicle_type: "Bike",
        tier: Tier::Bulk,
    },
    HubArchetype {
        name: "JioMart Store",
        platform_id: "jiomart",
        color: "#3b82f6",
        vehicle_type: "Van",
        tier: Tier::Bulk,
    },
    HubArchetype {
        name: "DMart Ready",
        platform_id: "dmart",
        color: "#06b6d4",
        vehicle_type: "Truck",
        tier: Tier::Bulk,
    },
];
