//! Headline figures and map overlays derived from a [`SimulationResult`].

use serde::{Deserialize, Serialize};

use crate::conditions::HubStatus;
use crate::simulation::{HubInstance, SimulationResult};
use crate::spatial::GeoBounds;

const MIN_DELIVERY_RADIUS_M: f64 = 300.0;
const MAX_DELIVERY_RADIUS_M: f64 = 1200.0;
const RADIUS_SHRINK_M_PER_KM: f64 = 120.0;

/// Identifies one hub in a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubHighlight {
    pub name: String,
    pub platform_id: String,
    pub distance_km: f64,
    pub predicted_eta_minutes: u32,
}

impl From<&HubInstance> for HubHighlight {
    fn from(hub: &HubInstance) -> Self {
        Self {
            name: hub.name.clone(),
            platform_id: hub.platform_id.clone(),
            distance_km: hub.distance_km,
            predicted_eta_minutes: hub.predicted_eta_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplySummary {
    pub total_hubs: usize,
    pub active_hubs: usize,
    pub overloaded_hubs: usize,
    pub nearest_hub: Option<HubHighlight>,
    pub fastest_hub: Option<HubHighlight>,
    pub mean_predicted_eta_minutes: f64,
}

impl SupplySummary {
    pub fn from_result(result: &SimulationResult) -> Self {
        let hubs = &result.hubs;
        // Later hubs win ties, so scan with `<=`.
        let fastest = hubs.iter().reduce(|best, hub| {
            if hub.predicted_eta_minutes <= best.predicted_eta_minutes {
                hub
            } else {
                best
            }
        });
        let mean_predicted_eta_minutes = if hubs.is_empty() {
            0.0
        } else {
            hubs.iter()
                .map(|hub| f64::from(hub.predicted_eta_minutes))
                .sum::<f64>()
                / hubs.len() as f64
        };

        Self {
            total_hubs: hubs.len(),
            active_hubs: hubs.iter().filter(|hub| hub.is_active).count(),
            overloaded_hubs: hubs
                .iter()
                .filter(|hub| hub.status_label == HubStatus::Overloaded)
                .count(),
            nearest_hub: hubs.first().map(HubHighlight::from),
            fastest_hub: fastest.map(HubHighlight::from),
            mean_predicted_eta_minutes,
        }
    }
}

impl HubInstance {
    /// Radius of the delivery circle drawn around the hub, in metres.
    /// Shrinks with distance from the customer, clamped to `[300, 1200]`.
    pub fn delivery_radius_m(&self) -> f64 {
        (MAX_DELIVERY_RADIUS_M - self.distance_km * RADIUS_SHRINK_M_PER_KM)
            .clamp(MIN_DELIVERY_RADIUS_M, MAX_DELIVERY_RADIUS_M)
    }

    /// Extra time from traffic as a whole percentage (`1.26` -> `26`).
    pub fn traffic_surcharge_pct(&self) -> u32 {
        surcharge_pct(self.traffic_factor)
    }

    pub fn rain_surcharge_pct(&self) -> u32 {
        surcharge_pct(self.rain_factor)
    }
}

fn surcharge_pct(factor: f64) -> u32 {
    ((factor - 1.0) * 100.0).round().max(0.0) as u32
}

impl SimulationResult {
    pub fn summary(&self) -> SupplySummary {
        SupplySummary::from_result(self)
    }

    pub fn active_hubs(&self) -> impl Iterator<Item = &HubInstance> + '_ {
        self.hubs.iter().filter(|hub| hub.is_active)
    }

    /// Box covering the center and every hub.
    pub fn bounds(&self) -> GeoBounds {
        let mut bounds = GeoBounds::around(self.center);
        for hub in &self.hubs {
            bounds.extend(hub.position());
        }
        bounds
    }
}
