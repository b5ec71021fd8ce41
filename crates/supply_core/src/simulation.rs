//! Supply simulation: synthesize hubs around a postal code and predict ETAs.
//!
//! For archetype index `i` the hub reads sequence indices `i*5 + k`:
//!
//! | k | drives |
//! |---|--------|
//! | 1 | distance from the customer |
//! | 2 | base ETA |
//! | 3 | per-hub traffic jitter |
//! | 4 | hub load |
//! | 6 | latitude offset |
//! | 7 | longitude offset |
//! | 8 | online flag |
//!
//! The predicted ETA is `floor(base * traffic * rain * load_penalty)`; every
//! factor is >= 1.0 so the prediction never undercuts the base ETA.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::{HubArchetype, Tier, HUB_ARCHETYPES};
use crate::conditions::{AmbientConditions, HubStatus, TrafficLevel, WeatherCondition};
use crate::geocode::{parse_leading_integer, resolve_with_source, GeoPoint};
use crate::params::SupplyParams;
use crate::rng::SeededLcg;

const MIN_DISTANCE_KM: f64 = 0.5;
const MIN_LOAD_PCT: f64 = 20.0;
const LOAD_SPAN_PCT: f64 = 75.0;
/// Position jitter in degrees; grows with the archetype index.
const POSITION_SPREAD_DEG: f64 = 0.02;
const POSITION_SPREAD_STEP_DEG: f64 = 0.005;
const SEQUENCE_STRIDE: u64 = 5;

/// One synthesized hub. Field names are the JSON wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubInstance {
    pub name: String,
    pub platform_id: String,
    pub vehicle_type: String,
    pub color: String,
    pub tier: Tier,
    pub distance_km: f64,
    pub base_eta_minutes: u32,
    pub lat: f64,
    pub lng: f64,
    pub is_active: bool,
    /// Reported to 2 decimals; the ETA uses the unrounded value.
    pub traffic_factor: f64,
    pub rain_factor: f64,
    pub hub_load_pct: u32,
    pub predicted_eta_minutes: u32,
    pub status_label: HubStatus,
}

impl HubInstance {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Postal code actually simulated, after fallback substitution.
    pub postal_code: String,
    pub seed: u64,
    pub center: GeoPoint,
    /// Sorted by `distance_km` ascending; index 0 is the nearest hub.
    pub hubs: Vec<HubInstance>,
    pub global_traffic_label: TrafficLevel,
    pub global_weather_label: WeatherCondition,
}

/// The postal code to simulate: `raw` when it starts with an integer,
/// `fallback` otherwise (missing, empty or non-numeric input).
pub fn effective_postal_code<'a>(raw: Option<&'a str>, fallback: &'a str) -> &'a str {
    match raw {
        Some(code) if parse_leading_integer(code).is_some() => code,
        _ => fallback,
    }
}

/// Simulate with the reference model. Total and deterministic.
pub fn simulate(postal_code: &str) -> SimulationResult {
    simulate_with(postal_code, &SupplyParams::default())
}

/// Simulate when the caller may not have a postal code at all.
pub fn simulate_optional(postal_code: Option<&str>) -> SimulationResult {
    run(postal_code, &SupplyParams::default())
}

/// Simulate with custom model parameters. `params` should pass
/// [`SupplyParams::validate`]; invalid parameters still produce a result but
/// may break the ETA invariants.
pub fn simulate_with(postal_code: &str, params: &SupplyParams) -> SimulationResult {
    run(Some(postal_code), params)
}

fn run(raw: Option<&str>, params: &SupplyParams) -> SimulationResult {
    let postal_code = effective_postal_code(raw, &params.fallback_postal_code);
    if raw != Some(postal_code) {
        debug!(
            input = raw.unwrap_or_default(),
            fallback = postal_code,
            "postal code unusable, substituting fallback"
        );
    }

    let rng = SeededLcg::from_postal_code(postal_code);
    let located = resolve_with_source(postal_code);
    let conditions = AmbientConditions::sample(&rng);

    let mut hubs: Vec<HubInstance> = HUB_ARCHETYPES
        .iter()
        .enumerate()
        .map(|(index, archetype)| {
            build_hub(index, archetype, located.point, &conditions, &rng, params)
        })
        .collect();
    // Stable: equal distances keep catalog order.
    hubs.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    debug!(
        postal_code,
        seed = rng.seed(),
        source = ?located.source,
        traffic = conditions.traffic.label(),
        weather = conditions.weather.label(),
        "simulated hyper-local supply"
    );

    SimulationResult {
        postal_code: postal_code.to_string(),
        seed: rng.seed(),
        center: located.point,
        hubs,
        global_traffic_label: conditions.traffic,
        global_weather_label: conditions.weather,
    }
}

fn build_hub(
    index: usize,
    archetype: &HubArchetype,
    center: GeoPoint,
    conditions: &AmbientConditions,
    rng: &SeededLcg,
    params: &SupplyParams,
) -> HubInstance {
    let offset = index as u64 * SEQUENCE_STRIDE;
    let draw = |k: u64| rng.at(offset + k);

    let distance_km =
        round_to(MIN_DISTANCE_KM + draw(1) * params.distance_span_km(archetype.tier), 1);

    let window = params.base_eta(archetype.tier);
    let base_eta_minutes =
        (f64::from(window.min_minutes) + draw(2) * f64::from(window.span_minutes)).floor() as u32;

    let traffic_factor = conditions.traffic.base_factor() + draw(3) * params.traffic_jitter_span;
    let rain_factor = conditions.weather.base_factor();

    let hub_load_pct = (MIN_LOAD_PCT + draw(4) * LOAD_SPAN_PCT).floor() as u32;
    let load_penalty = params.load.penalty(hub_load_pct);

    let predicted_eta_minutes =
        (f64::from(base_eta_minutes) * traffic_factor * rain_factor * load_penalty).floor() as u32;

    let spread = POSITION_SPREAD_DEG + index as f64 * POSITION_SPREAD_STEP_DEG;
    let lat = center.lat + (draw(6) - 0.5) * spread;
    let lng = center.lng + (draw(7) - 0.5) * spread;

    let hub = HubInstance {
        name: archetype.name.to_string(),
        platform_id: archetype.platform_id.to_string(),
        vehicle_type: archetype.vehicle_type.to_string(),
        color: archetype.color.to_string(),
        tier: archetype.tier,
        distance_km,
        base_eta_minutes,
        lat,
        lng,
        is_active: draw(8) > params.offline_probability,
        traffic_factor: round_to(traffic_factor, 2),
        rain_factor: round_to(rain_factor, 2),
        hub_load_pct,
        predicted_eta_minutes,
        status_label: params.load.classify(hub_load_pct),
    };
    trace!(
        hub = hub.platform_id.as_str(),
        distance_km,
        eta = predicted_eta_minutes,
        load = hub_load_pct,
        "built hub"
    );
    hub
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
