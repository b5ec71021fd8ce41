//! Per-postal-code records and sweep-wide aggregates.

use std::collections::{BTreeMap, HashSet};

use h3o::Resolution;
use serde::{Deserialize, Serialize};
use supply_core::simulation::SimulationResult;

/// H3 resolution used to bucket simulation centers (~250 km² cells).
pub const CENTER_CELL_RESOLUTION: Resolution = Resolution::Five;

/// Flattened outcome of one simulation, one row per postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRecord {
    pub postal_code: String,
    pub seed: u64,
    pub center_lat: f64,
    pub center_lng: f64,
    /// Empty when the center is not a valid coordinate.
    pub center_cell: String,
    pub traffic: String,
    pub weather: String,
    pub total_hubs: usize,
    pub active_hubs: usize,
    pub overloaded_hubs: usize,
    pub nearest_hub: String,
    pub nearest_distance_km: f64,
    pub fastest_hub: String,
    pub fastest_eta_minutes: u32,
    pub mean_eta_minutes: f64,
}

impl SweepRecord {
    pub fn from_result(result: &SimulationResult) -> Self {
        let summary = result.summary();
        let nearest = summary.nearest_hub.as_ref();
        let fastest = summary.fastest_hub.as_ref();

        Self {
            postal_code: result.postal_code.clone(),
            seed: result.seed,
            center_lat: result.center.lat,
            center_lng: result.center.lng,
            center_cell: result
                .center
                .cell(CENTER_CELL_RESOLUTION)
                .map(|cell| cell.to_string())
                .unwrap_or_default(),
            traffic: result.global_traffic_label.label().to_string(),
            weather: result.global_weather_label.label().to_string(),
            total_hubs: summary.total_hubs,
            active_hubs: summary.active_hubs,
            overloaded_hubs: summary.overloaded_hubs,
            nearest_hub: nearest.map(|h| h.name.clone()).unwrap_or_default(),
            nearest_distance_km: nearest.map(|h| h.distance_km).unwrap_or(0.0),
            fastest_hub: fastest.map(|h| h.name.clone()).unwrap_or_default(),
            fastest_eta_minutes: fastest.map(|h| h.predicted_eta_minutes).unwrap_or(0),
            mean_eta_minutes: summary.mean_predicted_eta_minutes,
        }
    }
}

/// Aggregates over a whole sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepMetrics {
    pub postal_codes: usize,
    pub avg_fastest_eta_minutes: f64,
    pub median_fastest_eta_minutes: f64,
    pub p90_fastest_eta_minutes: f64,
    /// Overloaded hubs / all hubs.
    pub overloaded_share: f64,
    /// Active hubs / all hubs.
    pub active_share: f64,
    pub traffic_counts: BTreeMap<String, usize>,
    pub weather_counts: BTreeMap<String, usize>,
    pub distinct_center_cells: usize,
}

impl SweepMetrics {
    pub fn from_records(records: &[SweepRecord]) -> Self {
        let fastest: Vec<u32> = records.iter().map(|r| r.fastest_eta_minutes).collect();
        let (avg, median, p90) = calculate_stats(&fastest);

        let total_hubs: usize = records.iter().map(|r| r.total_hubs).sum();
        let overloaded: usize = records.iter().map(|r| r.overloaded_hubs).sum();
        let active: usize = records.iter().map(|r| r.active_hubs).sum();
        let share = |count: usize| {
            if total_hubs > 0 {
                count as f64 / total_hubs as f64
            } else {
                0.0
            }
        };

        let mut traffic_counts = BTreeMap::new();
        let mut weather_counts = BTreeMap::new();
        for record in records {
            *traffic_counts.entry(record.traffic.clone()).or_insert(0) += 1;
            *weather_counts.entry(record.weather.clone()).or_insert(0) += 1;
        }

        let distinct_center_cells = records
            .iter()
            .filter(|r| !r.center_cell.is_empty())
            .map(|r| r.center_cell.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            postal_codes: records.len(),
            avg_fastest_eta_minutes: avg,
            median_fastest_eta_minutes: median,
            p90_fastest_eta_minutes: p90,
            overloaded_share: share(overloaded),
            active_share: share(active),
            traffic_counts,
            weather_counts,
            distinct_center_cells,
        }
    }
}

/// Average, median and P90 of `values`; zeros when empty.
fn calculate_stats(values: &[u32]) -> (f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let avg = sorted.iter().map(|&v| f64::from(v)).sum::<f64>() / sorted.len() as f64;
    let median = if sorted.len() % 2 == 0 {
        (f64::from(sorted[sorted.len() / 2 - 1]) + f64::from(sorted[sorted.len() / 2])) / 2.0
    } else {
        f64::from(sorted[sorted.len() / 2])
    };
    // P90: floor(0.9 * (n-1))
    let p90_idx = ((sorted.len() - 1) as f64 * 0.9) as usize;
    let p90 = f64::from(sorted[p90_idx.min(sorted.len() - 1)]);

    (avg, median, p90)
}
