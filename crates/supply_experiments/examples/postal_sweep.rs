//! Example: sweep every metro prefix and report the slowest regions.
//!
//! Writes records and aggregates under `sweep-results/`.

use supply_core::SupplyParams;
use supply_experiments::{export_sweep, run_parallel_sweep, PostalCodeSpace, SweepMetrics};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let space = PostalCodeSpace::metro_prefixes(&["001", "014", "050", "091"]);
    println!("Sweeping {} postal codes...", space.len());

    let mut records = run_parallel_sweep(&space, &SupplyParams::default(), None, true)?;
    let metrics = SweepMetrics::from_records(&records);

    println!("\n=== Fastest ETA ===");
    println!("Average: {:.1} min", metrics.avg_fastest_eta_minutes);
    println!("Median:  {:.1} min", metrics.median_fastest_eta_minutes);
    println!("P90:     {:.1} min", metrics.p90_fastest_eta_minutes);
    println!("Overloaded hubs: {:.1}%", metrics.overloaded_share * 100.0);
    for (traffic, count) in &metrics.traffic_counts {
        println!("Traffic {traffic}: {count}");
    }

    records.sort_by(|a, b| b.fastest_eta_minutes.cmp(&a.fastest_eta_minutes));
    println!("\n=== Slowest codes ===");
    for record in records.iter().take(5) {
        println!(
            "{} -> {} in {} min ({}, {})",
            record.postal_code,
            record.fastest_hub,
            record.fastest_eta_minutes,
            record.traffic,
            record.weather
        );
    }

    let dir = export_sweep(&records, &metrics, "sweep-results", &space.fingerprint())?;
    println!("\nResults written to {}", dir.display());

    Ok(())
}
