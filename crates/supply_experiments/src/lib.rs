//! Batch runs of the supply simulator over many postal codes.
//!
//! The simulator in `supply_core` answers one postal code at a time. This
//! crate sweeps it over a whole set of codes in parallel, flattens each
//! outcome into a [`SweepRecord`], aggregates them into [`SweepMetrics`] and
//! exports the lot to JSON, CSV or Parquet.
//!
//! # Quick Start
//!
//! ```no_run
//! use supply_experiments::{run_parallel_sweep, PostalCodeSpace, SweepMetrics};
//! use supply_core::SupplyParams;
//!
//! let space = PostalCodeSpace::metro_prefixes(&["001", "014"]);
//! let records = run_parallel_sweep(&space, &SupplyParams::default(), None, true)?;
//! let metrics = SweepMetrics::from_records(&records);
//! println!("median fastest ETA: {} min", metrics.median_fastest_eta_minutes);
//! # Ok::<(), supply_experiments::SweepError>(())
//! ```
//!
//! # Modules
//!
//! - [`postal_space`]: which codes to sweep (explicit, metro prefixes, random)
//! - [`runner`]: parallel execution using rayon
//! - [`metrics`]: per-code records and sweep aggregates
//! - [`export`]: JSON/CSV/Parquet output
//! - [`config`]: JSON sweep configuration

pub mod config;
pub mod error;
pub mod export;
pub mod metrics;
pub mod postal_space;
pub mod runner;

pub use config::SweepConfig;
pub use error::SweepError;
pub use export::{export_metrics_to_json, export_sweep, export_to_csv, export_to_json, export_to_parquet};
pub use metrics::{SweepMetrics, SweepRecord};
pub use postal_space::{PostalCodeSpace, SpaceSource};
pub use runner::{run_parallel_sweep, run_single};
