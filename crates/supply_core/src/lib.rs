//! Hyper-local supply simulation: deterministic dark-store hubs and
//! predicted delivery ETAs for a postal code.
//!
//! The engine is a pure function of the postal code. [`geocode`] resolves the
//! code to an approximate center, [`simulation`] seeds a linear-congruential
//! sequence from the code and synthesizes one hub per catalog archetype with
//! traffic, weather and load jitter applied to a base ETA.
//!
//! ```
//! use supply_core::simulation::simulate;
//!
//! let result = simulate("560001");
//! assert_eq!(result.hubs.len(), 6);
//! assert!(result.hubs.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
//! ```

pub mod cache;
pub mod catalog;
pub mod conditions;
pub mod geocode;
pub mod params;
pub mod rng;
pub mod simulation;
pub mod spatial;
pub mod summary;

pub use geocode::{resolve, GeoPoint};
pub use params::SupplyParams;
pub use simulation::{simulate, simulate_with, HubInstance, SimulationResult};
pub use summary::SupplySummary;
