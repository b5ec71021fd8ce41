//! Process-wide memoization of reference-model simulations.
//!
//! Simulation is deterministic, so a result computed once for a postal code
//! is valid forever. Entries are keyed by the effective postal code, so every
//! malformed input shares the fallback's entry.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, OnceLock};

use lru::LruCache;

use crate::params::DEFAULT_FALLBACK_POSTAL_CODE;
use crate::simulation::{effective_postal_code, simulate, SimulationResult};

/// Distinct postal codes kept in memory (~6 hubs each).
const CACHE_CAPACITY: usize = 4_096;

type SimulationCache = Mutex<LruCache<String, Arc<SimulationResult>>>;

fn get_simulation_cache() -> &'static SimulationCache {
    static CACHE: OnceLock<SimulationCache> = OnceLock::new();
    CACHE.get_or_init(|| {
        Mutex::new(LruCache::new(
            NonZeroUsize::new(CACHE_CAPACITY).expect("cache size must be non-zero"),
        ))
    })
}

/// [`simulate`] with an LRU in front of it.
pub fn simulate_cached(postal_code: &str) -> Arc<SimulationResult> {
    let key = effective_postal_code(Some(postal_code), DEFAULT_FALLBACK_POSTAL_CODE);

    let mut cache = match get_simulation_cache().lock() {
        Ok(guard) => guard,
        Err(_) => return Arc::new(simulate(key)), // Fallback: compute without cache if mutex poisoned
    };

    if let Some(hit) = cache.get(key) {
        return Arc::clone(hit);
    }
    let result = Arc::new(simulate(key));
    cache.put(key.to_string(), Arc::clone(&result));
    result
}

/// Number of postal codes currently cached.
pub fn cached_len() -> usize {
    get_simulation_cache()
        .lock()
        .map(|cache| cache.len())
        .unwrap_or(0)
}
