//! Parallel sweep execution using rayon.
//!
//! Each postal code is simulated independently; the simulator is pure, so no
//! state is shared between workers.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use supply_core::params::SupplyParams;
use supply_core::simulation::simulate_with;
use tracing::info;

use crate::error::SweepError;
use crate::metrics::SweepRecord;
use crate::postal_space::PostalCodeSpace;

/// Simulate one postal code and flatten the outcome.
pub fn run_single(postal_code: &str, params: &SupplyParams) -> SweepRecord {
    SweepRecord::from_result(&simulate_with(postal_code, params))
}

/// Simulate every code in `space` in parallel.
///
/// # Arguments
///
/// * `space` - Postal codes to simulate
/// * `params` - Model parameters, validated before any work starts
/// * `num_threads` - Optional number of threads to use. If None, uses rayon's default.
/// * `show_progress` - Whether to display a progress bar
///
/// # Returns
///
/// One record per postal code, in the same order as `space`.
pub fn run_parallel_sweep(
    space: &PostalCodeSpace,
    params: &SupplyParams,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<SweepRecord>, SweepError> {
    params.validate()?;

    let total = space.len();
    let pb = if show_progress && total > 0 {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    info!(
        postal_codes = total,
        threads = pool.current_num_threads(),
        "starting supply sweep"
    );

    let records: Vec<SweepRecord> = pool.install(|| {
        space
            .codes()
            .par_iter()
            .map(|code| {
                let record = run_single(code, params);
                if let Some(progress_bar) = &pb {
                    progress_bar.inc(1);
                }
                record
            })
            .collect()
    });

    if let Some(progress_bar) = &pb {
        progress_bar.finish_with_message("Completed");
    }
    info!(records = records.len(), "supply sweep finished");

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use supply_core::params::ParamsError;

    #[test]
    fn sweep_preserves_order_and_length() {
        let space = PostalCodeSpace::from_codes(["700091", "560001", "400001"]);
        let records =
            run_parallel_sweep(&space, &SupplyParams::default(), Some(2), false).expect("sweep");

        let codes: Vec<_> = records.iter().map(|r| r.postal_code.as_str()).collect();
        assert_eq!(codes, vec!["700091", "560001", "400001"]);
    }

    #[test]
    fn sweep_matches_single_runs() {
        let space = PostalCodeSpace::sample_random(25, 9);
        let params = SupplyParams::default();
        let records = run_parallel_sweep(&space, &params, None, false).expect("sweep");
        for (code, record) in space.codes().iter().zip(&records) {
            assert_eq!(record, &run_single(code, &params));
        }
    }

    #[test]
    fn sweep_rejects_invalid_params() {
        let space = PostalCodeSpace::from_codes(["560001"]);
        let params = SupplyParams::default().with_offline_probability(2.0);
        let err = run_parallel_sweep(&space, &params, Some(1), false).expect_err("invalid");
        assert!(matches!(
            err,
            SweepError::Params(ParamsError::OfflineProbability(_))
        ));
    }

    #[test]
    fn empty_space_yields_no_records() {
        let records = run_parallel_sweep(
            &PostalCodeSpace::default(),
            &SupplyParams::default(),
            Some(1),
            false,
        )
        .expect("sweep");
        assert!(records.is_empty());
    }
}
