//! Sweep result export.
//!
//! Records can be written as JSON, CSV or Parquet; aggregates as JSON.
//! Every writer refuses an empty record set so a failed sweep never leaves
//! behind an output that looks valid.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SweepError;
use crate::metrics::{SweepMetrics, SweepRecord};

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/parquet.rs"]
mod parquet;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export sweep records to Parquet, one row per postal code.
///
/// # Errors
///
/// Returns [`SweepError::Empty`] for no records, otherwise any file or
/// Parquet writing failure.
pub fn export_to_parquet(
    records: &[SweepRecord],
    path: impl AsRef<Path>,
) -> Result<(), SweepError> {
    writer_utils::ensure_not_empty(records)?;
    let file = writer_utils::create_output_file(&path)?;
    parquet::export_to_parquet_impl(records, file)?;
    debug!(path = %path.as_ref().display(), rows = records.len(), "wrote parquet");
    Ok(())
}

/// Export sweep records as a pretty-printed JSON array.
pub fn export_to_json(records: &[SweepRecord], path: impl AsRef<Path>) -> Result<(), SweepError> {
    writer_utils::ensure_not_empty(records)?;
    let file = writer_utils::create_output_file(&path)?;
    json::write_pretty(records, file)?;
    debug!(path = %path.as_ref().display(), rows = records.len(), "wrote json");
    Ok(())
}

/// Export sweep records to CSV with a header row named after the record fields.
pub fn export_to_csv(records: &[SweepRecord], path: impl AsRef<Path>) -> Result<(), SweepError> {
    writer_utils::ensure_not_empty(records)?;
    let file = writer_utils::create_output_file(&path)?;
    csv::export_to_csv_impl(records, file)?;
    debug!(path = %path.as_ref().display(), rows = records.len(), "wrote csv");
    Ok(())
}

/// Write sweep aggregates as a JSON object.
pub fn export_metrics_to_json(
    metrics: &SweepMetrics,
    path: impl AsRef<Path>,
) -> Result<(), SweepError> {
    if metrics.postal_codes == 0 {
        return Err(SweepError::Empty);
    }
    let file = writer_utils::create_output_file(&path)?;
    json::write_pretty(metrics, file)
}

/// Write every export format for one sweep into `output_dir/<fingerprint prefix>/`.
///
/// Returns the directory the files were written to.
pub fn export_sweep(
    records: &[SweepRecord],
    metrics: &SweepMetrics,
    output_dir: impl AsRef<Path>,
    fingerprint: &str,
) -> Result<PathBuf, SweepError> {
    writer_utils::ensure_not_empty(records)?;
    let prefix = fingerprint.get(..12).unwrap_or(fingerprint);
    let dir = output_dir.as_ref().join(format!("sweep-{prefix}"));
    fs::create_dir_all(&dir)?;

    export_to_json(records, dir.join("records.json"))?;
    export_to_csv(records, dir.join("records.csv"))?;
    export_to_parquet(records, dir.join("records.parquet"))?;
    export_metrics_to_json(metrics, dir.join("metrics.json"))?;

    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_single;
    use supply_core::params::SupplyParams;
    use tempfile::tempdir;

    fn records() -> Vec<SweepRecord> {
        ["560001", "400001", "110001"]
            .iter()
            .map(|code| run_single(code, &SupplyParams::default()))
            .collect()
    }

    #[test]
    fn empty_records_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        assert!(matches!(export_to_json(&[], &path), Err(SweepError::Empty)));
        assert!(matches!(
            export_to_csv(&[], dir.path().join("out.csv")),
            Err(SweepError::Empty)
        ));
        assert!(matches!(
            export_to_parquet(&[], dir.path().join("out.parquet")),
            Err(SweepError::Empty)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn json_export_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        let records = records();
        export_to_json(&records, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<SweepRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), records.len());
        assert_eq!(parsed[0].postal_code, "560001");
        assert_eq!(parsed[0].fastest_eta_minutes, 6);
    }

    #[test]
    fn csv_export_has_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.csv");
        export_to_csv(&records(), &path).unwrap();

        let mut reader = ::csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("postal_code"));
        assert!(headers.iter().any(|h| h == "fastest_eta_minutes"));
        assert_eq!(reader.records().count(), 3);
    }

    #[test]
    fn parquet_export_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.parquet");
        export_to_parquet(&records(), &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn metrics_export_skips_empty_sweeps() {
        let dir = tempdir().unwrap();
        let empty = SweepMetrics::from_records(&[]);
        assert!(matches!(
            export_metrics_to_json(&empty, dir.path().join("m.json")),
            Err(SweepError::Empty)
        ));

        let path = dir.path().join("metrics.json");
        export_metrics_to_json(&SweepMetrics::from_records(&records()), &path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["postal_codes"], 3);
    }

    #[test]
    fn sweep_export_writes_all_formats() {
        let dir = tempdir().unwrap();
        let records = records();
        let metrics = SweepMetrics::from_records(&records);
        let out = export_sweep(&records, &metrics, dir.path(), "0123456789abcdef").unwrap();

        assert_eq!(out, dir.path().join("sweep-0123456789ab"));
        for name in ["records.json", "records.csv", "records.parquet", "metrics.json"] {
            assert!(out.join(name).exists(), "missing {name}");
        }
    }
}
