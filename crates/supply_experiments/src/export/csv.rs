use crate::error::SweepError;
use crate::metrics::SweepRecord;

pub(crate) fn export_to_csv_impl(
    records: &[SweepRecord],
    file: std::fs::File,
) -> Result<(), SweepError> {
    let mut wtr = csv::Writer::from_writer(file);

    // Header comes from the first serialized record's field names.
    for record in records {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}
