use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::SweepError;
use crate::metrics::SweepRecord;

pub(crate) fn export_to_parquet_impl(
    records: &[SweepRecord],
    file: std::fs::File,
) -> Result<(), SweepError> {
    let batch = build_record_batch(records)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn build_record_batch(records: &[SweepRecord]) -> Result<RecordBatch, arrow::error::ArrowError> {
    let schema = Arc::new(parquet_schema());
    let arrays = build_arrays(records);

    RecordBatch::try_new(schema, arrays)
}

fn parquet_schema() -> Schema {
    Schema::new(vec![
        Field::new("postal_code", DataType::Utf8, false),
        Field::new("seed", DataType::UInt64, false),
        Field::new("center_lat", DataType::Float64, false),
        Field::new("center_lng", DataType::Float64, false),
        Field::new("center_cell", DataType::Utf8, false),
        Field::new("traffic", DataType::Utf8, false),
        Field::new("weather", DataType::Utf8, false),
        Field::new("total_hubs", DataType::UInt64, false),
        Field::new("active_hubs", DataType::UInt64, false),
        Field::new("overloaded_hubs", DataType::UInt64, false),
        Field::new("nearest_hub", DataType::Utf8, false),
        Field::new("nearest_distance_km", DataType::Float64, false),
        Field::new("fastest_hub", DataType::Utf8, false),
        Field::new("fastest_eta_minutes", DataType::UInt32, false),
        Field::new("mean_eta_minutes", DataType::Float64, false),
    ])
}

fn build_arrays(records: &[SweepRecord]) -> Vec<ArrayRef> {
    let strings = |f: fn(&SweepRecord) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(records.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&SweepRecord) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
    };
    let counts = |f: fn(&SweepRecord) -> usize| -> ArrayRef {
        Arc::new(UInt64Array::from(
            records.iter().map(|r| f(r) as u64).collect::<Vec<_>>(),
        ))
    };

    vec![
        strings(|r| r.postal_code.as_str()),
        Arc::new(UInt64Array::from(
            records.iter().map(|r| r.seed).collect::<Vec<_>>(),
        )),
        floats(|r| r.center_lat),
        floats(|r| r.center_lng),
        strings(|r| r.center_cell.as_str()),
        strings(|r| r.traffic.as_str()),
        strings(|r| r.weather.as_str()),
        counts(|r| r.total_hubs),
        counts(|r| r.active_hubs),
        counts(|r| r.overloaded_hubs),
        strings(|r| r.nearest_hub.as_str()),
        floats(|r| r.nearest_distance_km),
        strings(|r| r.fastest_hub.as_str()),
        Arc::new(UInt32Array::from(
            records
                .iter()
                .map(|r| r.fastest_eta_minutes)
                .collect::<Vec<_>>(),
        )),
        floats(|r| r.mean_eta_minutes),
    ]
}
