use std::io::{BufWriter, Write};

use serde::Serialize;

use crate::error::SweepError;

pub(crate) fn write_pretty<T: Serialize + ?Sized>(
    value: &T,
    file: std::fs::File,
) -> Result<(), SweepError> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
