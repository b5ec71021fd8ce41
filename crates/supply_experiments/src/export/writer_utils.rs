use std::fs::File;
use std::path::Path;

use crate::error::SweepError;

pub(crate) fn ensure_not_empty<T>(items: &[T]) -> Result<(), SweepError> {
    if items.is_empty() {
        return Err(SweepError::Empty);
    }

    Ok(())
}

pub(crate) fn create_output_file(path: impl AsRef<Path>) -> Result<File, SweepError> {
    Ok(File::create(path)?)
}
