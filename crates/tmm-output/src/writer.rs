//! The `ExportWriter` trait implemented by all backend writers.

use crate::{OutputResult, PersonTripZoneRow};

/// Trait implemented by the CSV and Parquet writers.
pub trait ExportWriter {
    /// Write a batch of rows.
    fn write_rows(&mut self, rows: &[PersonTripZoneRow]) -> OutputResult<()>;

    /// Flush and close the underlying file.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
