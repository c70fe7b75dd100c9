//! CSV export backend.
//!
//! Counts are written as whole numbers and mean user classes with four
//! decimals.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::{VALUE_COLUMNS, id_column};
use crate::writer::ExportWriter;
use crate::{Geography, OutputResult, PersonTripZoneRow, TripEnd};

/// Writes per-geography person-trip rows to one CSV file.
pub struct CsvWriter {
    rows:     Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `path` and write the header row.
    pub fn new(path: &Path, geography: Geography, end: TripEnd) -> OutputResult<Self> {
        let mut rows = Writer::from_path(path)?;
        let mut header = vec![id_column(geography, end)];
        header.extend(VALUE_COLUMNS.iter().map(|c| c.to_string()));
        rows.write_record(&header)?;
        log::debug!("writing {} rows to {}", header[0], path.display());
        Ok(Self { rows, finished: false })
    }
}

impl ExportWriter for CsvWriter {
    fn write_rows(&mut self, rows: &[PersonTripZoneRow]) -> OutputResult<()> {
        for row in rows {
            self.rows.write_record(&[
                row.id.to_string(),
                format!("{:.0}", row.ptrips_base),
                format!("{:.4}", row.mean_uclass_base),
                format!("{:.0}", row.ptrips_test),
                format!("{:.4}", row.mean_uclass_test),
                format!("{:.0}", row.ptrips_diff),
                format!("{:.4}", row.mean_uclass_diff),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rows.flush()?;
        Ok(())
    }
}
