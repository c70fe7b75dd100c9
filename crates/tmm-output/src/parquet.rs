//! Parquet export backend (feature `parquet`).

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, UInt32Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::row::{VALUE_COLUMNS, id_column};
use crate::writer::ExportWriter;
use crate::{Geography, OutputResult, PersonTripZoneRow, TripEnd};

fn row_schema(geography: Geography, end: TripEnd) -> Arc<Schema> {
    let mut fields = vec![Field::new(id_column(geography, end), DataType::UInt32, false)];
    fields.extend(VALUE_COLUMNS.iter().map(|c| Field::new(*c, DataType::Float64, false)));
    Arc::new(Schema::new(fields))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes per-geography person-trip rows to one Parquet file.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    rows:   Option<ArrowWriter<File>>,
    schema: Arc<Schema>,
}

impl ParquetWriter {
    pub fn new(path: &Path, geography: Geography, end: TripEnd) -> OutputResult<Self> {
        let schema = row_schema(geography, end);
        let file = File::create(path)?;
        let rows = ArrowWriter::try_new(file, Arc::clone(&schema), Some(snappy_props()))?;
        Ok(Self { rows: Some(rows), schema })
    }
}

impl ExportWriter for ParquetWriter {
    fn write_rows(&mut self, rows: &[PersonTripZoneRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.rows.as_mut() else {
            return Ok(());
        };

        let mut ids = UInt32Builder::new();
        let mut values: [Float64Builder; 6] = std::array::from_fn(|_| Float64Builder::new());
        for row in rows {
            ids.append_value(row.id);
            let cells = [
                row.ptrips_base,
                row.mean_uclass_base,
                row.ptrips_test,
                row.mean_uclass_test,
                row.ptrips_diff,
                row.mean_uclass_diff,
            ];
            for (b, v) in values.iter_mut().zip(cells) {
                b.append_value(v);
            }
        }

        let mut columns: Vec<arrow::array::ArrayRef> = vec![Arc::new(ids.finish())];
        columns.extend(values.iter_mut().map(|b| Arc::new(b.finish()) as arrow::array::ArrayRef));
        let batch = RecordBatch::try_new(Arc::clone(&self.schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.rows.take() {
            w.close()?;
        }
        Ok(())
    }
}
