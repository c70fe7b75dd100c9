//! Unit tests for tmm-output.

#[cfg(test)]
mod rows {
    use crate::{Geography, PersonTripZoneRow, TripEnd, id_column};

    #[test]
    fn differences_are_test_minus_base() {
        let row = PersonTripZoneRow::new(7, 100.0, 1.5, 80.0, 2.0);
        assert_eq!(row.ptrips_diff, -20.0);
        assert_eq!(row.mean_uclass_diff, 0.5);
    }

    #[test]
    fn id_column_names() {
        assert_eq!(id_column(Geography::Zone, TripEnd::Origin), "zone_o");
        assert_eq!(id_column(Geography::Subzone, TripEnd::Destination), "subzone_d");
    }
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::PersonTripZoneRow;
    use crate::writer::ExportWriter;
    use crate::{Geography, TripEnd};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_header_correct() {
        let dir = tmp();
        let path = dir.path().join("ptrips.csv");
        let mut w = CsvWriter::new(&path, Geography::Subzone, TripEnd::Destination).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(
            headers,
            [
                "subzone_d",
                "ptrips_base",
                "mean_uclass_base",
                "ptrips_test",
                "mean_uclass_test",
                "ptrips_diff",
                "mean_uclass_diff",
            ]
        );
    }

    #[test]
    fn csv_number_formatting() {
        let dir = tmp();
        let path = dir.path().join("ptrips.csv");
        let mut w = CsvWriter::new(&path, Geography::Zone, TripEnd::Origin).unwrap();
        w.write_rows(&[
            PersonTripZoneRow::new(1, 40.0, 2.5, 60.0, 2.0),
            PersonTripZoneRow::new(2, 0.0, 0.0, 0.0, 0.0),
        ])
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].iter().collect::<Vec<_>>(),
            ["1", "40", "2.5000", "60", "2.0000", "20", "-0.5000"]
        );
        assert_eq!(&rows[1][2], "0.0000");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(&dir.path().join("p.csv"), Geography::Zone, TripEnd::Origin).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use crate::parquet::ParquetWriter;
    use crate::row::PersonTripZoneRow;
    use crate::writer::ExportWriter;
    use crate::{Geography, TripEnd};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_round_trip() {
        let dir = tmp();
        let path = dir.path().join("ptrips.parquet");
        let mut w = ParquetWriter::new(&path, Geography::Zone, TripEnd::Destination).unwrap();
        let rows: Vec<_> = (1..=3).map(|id| PersonTripZoneRow::new(id, 10.0, 1.0, 12.0, 1.5)).collect();
        w.write_rows(&rows).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();
        let total_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
        assert_eq!(total_rows, 3);

        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names[0], "zone_d");
        assert_eq!(names.len(), 7);
        assert_eq!(*schema.field_with_name("zone_d").unwrap().data_type(), DataType::UInt32);
        assert_eq!(*schema.field_with_name("ptrips_diff").unwrap().data_type(), DataType::Float64);
    }
}
