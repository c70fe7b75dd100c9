//! `tmm-output` — scenario comparison exports.
//!
//! Two backends write the per-geography person-trip / user-class summary:
//!
//! | Feature   | Backend | Writer            |
//! |-----------|---------|-------------------|
//! | *(none)*  | CSV     | [`CsvWriter`]     |
//! | `parquet` | Parquet | `ParquetWriter`   |
//!
//! Both implement [`ExportWriter`].  The id column is named after the
//! geography and trip end (`zone_o`, `subzone_d`, ...).
//!
//! # Usage
//!
//! ```rust,ignore
//! use tmm_output::{CsvWriter, ExportWriter, Geography, TripEnd};
//!
//! let mut w = CsvWriter::new(Path::new("ptrips_zone_o.csv"), Geography::Zone, TripEnd::Origin)?;
//! w.write_rows(&rows)?;
//! w.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(test)]
mod tests;

pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::{Geography, PersonTripZoneRow, TripEnd, id_column};
pub use writer::ExportWriter;

#[cfg(feature = "parquet")]
pub use self::parquet::ParquetWriter;
