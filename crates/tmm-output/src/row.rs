//! Plain data row types written by the export backends.

use std::fmt;

/// Spatial unit of a per-geography export.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Geography {
    Zone,
    Subzone,
}

impl Geography {
    pub fn name(self) -> &'static str {
        match self {
            Geography::Zone    => "zone",
            Geography::Subzone => "subzone",
        }
    }
}

impl fmt::Display for Geography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which end of a trip is keyed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TripEnd {
    Origin,
    Destination,
}

impl TripEnd {
    /// `o` or `d`, as used in column names.
    pub fn letter(self) -> char {
        match self {
            TripEnd::Origin      => 'o',
            TripEnd::Destination => 'd',
        }
    }
}

/// Name of the id column, e.g. `zone_o`.
pub fn id_column(geography: Geography, end: TripEnd) -> String {
    format!("{}_{}", geography.name(), end.letter())
}

/// Base/test transit person-trips and mean user class for one zone or
/// subzone.  Mean user class is 0 where there are no trips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonTripZoneRow {
    pub id:               u32,
    pub ptrips_base:      f64,
    pub mean_uclass_base: f64,
    pub ptrips_test:      f64,
    pub mean_uclass_test: f64,
    pub ptrips_diff:      f64,
    pub mean_uclass_diff: f64,
}

impl PersonTripZoneRow {
    /// Fill in the differences (test minus base).
    pub fn new(id: u32, ptrips_base: f64, mean_uclass_base: f64, ptrips_test: f64, mean_uclass_test: f64) -> Self {
        Self {
            id,
            ptrips_base,
            mean_uclass_base,
            ptrips_test,
            mean_uclass_test,
            ptrips_diff:      ptrips_test - ptrips_base,
            mean_uclass_diff: mean_uclass_test - mean_uclass_base,
        }
    }
}

/// Column names after the id column.
pub const VALUE_COLUMNS: [&str; 6] = [
    "ptrips_base",
    "mean_uclass_base",
    "ptrips_test",
    "mean_uclass_test",
    "ptrips_diff",
    "mean_uclass_diff",
];
