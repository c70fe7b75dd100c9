//! Typed read queries over a built scenario.
//!
//! Every query returns raw (sampled) counts; unsampling happens one layer up,
//! in `tmm-stats`.  Stratification is restricted to the join paths in
//! [`StratifyBy`], so no SQL is ever assembled from caller-supplied text.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use rusqlite::types::ValueRef;

use tmm_core::{Mode, NodeNumber, RawCount};

use crate::{ScenarioStore, StoreError, StoreResult};

/// Any scenario table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Households,
    People,
    Tours,
    PersonTours,
    Trips,
    PersonTrips,
    TransitSegs,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Households  => "Households",
            Table::People      => "People",
            Table::Tours       => "Tours",
            Table::PersonTours => "PersonTours",
            Table::Trips       => "Trips",
            Table::PersonTrips => "PersonTrips",
            Table::TransitSegs => "TransitSegs",
        }
    }
}

/// A table with a `mode` column and an individual/joint split.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ModeTable {
    #[default]
    Trips,
    Tours,
}

impl ModeTable {
    pub fn name(self) -> &'static str {
        match self {
            ModeTable::Trips => "Trips",
            ModeTable::Tours => "Tours",
        }
    }
}

/// Who counts as one traveler when tallying trips per traveler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TravelUnit {
    /// Household plus person marker; a household's joint trips form a single
    /// `J` traveler.
    Trips,
    /// One traveler per person.
    PersonTrips,
}

// ── Stratification ────────────────────────────────────────────────────────────

/// Tables reachable from `PersonTrips` by a single key join.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum JoinPath {
    Trips,
    Tours,
    Households,
    People,
    PersonTours,
}

impl JoinPath {
    fn table(self) -> &'static str {
        match self {
            JoinPath::Trips       => "Trips",
            JoinPath::Tours       => "Tours",
            JoinPath::Households  => "Households",
            JoinPath::People      => "People",
            JoinPath::PersonTours => "PersonTours",
        }
    }

    fn clause(self) -> &'static str {
        match self {
            JoinPath::Trips       => "LEFT JOIN Trips ON PersonTrips.trip_id = Trips.trip_id",
            JoinPath::Tours       => "LEFT JOIN Tours ON PersonTrips.tour_id = Tours.tour_id",
            JoinPath::Households  => "LEFT JOIN Households ON PersonTrips.hh_id = Households.hh_id",
            JoinPath::People      => "LEFT JOIN People ON PersonTrips.pers_id = People.pers_id",
            JoinPath::PersonTours => "LEFT JOIN PersonTours ON PersonTrips.ptour_id = PersonTours.ptour_id",
        }
    }
}

/// Field that person-trip tallies can be grouped by.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StratifyBy {
    TripOriginZone,
    TripDestZone,
    TripOriginSubzone,
    TripDestSubzone,
    TripTod,
    TripDestPurpose,
    TourPurpose,
    TourCategory,
    HouseholdSubzone,
    HouseholdSize,
    PersonGender,
    PersonAge,
    PersonTourMode,
}

impl StratifyBy {
    pub fn join(self) -> JoinPath {
        match self {
            StratifyBy::TripOriginZone
            | StratifyBy::TripDestZone
            | StratifyBy::TripOriginSubzone
            | StratifyBy::TripDestSubzone
            | StratifyBy::TripTod
            | StratifyBy::TripDestPurpose => JoinPath::Trips,
            StratifyBy::TourPurpose | StratifyBy::TourCategory => JoinPath::Tours,
            StratifyBy::HouseholdSubzone | StratifyBy::HouseholdSize => JoinPath::Households,
            StratifyBy::PersonGender | StratifyBy::PersonAge => JoinPath::People,
            StratifyBy::PersonTourMode => JoinPath::PersonTours,
        }
    }

    /// Column within the joined table.
    pub fn column(self) -> &'static str {
        match self {
            StratifyBy::TripOriginZone    => "zn_o",
            StratifyBy::TripDestZone      => "zn_d",
            StratifyBy::TripOriginSubzone => "sz_o",
            StratifyBy::TripDestSubzone   => "sz_d",
            StratifyBy::TripTod           => "tod",
            StratifyBy::TripDestPurpose   => "purpose_d",
            StratifyBy::TourPurpose       => "purpose",
            StratifyBy::TourCategory      => "category",
            StratifyBy::HouseholdSubzone  => "sz",
            StratifyBy::HouseholdSize     => "size",
            StratifyBy::PersonGender      => "gender",
            StratifyBy::PersonAge         => "age",
            StratifyBy::PersonTourMode    => "mode",
        }
    }

    fn qualified(self) -> String {
        format!("{}.{}", self.join().table(), self.column())
    }
}

impl fmt::Display for StratifyBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// One value of a stratification field.
///
/// Variants order as declared, so integer strata sort before real ones and
/// both sort numerically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stratum {
    /// The join found no row.
    Missing,
    Int(i64),
    Real(RealKey),
    Text(String),
}

impl Stratum {
    pub(crate) fn from_sql(value: ValueRef<'_>) -> Stratum {
        match value {
            ValueRef::Null => Stratum::Missing,
            ValueRef::Integer(i) => Stratum::Int(i),
            ValueRef::Real(r) => Stratum::Real(RealKey(r)),
            ValueRef::Text(t) | ValueRef::Blob(t) => Stratum::Text(String::from_utf8_lossy(t).into_owned()),
        }
    }
}

/// An `f64` usable as a map key: equality, hashing and ordering follow
/// [`f64::total_cmp`].
#[derive(Copy, Clone, Debug)]
pub struct RealKey(pub f64);

impl PartialEq for RealKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RealKey {}

impl PartialOrd for RealKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RealKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for RealKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Stratum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stratum::Missing => f.write_str("-"),
            Stratum::Int(i) => write!(f, "{i}"),
            Stratum::Real(r) => write!(f, "{}", r.0),
            Stratum::Text(s) => f.write_str(s),
        }
    }
}

// ── Result rows ───────────────────────────────────────────────────────────────

/// Assignment totals for one transit sub-mode.
#[derive(Clone, Debug, PartialEq)]
pub struct SubModeTotals {
    pub mode:       String,
    pub boardings:  f64,
    pub pass_miles: f64,
    pub pass_hours: f64,
}

/// Transit person-trips of one user class within one stratum.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassCount {
    pub stratum:    Option<Stratum>,
    pub user_class: u8,
    pub count:      RawCount,
}

/// Trips of one mode made by one traveler.
#[derive(Clone, Debug, PartialEq)]
pub struct TravelerModeCount {
    pub traveler: String,
    pub mode:     Mode,
    pub count:    RawCount,
}

// ── Queries ───────────────────────────────────────────────────────────────────

fn raw(n: i64) -> RawCount {
    RawCount(n.max(0) as u64)
}

fn mode(code: i64) -> StoreResult<Mode> {
    Ok(Mode::from_code(code)?)
}

impl ScenarioStore {
    pub fn count(&self, table: Table) -> StoreResult<RawCount> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let n: i64 = self.connection().query_row(&sql, [], |r| r.get(0))?;
        Ok(raw(n))
    }

    pub fn count_joint(&self, table: ModeTable, is_joint: bool) -> StoreResult<RawCount> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE is_joint = ?1", table.name());
        let n: i64 = self.connection().query_row(&sql, [is_joint], |r| r.get(0))?;
        Ok(raw(n))
    }

    /// Row count for every one of the 14 modes, in code order.  Modes with
    /// no rows report zero.
    pub fn mode_counts(&self, table: ModeTable) -> StoreResult<Vec<(Mode, RawCount)>> {
        let mut counts: Vec<(Mode, RawCount)> = Mode::ALL.iter().map(|&m| (m, RawCount(0))).collect();
        let sql = format!("SELECT mode, COUNT(*) FROM {} GROUP BY mode", table.name());
        let mut stmt = self.connection().prepare(&sql)?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, i64>(1)?)))?;
        for row in rows {
            let (code, n) = row?;
            let m = mode(code)?;
            counts[m.code() as usize - 1].1 = raw(n);
        }
        Ok(counts)
    }

    /// Boardings, passenger-miles and passenger-hours per sub-mode letter,
    /// ordered by letter.  Sub-modes absent from the assignment are omitted.
    pub fn transit_totals(&self) -> StoreResult<Vec<SubModeTotals>> {
        let mut stmt = self.connection().prepare(
            "SELECT transit_mode, SUM(boardings), SUM(pass_mi), SUM(pass_hrs) \
             FROM TransitSegs GROUP BY transit_mode ORDER BY transit_mode",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(SubModeTotals {
                mode:       r.get(0)?,
                boardings:  r.get(1)?,
                pass_miles: r.get(2)?,
                pass_hours: r.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Boardings at each boarding node (stations), ordered by node.
    pub fn boardings_by_node(&self) -> StoreResult<Vec<(NodeNumber, f64)>> {
        let mut stmt = self.connection().prepare(
            "SELECT inode, SUM(boardings) FROM TransitSegs \
             WHERE allow_boardings = 1 GROUP BY inode ORDER BY inode",
        )?;
        let rows = stmt.query_map([], |r| Ok((NodeNumber(r.get(0)?), r.get(1)?)))?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Boardings on each transit line (vehicles), ordered by line id.
    pub fn boardings_by_line(&self) -> StoreResult<Vec<(String, f64)>> {
        let mut stmt = self.connection().prepare(
            "SELECT tline_id, SUM(boardings) FROM TransitSegs \
             WHERE allow_boardings = 1 GROUP BY tline_id ORDER BY tline_id",
        )?;
        let rows = stmt.query_map([], |r| Ok((r.get(0)?, r.get(1)?)))?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Every distinct value of `by` in its own table, ascending.
    pub fn strata(&self, by: StratifyBy) -> StoreResult<Vec<Stratum>> {
        let sql = format!(
            "SELECT DISTINCT {col} FROM {table} ORDER BY {col}",
            col = by.column(),
            table = by.join().table(),
        );
        let mut stmt = self.connection().prepare(&sql)?;
        let rows = stmt.query_map([], |r| Ok(Stratum::from_sql(r.get_ref(0)?)))?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Transit person-trips (modes 9–12) per user class, optionally grouped
    /// by a stratification field.
    pub fn ptrips_by_class(&self, by: Option<StratifyBy>) -> StoreResult<Vec<ClassCount>> {
        let sql = match by {
            None => "SELECT NULL, uclass, COUNT(*) FROM PersonTrips \
                     WHERE mode IN (9, 10, 11, 12) GROUP BY uclass ORDER BY uclass"
                .to_string(),
            Some(by) => format!(
                "SELECT {field}, PersonTrips.uclass, COUNT(*) FROM PersonTrips {join} \
                 WHERE PersonTrips.mode IN (9, 10, 11, 12) \
                 GROUP BY {field}, PersonTrips.uclass ORDER BY {field}, PersonTrips.uclass",
                field = by.qualified(),
                join = by.join().clause(),
            ),
        };

        let mut stmt = self.connection().prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let stratum = by.map(|_| r.get_ref(0).map(Stratum::from_sql)).transpose()?;
            let class: i64 = r.get(1)?;
            let user_class = u8::try_from(class)
                .map_err(|_| StoreError::BadColumn { column: "uclass", value: class })?;
            out.push(ClassCount { stratum, user_class, count: raw(r.get(2)?) });
        }
        Ok(out)
    }

    /// Trip counts per traveler and mode.
    pub fn traveler_mode_counts(&self, unit: TravelUnit) -> StoreResult<Vec<TravelerModeCount>> {
        let sql = match unit {
            TravelUnit::Trips => {
                "SELECT hh_id || '-' || pers_num AS traveler, mode, COUNT(*) \
                 FROM Trips GROUP BY traveler, mode"
            }
            TravelUnit::PersonTrips => {
                "SELECT pers_id, mode, COUNT(*) FROM PersonTrips GROUP BY pers_id, mode"
            }
        };
        let mut stmt = self.connection().prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(TravelerModeCount {
                traveler: r.get(0)?,
                mode:     mode(r.get(1)?)?,
                count:    raw(r.get(2)?),
            });
        }
        Ok(out)
    }
}
