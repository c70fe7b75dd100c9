//! Streaming CT-RAMP CSV loaders.
//!
//! # CSV formats
//!
//! Only the columns listed here are read; any others are ignored.
//!
//! | File                  | Columns                                                        |
//! |-----------------------|----------------------------------------------------------------|
//! | `hhData_1.csv`        | `hh_id, maz, size`                                             |
//! | `personData_1.csv`    | `hh_id, person_num, age, gender, user_class_{work,non_work}_{walk,pnr,knr}` |
//! | `*TourData_1.csv`     | `hh_id, person_num¹, tour_participants², tour_id, tour_purpose, tour_category, orig_maz, dest_maz, depart_period, arrive_period, tour_mode` |
//! | `*TripData_1.csv`     | `hh_id, person_num¹, tour_id, tour_purpose, inbound, stop_id, orig_purpose, dest_purpose, orig_maz, dest_maz, orig_taz, dest_taz, board_tap, alight_tap, stop_period, trip_mode` |
//!
//! ¹ individual files only.  ² joint tour file only (space-separated person
//! numbers).
//!
//! Every loader returns an iterator so a caller can insert rows as they are
//! parsed.  The first malformed row ends the load with an error carrying its
//! line number.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use tmm_core::{
    HouseholdId, Mode, Participant, PeriodMap, PersonId, SubzoneId, TapId, TourId, TripId, ZoneId,
};

use crate::derive::DriveCalculator;
use crate::records::{AccessClasses, DriveMetrics, Household, Person, Tour, Trip, UserClasses};
use crate::{LoadError, LoadResult};

/// Normalize a categorical string for grouping: lower-case, with hyphens and
/// spaces removed.
pub fn clean_str(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Open a source file, tagging a failure with its path.
pub fn open(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|e| LoadError::Io(e).in_file(path))
}

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct HouseholdRecord {
    hh_id: u32,
    maz:   u32,
    size:  u32,
}

#[derive(Deserialize)]
struct PersonRecord {
    hh_id:                    u32,
    person_num:               u8,
    age:                      u32,
    gender:                   String,
    user_class_work_walk:     u8,
    user_class_work_pnr:      u8,
    user_class_work_knr:      u8,
    user_class_non_work_walk: u8,
    user_class_non_work_pnr:  u8,
    user_class_non_work_knr:  u8,
}

#[derive(Deserialize)]
struct TourRecord {
    hh_id:             u32,
    #[serde(default)]
    person_num:        Option<u8>,
    #[serde(default)]
    tour_participants: Option<String>,
    tour_id:           u32,
    tour_purpose:      String,
    tour_category:     String,
    orig_maz:          u32,
    dest_maz:          u32,
    depart_period:     i64,
    arrive_period:     i64,
    tour_mode:         i64,
}

#[derive(Deserialize)]
struct TripRecord {
    hh_id:        u32,
    #[serde(default)]
    person_num:   Option<u8>,
    tour_id:      u32,
    tour_purpose: String,
    inbound:      u8,
    stop_id:      i64,
    orig_purpose: String,
    dest_purpose: String,
    orig_maz:     u32,
    dest_maz:     u32,
    orig_taz:     u32,
    dest_taz:     u32,
    board_tap:    u32,
    alight_tap:   u32,
    stop_period:  i64,
    trip_mode:    i64,
}

/// Deserialize every row of `reader` as `T`, paired with its line number.
fn rows<R: Read, T: DeserializeOwned>(
    reader: R,
) -> LoadResult<impl Iterator<Item = LoadResult<(u64, T)>>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    Ok(csv_reader.into_records().map(move |result| -> LoadResult<(u64, T)> {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let row = record.deserialize::<T>(Some(&headers))?;
        Ok((line, row))
    }))
}

// ── Public API ────────────────────────────────────────────────────────────────

pub fn households<R: Read>(reader: R) -> LoadResult<impl Iterator<Item = LoadResult<Household>>> {
    Ok(rows::<R, HouseholdRecord>(reader)?.map(|row| -> LoadResult<Household> {
        let (_, r) = row?;
        Ok(Household { id: HouseholdId(r.hh_id), subzone: SubzoneId(r.maz), size: r.size })
    }))
}

pub fn people<R: Read>(reader: R) -> LoadResult<impl Iterator<Item = LoadResult<Person>>> {
    Ok(rows::<R, PersonRecord>(reader)?.map(|row| -> LoadResult<Person> {
        let (_, r) = row?;
        let hh_id = HouseholdId(r.hh_id);
        Ok(Person {
            id: PersonId::new(hh_id, r.person_num),
            hh_id,
            person_num: r.person_num,
            age: r.age,
            gender: clean_str(&r.gender),
            classes: UserClasses {
                work:     AccessClasses {
                    walk: r.user_class_work_walk,
                    pnr:  r.user_class_work_pnr,
                    knr:  r.user_class_work_knr,
                },
                non_work: AccessClasses {
                    walk: r.user_class_non_work_walk,
                    pnr:  r.user_class_non_work_pnr,
                    knr:  r.user_class_non_work_knr,
                },
            },
        })
    }))
}

/// Individual (`is_joint = false`) or joint tours.
pub fn tours<'a, R: Read + 'a>(
    reader:   R,
    is_joint: bool,
    periods:  &'a PeriodMap,
) -> LoadResult<impl Iterator<Item = LoadResult<Tour>> + 'a> {
    Ok(rows::<R, TourRecord>(reader)?.map(move |row| -> LoadResult<Tour> {
        let (line, r) = row?;
        let code = |source| LoadError::Code { line, source };
        let hh_id = HouseholdId(r.hh_id);

        let (marker, participants) = if is_joint {
            let list = r
                .tour_participants
                .ok_or(LoadError::MissingField { line, column: "tour_participants" })?;
            (Participant::Joint, parse_participants(&list, line)?)
        } else {
            let n = r.person_num.ok_or(LoadError::MissingField { line, column: "person_num" })?;
            (Participant::Person(n), vec![n])
        };

        let purpose = clean_str(&r.tour_purpose);
        Ok(Tour {
            id: TourId::new(hh_id, marker, r.tour_id, &purpose),
            hh_id,
            participants,
            marker,
            category: clean_str(&r.tour_category),
            purpose,
            sz_o: SubzoneId(r.orig_maz),
            sz_d: SubzoneId(r.dest_maz),
            tod_depart: periods.tod(r.depart_period).map_err(code)?,
            tod_arrive: periods.tod(r.arrive_period).map_err(code)?,
            mode: Mode::from_code(r.tour_mode).map_err(code)?,
        })
    }))
}

/// Individual (`is_joint = false`) or joint trips, with drive metrics
/// derived from `drive`.
pub fn trips<'a, R: Read + 'a>(
    reader:   R,
    is_joint: bool,
    periods:  &'a PeriodMap,
    drive:    &'a DriveCalculator<'a>,
) -> LoadResult<impl Iterator<Item = LoadResult<Trip>> + 'a> {
    Ok(rows::<R, TripRecord>(reader)?.map(move |row| -> LoadResult<Trip> {
        let (line, r) = row?;
        let code = |source| LoadError::Code { line, source };
        let hh_id = HouseholdId(r.hh_id);

        let marker = if is_joint {
            Participant::Joint
        } else {
            Participant::Person(
                r.person_num.ok_or(LoadError::MissingField { line, column: "person_num" })?,
            )
        };
        let inbound = match r.inbound {
            0 => false,
            1 => true,
            n => return Err(LoadError::Parse { line, message: format!("inbound must be 0 or 1, got {n}") }),
        };
        // Source stop ids start at -1.
        let stop = u32::try_from(r.stop_id + 1)
            .map_err(|_| LoadError::Parse { line, message: format!("invalid stop_id {}", r.stop_id) })?;

        let tour_id = TourId::new(hh_id, marker, r.tour_id, &clean_str(&r.tour_purpose));
        let mut trip = Trip {
            id: TripId::new(&tour_id, inbound, stop),
            tour_id,
            hh_id,
            marker,
            inbound,
            purpose_o: clean_str(&r.orig_purpose),
            purpose_d: clean_str(&r.dest_purpose),
            sz_o: SubzoneId(r.orig_maz),
            sz_d: SubzoneId(r.dest_maz),
            zn_o: ZoneId(r.orig_taz),
            zn_d: ZoneId(r.dest_taz),
            tap_o: TapId(r.board_tap),
            tap_d: TapId(r.alight_tap),
            tod: periods.tod(r.stop_period).map_err(code)?,
            mode: Mode::from_code(r.trip_mode).map_err(code)?,
            drive: DriveMetrics::NONE,
        };
        trip.drive = drive.metrics(&trip)?;
        Ok(trip)
    }))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_participants(list: &str, line: u64) -> LoadResult<Vec<u8>> {
    list.split_whitespace()
        .map(|p| {
            p.parse::<u8>().map_err(|_| LoadError::Parse {
                line,
                message: format!("invalid tour participant {p:?}"),
            })
        })
        .collect()
}
