//! The SQLite-backed scenario store.
//!
//! A [`ScenarioStore`] is either freshly created (empty schema, ready for the
//! build pipeline) or reopened from a file a previous run built.  Writes go
//! through a [`RecordWriter`], one transaction per load stage.  Only a
//! database marked with [`ScenarioStore::mark_built`] can be reopened, so a
//! build that failed partway is never mistaken for a finished one.
//!
//! Foreign keys are switched on for every connection: a tour or trip that
//! names a missing household or person aborts its stage.

use std::path::Path;

use rusqlite::{Connection, Transaction, params};

use tmm_load::{Household, Person, PersonTour, PersonTrip, Tour, TransitSegment, Trip};

use crate::config::DbLocation;
use crate::{StoreError, StoreResult, schema};

pub struct ScenarioStore {
    conn:     Connection,
    location: DbLocation,
}

impl ScenarioStore {
    /// Create an empty scenario database.  An existing file at the location
    /// is removed first.
    pub fn create(location: &DbLocation) -> StoreResult<Self> {
        let conn = match location {
            DbLocation::Memory => Connection::open_in_memory()?,
            DbLocation::File(path) => {
                if path.exists() {
                    log::info!("removing existing database {}", path.display());
                    std::fs::remove_file(path)?;
                }
                let conn = Connection::open(path)?;
                conn.execute_batch(
                    "PRAGMA journal_mode = WAL;
                     PRAGMA synchronous  = NORMAL;",
                )?;
                conn
            }
        };
        enable_foreign_keys(&conn)?;
        schema::create(&conn)?;
        Ok(Self { conn, location: location.clone() })
    }

    /// Reopen a database built by an earlier run.
    pub fn open_existing(path: &Path) -> StoreResult<Self> {
        let not_built = || StoreError::NotBuilt(path.display().to_string());
        if !path.is_file() {
            return Err(not_built());
        }
        let conn = Connection::open(path)?;
        if !schema::is_built(&conn)? {
            return Err(not_built());
        }
        enable_foreign_keys(&conn)?;
        Ok(Self { conn, location: DbLocation::File(path.to_path_buf()) })
    }

    pub fn location(&self) -> &DbLocation {
        &self.location
    }

    /// Raw connection, for ad hoc queries.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a write transaction.
    pub fn writer(&self) -> StoreResult<RecordWriter<'_>> {
        Ok(RecordWriter { tx: self.conn.unchecked_transaction()? })
    }

    /// Mark every load stage as committed.  Called once, after the last.
    pub fn mark_built(&self) -> StoreResult<()> {
        schema::mark_built(&self.conn)
    }

    /// Flush the WAL into the main database file.
    pub fn checkpoint(&self) -> StoreResult<()> {
        if let DbLocation::File(_) = self.location {
            self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        }
        Ok(())
    }
}

fn enable_foreign_keys(conn: &Connection) -> StoreResult<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    Ok(())
}

// ── RecordWriter ──────────────────────────────────────────────────────────────

/// Inserts records inside one transaction.  Dropping without
/// [`commit`][Self::commit] rolls everything back.
pub struct RecordWriter<'c> {
    tx: Transaction<'c>,
}

impl RecordWriter<'_> {
    pub fn household(&self, h: &Household) -> StoreResult<()> {
        self.tx
            .prepare_cached("INSERT INTO Households (hh_id, sz, size) VALUES (?1, ?2, ?3)")?
            .execute(params![h.id.get(), h.subzone.get(), h.size])?;
        Ok(())
    }

    pub fn person(&self, p: &Person) -> StoreResult<()> {
        let (w, o) = (p.classes.work, p.classes.non_work);
        self.tx
            .prepare_cached(
                "INSERT INTO People \
                 (pers_id, hh_id, pers_num, age, gender, \
                  class_w_wtt, class_w_pnr, class_w_knr, class_o_wtt, class_o_pnr, class_o_knr) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?
            .execute(params![
                p.id.as_str(),
                p.hh_id.get(),
                p.person_num,
                p.age,
                p.gender,
                w.walk,
                w.pnr,
                w.knr,
                o.walk,
                o.pnr,
                o.knr,
            ])?;
        Ok(())
    }

    pub fn tour(&self, t: &Tour) -> StoreResult<()> {
        let participants =
            t.participants.iter().map(u8::to_string).collect::<Vec<_>>().join(" ");
        self.tx
            .prepare_cached(
                "INSERT INTO Tours \
                 (tour_id, hh_id, participants, pers_num, is_joint, category, purpose, \
                  sz_o, sz_d, tod_d, tod_a, mode) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )?
            .execute(params![
                t.id.as_str(),
                t.hh_id.get(),
                participants,
                t.marker.to_string(),
                t.is_joint(),
                t.category,
                t.purpose,
                t.sz_o.get(),
                t.sz_d.get(),
                t.tod_depart.get(),
                t.tod_arrive.get(),
                t.mode.code(),
            ])?;
        Ok(())
    }

    pub fn person_tour(&self, pt: &PersonTour) -> StoreResult<()> {
        self.tx
            .prepare_cached(
                "INSERT INTO PersonTours (ptour_id, tour_id, hh_id, pers_id, mode) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?
            .execute(params![
                pt.id.as_str(),
                pt.tour_id.as_str(),
                pt.hh_id.get(),
                pt.person_id.as_str(),
                pt.mode.code(),
            ])?;
        Ok(())
    }

    pub fn trip(&self, t: &Trip) -> StoreResult<()> {
        self.tx
            .prepare_cached(
                "INSERT INTO Trips \
                 (trip_id, tour_id, hh_id, pers_num, is_joint, inbound, purpose_o, purpose_d, \
                  sz_o, sz_d, zn_o, zn_d, tap_o, tap_d, tod, mode, \
                  drive_time, drive_distance, drive_speed) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
            )?
            .execute(params![
                t.id.as_str(),
                t.tour_id.as_str(),
                t.hh_id.get(),
                t.marker.to_string(),
                t.is_joint(),
                t.inbound,
                t.purpose_o,
                t.purpose_d,
                t.sz_o.get(),
                t.sz_d.get(),
                t.zn_o.get(),
                t.zn_d.get(),
                t.tap_o.get(),
                t.tap_d.get(),
                t.tod.get(),
                t.mode.code(),
                t.drive.time,
                t.drive.distance,
                t.drive.speed,
            ])?;
        Ok(())
    }

    pub fn person_trip(&self, pt: &PersonTrip) -> StoreResult<()> {
        self.tx
            .prepare_cached(
                "INSERT INTO PersonTrips \
                 (ptrip_id, ptour_id, trip_id, tour_id, hh_id, pers_id, mode, uclass) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?
            .execute(params![
                pt.id.as_str(),
                pt.person_tour_id.as_str(),
                pt.trip_id.as_str(),
                pt.tour_id.as_str(),
                pt.hh_id.get(),
                pt.person_id.as_str(),
                pt.mode.code(),
                pt.user_class,
            ])?;
        Ok(())
    }

    pub fn transit_segment(&self, s: &TransitSegment) -> StoreResult<()> {
        self.tx
            .prepare_cached(
                "INSERT INTO TransitSegs \
                 (tseg_id, tline_id, tline_desc, tseg_num, inode, jnode, tod, transit_mode, \
                  boardings, allow_boardings, passengers, pass_hrs, pass_mi) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?
            .execute(params![
                s.id,
                s.line_id,
                s.line_desc,
                s.number,
                s.i_node.get(),
                s.j_node.get(),
                s.tod.get(),
                s.mode,
                s.boardings,
                s.allow_boardings,
                s.passengers,
                s.pass_hours,
                s.pass_miles,
            ])?;
        Ok(())
    }

    pub fn commit(self) -> StoreResult<()> {
        self.tx.commit()?;
        Ok(())
    }
}
