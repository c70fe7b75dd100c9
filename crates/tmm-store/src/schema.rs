//! Scenario schema: seven tables keyed by the composite string ids.

use rusqlite::Connection;

use crate::StoreResult;

/// Every table a built scenario must contain.
pub const TABLES: [&str; 7] =
    ["Households", "People", "Tours", "PersonTours", "Trips", "PersonTrips", "TransitSegs"];

const SCHEMA: &str = "
CREATE TABLE Households (
    hh_id INTEGER PRIMARY KEY,
    sz    INTEGER NOT NULL,
    size  INTEGER NOT NULL
);
CREATE TABLE People (
    pers_id     TEXT PRIMARY KEY,
    hh_id       INTEGER NOT NULL REFERENCES Households(hh_id),
    pers_num    INTEGER NOT NULL,
    age         INTEGER NOT NULL,
    gender      TEXT NOT NULL,
    class_w_wtt INTEGER NOT NULL,
    class_w_pnr INTEGER NOT NULL,
    class_w_knr INTEGER NOT NULL,
    class_o_wtt INTEGER NOT NULL,
    class_o_pnr INTEGER NOT NULL,
    class_o_knr INTEGER NOT NULL
);
CREATE TABLE Tours (
    tour_id      TEXT PRIMARY KEY,
    hh_id        INTEGER NOT NULL REFERENCES Households(hh_id),
    participants TEXT NOT NULL,
    pers_num     TEXT NOT NULL,
    is_joint     INTEGER NOT NULL,
    category     TEXT NOT NULL,
    purpose      TEXT NOT NULL,
    sz_o         INTEGER NOT NULL,
    sz_d         INTEGER NOT NULL,
    tod_d        INTEGER NOT NULL,
    tod_a        INTEGER NOT NULL,
    mode         INTEGER NOT NULL
);
CREATE TABLE PersonTours (
    ptour_id TEXT PRIMARY KEY,
    tour_id  TEXT NOT NULL REFERENCES Tours(tour_id),
    hh_id    INTEGER NOT NULL REFERENCES Households(hh_id),
    pers_id  TEXT NOT NULL REFERENCES People(pers_id),
    mode     INTEGER NOT NULL
);
CREATE TABLE Trips (
    trip_id        TEXT PRIMARY KEY,
    tour_id        TEXT NOT NULL REFERENCES Tours(tour_id),
    hh_id          INTEGER NOT NULL REFERENCES Households(hh_id),
    pers_num       TEXT NOT NULL,
    is_joint       INTEGER NOT NULL,
    inbound        INTEGER NOT NULL,
    purpose_o      TEXT NOT NULL,
    purpose_d      TEXT NOT NULL,
    sz_o           INTEGER NOT NULL,
    sz_d           INTEGER NOT NULL,
    zn_o           INTEGER NOT NULL,
    zn_d           INTEGER NOT NULL,
    tap_o          INTEGER NOT NULL,
    tap_d          INTEGER NOT NULL,
    tod            INTEGER NOT NULL,
    mode           INTEGER NOT NULL,
    drive_time     REAL NOT NULL,
    drive_distance REAL NOT NULL,
    drive_speed    REAL NOT NULL
);
CREATE TABLE PersonTrips (
    ptrip_id TEXT PRIMARY KEY,
    ptour_id TEXT NOT NULL REFERENCES PersonTours(ptour_id),
    trip_id  TEXT NOT NULL REFERENCES Trips(trip_id),
    tour_id  TEXT NOT NULL REFERENCES Tours(tour_id),
    hh_id    INTEGER NOT NULL REFERENCES Households(hh_id),
    pers_id  TEXT NOT NULL REFERENCES People(pers_id),
    mode     INTEGER NOT NULL,
    uclass   INTEGER
);
CREATE TABLE TransitSegs (
    tseg_id         TEXT NOT NULL,
    tline_id        TEXT NOT NULL,
    tline_desc      TEXT NOT NULL,
    tseg_num        INTEGER NOT NULL,
    inode           INTEGER NOT NULL,
    jnode           INTEGER NOT NULL,
    tod             INTEGER NOT NULL,
    transit_mode    TEXT NOT NULL,
    boardings       REAL NOT NULL,
    allow_boardings INTEGER NOT NULL,
    passengers      REAL NOT NULL,
    pass_hrs        REAL NOT NULL,
    pass_mi         REAL NOT NULL,
    PRIMARY KEY (tseg_id, tod)
);
CREATE INDEX PersonTrips_mode ON PersonTrips(mode);
CREATE INDEX PersonTrips_trip ON PersonTrips(trip_id);
";

/// `user_version` of a database whose every load stage committed.  A fresh
/// schema carries 0 until [`mark_built`] runs.
pub const BUILT_VERSION: i32 = 1;

pub fn create(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Record that the last load stage committed.
pub fn mark_built(conn: &Connection) -> StoreResult<()> {
    conn.pragma_update(None, "user_version", BUILT_VERSION)?;
    Ok(())
}

/// True when all seven tables exist and the build finished.
pub fn is_built(conn: &Connection) -> StoreResult<bool> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |r| r.get(0))?;
    if version != BUILT_VERSION {
        return Ok(false);
    }
    let mut stmt = conn.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    for table in TABLES {
        let n: i64 = stmt.query_row([table], |r| r.get(0))?;
        if n == 0 {
            return Ok(false);
        }
    }
    Ok(true)
}
