//! Transit assignment segments.
//!
//! The assignment network lives in an external database with one scenario per
//! time of day (`101` … `108` for the CMAP model).  [`TransitAssignmentSource`]
//! hands back the raw segments of one scenario; [`load_transit_segments`]
//! walks all eight and derives passenger-hours and passenger-miles.
//!
//! # CSV export format
//!
//! [`CsvAssignmentSource`] reads `transit_segments_{scenario}.csv`.  Empty
//! `inode`/`jnode` cells mark segments whose end nodes did not resolve.
//!
//! ```csv
//! tseg_id,tline_id,tline_desc,tseg_num,inode,jnode,transit_mode,boardings,allow_boardings,volume,transit_time,length
//! bm1-1,bm1,MED-LINE,1,30001,30002,M,120.5,1,800.0,4.5,2.1
//! ```

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;

use tmm_core::{ModelTables, NodeNumber, Tod};

use crate::records::TransitSegment;
use crate::{LoadError, LoadResult};

/// A segment as stored in the assignment network.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawSegment {
    #[serde(rename = "tseg_id")]
    pub id:              String,
    #[serde(rename = "tline_id")]
    pub line_id:         String,
    #[serde(rename = "tline_desc")]
    pub line_desc:       String,
    #[serde(rename = "tseg_num")]
    pub number:          u32,
    #[serde(rename = "inode")]
    pub i_node:          Option<u32>,
    #[serde(rename = "jnode")]
    pub j_node:          Option<u32>,
    #[serde(rename = "transit_mode")]
    pub mode:            String,
    pub boardings:       f64,
    #[serde(deserialize_with = "flag")]
    pub allow_boardings: bool,
    pub volume:          f64,
    /// Minutes.
    pub transit_time:    f64,
    /// Miles.
    pub length:          f64,
}

fn flag<'de, D: serde::Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    match u8::deserialize(d)? {
        0 => Ok(false),
        1 => Ok(true),
        n => Err(serde::de::Error::custom(format!("expected 0 or 1, got {n}"))),
    }
}

/// Per-scenario access to transit assignment results.
pub trait TransitAssignmentSource {
    fn segments(&mut self, scenario: &str) -> LoadResult<Vec<RawSegment>>;
}

// ── CsvAssignmentSource ───────────────────────────────────────────────────────

/// Reads `transit_segments_{scenario}.csv` files from a directory.
pub struct CsvAssignmentSource {
    dir: PathBuf,
}

impl CsvAssignmentSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TransitAssignmentSource for CsvAssignmentSource {
    fn segments(&mut self, scenario: &str) -> LoadResult<Vec<RawSegment>> {
        let path = self.dir.join(format!("transit_segments_{scenario}.csv"));
        if !path.exists() {
            return Err(LoadError::ScenarioNotFound(scenario.to_string()));
        }
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|e| LoadError::Csv(e).in_file(&path))?;
        reader
            .deserialize::<RawSegment>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| LoadError::Csv(e).in_file(&path))
    }
}

// ── MemoryAssignmentSource ────────────────────────────────────────────────────

/// Segments held in memory, keyed by scenario id.
#[derive(Default)]
pub struct MemoryAssignmentSource {
    scenarios: FxHashMap<String, Vec<RawSegment>>,
}

impl MemoryAssignmentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, scenario: impl Into<String>, segments: Vec<RawSegment>) {
        self.scenarios.insert(scenario.into(), segments);
    }
}

impl TransitAssignmentSource for MemoryAssignmentSource {
    fn segments(&mut self, scenario: &str) -> LoadResult<Vec<RawSegment>> {
        self.scenarios
            .get(scenario)
            .cloned()
            .ok_or_else(|| LoadError::ScenarioNotFound(scenario.to_string()))
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Segments of every TOD scenario, skipping those with unresolved end nodes.
pub fn load_transit_segments<S: TransitAssignmentSource + ?Sized>(
    source: &mut S,
    tables: &ModelTables,
) -> LoadResult<Vec<TransitSegment>> {
    let mut segments = Vec::new();

    for tod in Tod::all() {
        let scenario = tables.assignment_scenario(tod);
        let raw = source.segments(&scenario)?;
        let before = segments.len();
        let mut skipped = 0usize;

        for seg in raw {
            match segment(seg, tod) {
                Some(s) => segments.push(s),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!("scenario {scenario}: skipped {skipped} segments with unresolved nodes");
        }
        log::debug!("scenario {scenario}: {} transit segments", segments.len() - before);
    }

    log::info!("loaded {} transit segments", segments.len());
    Ok(segments)
}

fn segment(raw: RawSegment, tod: Tod) -> Option<TransitSegment> {
    let (i_node, j_node) = (raw.i_node?, raw.j_node?);
    Some(TransitSegment {
        pass_hours: raw.volume * raw.transit_time / 60.0,
        pass_miles: raw.volume * raw.length,
        passengers: raw.volume,
        id: raw.id,
        line_id: raw.line_id,
        line_desc: raw.line_desc,
        number: raw.number,
        i_node: NodeNumber(i_node),
        j_node: NodeNumber(j_node),
        tod,
        mode: raw.mode,
        boardings: raw.boardings,
        allow_boardings: raw.allow_boardings,
    })
}
