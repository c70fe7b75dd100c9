//! Where skim matrices come from.
//!
//! The network database is external and read-only.  [`SkimSource`] is the
//! seam: [`CsvSkimSource`] reads matrices exported to a directory (one
//! `orig,dest,value` file per matrix, named like `mf3175.csv`), and
//! [`MemorySkimSource`] serves matrices built in code.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;

use tmm_core::{DriveMode, MatrixNumbers, Tod, ZoneId};

use crate::{SkimError, SkimResult, ZoneMatrix};

/// A read-only store of zone matrices, addressed by TOD and matrix number.
pub trait SkimSource {
    fn load_matrix(&mut self, tod: Tod, number: u16) -> SkimResult<ZoneMatrix>;
}

// ── CsvSkimSource ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MatrixRecord {
    orig:  u32,
    dest:  u32,
    value: f32,
}

/// Reads `mf{tod}{number}.csv` files from a directory.
pub struct CsvSkimSource {
    dir: PathBuf,
}

impl CsvSkimSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SkimSource for CsvSkimSource {
    fn load_matrix(&mut self, tod: Tod, number: u16) -> SkimResult<ZoneMatrix> {
        let name = MatrixNumbers::matrix_name(tod, number);
        let path = self.dir.join(format!("{name}.csv"));
        if !path.exists() {
            return Err(SkimError::MatrixNotFound(name));
        }
        let csv_err = |source: csv::Error| SkimError::Csv { path: path.display().to_string(), source };

        let mut reader = csv::Reader::from_path(&path).map_err(csv_err)?;
        let entries = reader
            .deserialize::<MatrixRecord>()
            .map(|row| row.map(|r| (ZoneId(r.orig), ZoneId(r.dest), r.value)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;

        log::debug!("read {} cells from {}", entries.len(), path.display());
        Ok(ZoneMatrix::from_entries(name, entries))
    }
}

// ── MemorySkimSource ──────────────────────────────────────────────────────────

/// Entry-list matrices held in memory, for synthetic scenarios and tests.
#[derive(Default)]
pub struct MemorySkimSource {
    matrices: FxHashMap<(Tod, u16), Vec<(ZoneId, ZoneId, f32)>>,
}

impl MemorySkimSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the cells of matrix `number` for `tod`.
    pub fn insert(&mut self, tod: Tod, number: u16, entries: Vec<(ZoneId, ZoneId, f32)>) {
        self.matrices.insert((tod, number), entries);
    }

    /// Register the same cells under every TOD.
    pub fn insert_all_tods(&mut self, number: u16, entries: &[(ZoneId, ZoneId, f32)]) {
        for tod in Tod::all() {
            self.insert(tod, number, entries.to_vec());
        }
    }

    /// Register time and distance cells for one drive mode under every TOD.
    pub fn insert_drive_mode(
        &mut self,
        numbers:  &MatrixNumbers,
        mode:     DriveMode,
        time:     &[(ZoneId, ZoneId, f32)],
        distance: &[(ZoneId, ZoneId, f32)],
    ) {
        let pair = numbers.get(mode);
        self.insert_all_tods(pair.time, time);
        self.insert_all_tods(pair.distance, distance);
    }
}

impl SkimSource for MemorySkimSource {
    fn load_matrix(&mut self, tod: Tod, number: u16) -> SkimResult<ZoneMatrix> {
        let name = MatrixNumbers::matrix_name(tod, number);
        match self.matrices.get(&(tod, number)) {
            Some(entries) => Ok(ZoneMatrix::from_entries(name, entries.iter().copied())),
            None => Err(SkimError::MatrixNotFound(name)),
        }
    }
}
