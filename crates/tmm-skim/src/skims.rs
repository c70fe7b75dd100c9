//! The full congested skim set: 6 drive modes × 8 TODs × {time, distance}.
//!
//! A `SkimSet` is large (zones² × 96 cells) and is only needed while trips
//! are loaded.  The build pipeline takes it by value and drops it once the
//! trip stage finishes.

use tmm_core::{DriveMode, MatrixNumbers, Tod, ZoneId};

use crate::{SkimResult, SkimSource, ZoneMatrix};

/// Congested time (minutes) and distance (miles) for every drive mode and
/// time of day.  Indexed by `mode.index() * 8 + tod.index()`.
pub struct SkimSet {
    time:     Vec<ZoneMatrix>,
    distance: Vec<ZoneMatrix>,
}

impl SkimSet {
    /// Pull all 96 matrices from `source`.
    pub fn load<S: SkimSource + ?Sized>(source: &mut S, numbers: &MatrixNumbers) -> SkimResult<Self> {
        let slots = DriveMode::ALL.len() * Tod::COUNT;
        let mut time = Vec::with_capacity(slots);
        let mut distance = Vec::with_capacity(slots);

        for mode in DriveMode::ALL {
            let pair = numbers.get(mode);
            for tod in Tod::all() {
                time.push(source.load_matrix(tod, pair.time)?);
                distance.push(source.load_matrix(tod, pair.distance)?);
            }
        }

        log::info!(
            "loaded {} skim matrices ({} zones)",
            time.len() + distance.len(),
            time.first().map_or(0, ZoneMatrix::zone_count),
        );
        Ok(Self { time, distance })
    }

    #[inline]
    fn slot(mode: DriveMode, tod: Tod) -> usize {
        mode.index() * Tod::COUNT + tod.index()
    }

    /// Congested travel time in minutes.
    pub fn time(&self, mode: DriveMode, tod: Tod, from: ZoneId, to: ZoneId) -> SkimResult<f64> {
        self.time[Self::slot(mode, tod)].lookup(from, to)
    }

    /// Congested travel distance in miles.
    pub fn distance(&self, mode: DriveMode, tod: Tod, from: ZoneId, to: ZoneId) -> SkimResult<f64> {
        self.distance[Self::slot(mode, tod)].lookup(from, to)
    }
}
