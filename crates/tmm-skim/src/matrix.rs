//! Dense zone-by-zone matrix.
//!
//! # Data layout
//!
//! Zone ids are sparse integers, so each matrix keeps a sorted `zones` list
//! and an `FxHashMap` from `ZoneId` to its dense position.  Values live in a
//! single row-major `Vec<f32>`:
//!
//! ```text
//! value(o, d) = values[ index[o] * n + index[d] ]
//! ```
//!
//! Cells never written by the source hold `NaN` and read back as absent.

use rustc_hash::FxHashMap;

use tmm_core::ZoneId;

use crate::{SkimError, SkimResult};

/// One congested time or distance matrix.
pub struct ZoneMatrix {
    name:   String,
    zones:  Vec<ZoneId>,
    index:  FxHashMap<ZoneId, u32>,
    values: Vec<f32>,
}

impl ZoneMatrix {
    /// Build from `(origin, destination, value)` triples.
    ///
    /// The zone system is the union of every origin and destination seen.
    pub fn from_entries<I>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (ZoneId, ZoneId, f32)>,
    {
        let entries: Vec<_> = entries.into_iter().collect();

        let mut zones: Vec<ZoneId> = entries.iter().flat_map(|&(o, d, _)| [o, d]).collect();
        zones.sort_unstable();
        zones.dedup();

        let index: FxHashMap<ZoneId, u32> = zones
            .iter()
            .enumerate()
            .map(|(i, &z)| (z, i as u32))
            .collect();

        let n = zones.len();
        let mut values = vec![f32::NAN; n * n];
        for (o, d, v) in entries {
            let cell = index[&o] as usize * n + index[&d] as usize;
            values[cell] = v;
        }

        Self { name: name.into(), zones, index, values }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn zones(&self) -> &[ZoneId] {
        &self.zones
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Value for a zone pair, or `None` if either zone is unknown or the cell
    /// was never written.
    #[inline]
    pub fn get(&self, from: ZoneId, to: ZoneId) -> Option<f64> {
        let o = *self.index.get(&from)? as usize;
        let d = *self.index.get(&to)? as usize;
        let v = self.values[o * self.zones.len() + d];
        (!v.is_nan()).then_some(v as f64)
    }

    /// Like [`get`][Self::get] but an absent pair is an error.
    pub fn lookup(&self, from: ZoneId, to: ZoneId) -> SkimResult<f64> {
        self.get(from, to).ok_or_else(|| SkimError::ZonePairNotFound {
            matrix: self.name.clone(),
            from,
            to,
        })
    }
}
