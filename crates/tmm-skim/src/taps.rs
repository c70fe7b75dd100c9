//! Transit access point → zone table.
//!
//! # CSV format
//!
//! `tap_attributes.csv` from the model inputs; only two columns are read:
//!
//! ```csv
//! tap_id,taz09,...
//! 1,101,...
//! 2,101,...
//! ```

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use tmm_core::{TapId, ZoneId};

use crate::{SkimError, SkimResult};

#[derive(Deserialize)]
struct TapRecord {
    tap_id: u32,
    taz09:  u32,
}

/// Maps each TAP to the zone that contains it.
#[derive(Default, Debug)]
pub struct TapZones {
    zones: FxHashMap<TapId, ZoneId>,
}

impl TapZones {
    pub fn from_pairs<I: IntoIterator<Item = (TapId, ZoneId)>>(pairs: I) -> Self {
        Self { zones: pairs.into_iter().collect() }
    }

    /// Load from `tap_attributes.csv`.
    pub fn load_csv(path: &Path) -> SkimResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::load_reader(file).map_err(|e| match e {
            SkimError::Csv { source, .. } => SkimError::Csv { path: path.display().to_string(), source },
            other => other,
        })
    }

    /// Like [`load_csv`][Self::load_csv] but accepts any `Read` source.
    pub fn load_reader<R: Read>(reader: R) -> SkimResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut zones = FxHashMap::default();
        for row in csv_reader.deserialize::<TapRecord>() {
            let row = row.map_err(|source| SkimError::Csv { path: "<reader>".into(), source })?;
            zones.insert(TapId(row.tap_id), ZoneId(row.taz09));
        }
        log::debug!("loaded {} TAP zones", zones.len());
        Ok(Self { zones })
    }

    pub fn zone(&self, tap: TapId) -> SkimResult<ZoneId> {
        self.zones.get(&tap).copied().ok_or(SkimError::UnknownTap(tap))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
