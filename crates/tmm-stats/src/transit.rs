//! Transit assignment totals by sub-mode.
//!
//! These come straight from the network assignment and are not unsampled.

use std::ops::{Add, AddAssign};

use tmm_core::ModelTables;
use tmm_store::SubModeTotals;

/// Boardings, passenger-miles and passenger-hours.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TransitTotals {
    pub boardings:  f64,
    pub pass_miles: f64,
    pub pass_hours: f64,
}

impl Add for TransitTotals {
    type Output = TransitTotals;
    fn add(self, rhs: TransitTotals) -> TransitTotals {
        TransitTotals {
            boardings:  self.boardings + rhs.boardings,
            pass_miles: self.pass_miles + rhs.pass_miles,
            pass_hours: self.pass_hours + rhs.pass_hours,
        }
    }
}

impl AddAssign for TransitTotals {
    fn add_assign(&mut self, rhs: TransitTotals) {
        *self = *self + rhs;
    }
}

/// Totals for one configured sub-mode.
#[derive(Clone, Debug, PartialEq)]
pub struct SubModeStats {
    pub code:        String,
    pub description: String,
    pub totals:      TransitTotals,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitStats {
    modes: Vec<SubModeStats>,
    total: TransitTotals,
}

impl TransitStats {
    /// Spread store totals over the configured sub-modes.  Configured
    /// sub-modes absent from the assignment report zero; letters missing
    /// from the configuration still count toward [`total`][Self::total].
    pub fn from_totals(rows: &[SubModeTotals], tables: &ModelTables) -> Self {
        let mut modes: Vec<SubModeStats> = tables
            .transit_sub_modes
            .iter()
            .map(|m| SubModeStats {
                code:        m.code.clone(),
                description: m.description.clone(),
                totals:      TransitTotals::default(),
            })
            .collect();
        modes.sort_by(|a, b| a.description.cmp(&b.description));

        let mut total = TransitTotals::default();
        for row in rows {
            let t = TransitTotals {
                boardings:  row.boardings,
                pass_miles: row.pass_miles,
                pass_hours: row.pass_hours,
            };
            total += t;
            match modes.iter_mut().find(|m| m.code == row.mode) {
                Some(m) => m.totals += t,
                None => log::warn!("transit mode {:?} has no configured description", row.mode),
            }
        }
        Self { modes, total }
    }

    /// All sub-modes together.
    pub fn total(&self) -> TransitTotals {
        self.total
    }

    /// One entry per configured sub-mode, ordered by description.
    pub fn by_mode(&self) -> &[SubModeStats] {
        &self.modes
    }

    pub fn get(&self, code: &str) -> Option<TransitTotals> {
        self.modes.iter().find(|m| m.code == code).map(|m| m.totals)
    }
}
