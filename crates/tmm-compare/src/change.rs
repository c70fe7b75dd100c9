//! Base → test changes.

use tmm_stats::TransitTotals;

use crate::{CompareError, CompareResult};

/// One figure in both scenarios.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Change {
    pub base: f64,
    pub test: f64,
}

impl Change {
    pub fn new(base: f64, test: f64) -> Self {
        Self { base, test }
    }

    /// Test minus base.
    pub fn diff(&self) -> f64 {
        self.test - self.base
    }

    /// `diff / base`.  A zero base has no percent change.
    pub fn percent(&self) -> CompareResult<f64> {
        if self.base == 0.0 {
            return Err(CompareError::ZeroBase { test: self.test });
        }
        Ok(self.diff() / self.base)
    }
}

/// Changes in boardings, passenger-miles and passenger-hours.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TotalsChange {
    pub boardings:  Change,
    pub pass_miles: Change,
    pub pass_hours: Change,
}

impl TotalsChange {
    pub fn between(base: TransitTotals, test: TransitTotals) -> Self {
        Self {
            boardings:  Change::new(base.boardings, test.boardings),
            pass_miles: Change::new(base.pass_miles, test.pass_miles),
            pass_hours: Change::new(base.pass_hours, test.pass_hours),
        }
    }
}

/// Transit totals change for one configured sub-mode.
#[derive(Clone, Debug, PartialEq)]
pub struct SubModeChange {
    pub code:        String,
    pub description: String,
    pub change:      TotalsChange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransitChange {
    pub total:   TotalsChange,
    /// Ordered by sub-mode description.
    pub by_mode: Vec<SubModeChange>,
}

/// Transit person-trips change per user class.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassChange {
    pub by_class: Vec<(u8, Change)>,
    pub total:    Change,
}
