//! Mode share over the 14-mode taxonomy.

use tmm_core::{Mode, ModeGroup, Unsampled};

use crate::{StatsError, StatsResult};

/// Fraction of rows per mode.  Shares over all 14 modes sum to 1.
#[derive(Clone, Debug, PartialEq)]
pub struct ModeShare {
    shares: [f64; 14],
}

impl ModeShare {
    /// Shares from per-mode counts.  `table` names the source in the error
    /// raised when every count is zero.
    pub fn from_counts(table: &'static str, counts: &[(Mode, Unsampled)]) -> StatsResult<Self> {
        let total: Unsampled = counts.iter().map(|(_, n)| *n).sum();
        if total.get() <= 0.0 {
            return Err(StatsError::EmptyTable(table));
        }
        let mut shares = [0.0; 14];
        for &(mode, n) in counts {
            shares[mode_slot(mode)] += n / total;
        }
        Ok(Self { shares })
    }

    pub fn get(&self, mode: Mode) -> f64 {
        self.shares[mode_slot(mode)]
    }

    pub fn group(&self, group: ModeGroup) -> f64 {
        group.modes().into_iter().map(|m| self.get(m)).sum()
    }

    /// `(mode, share)` in code order.
    pub fn iter(&self) -> impl Iterator<Item = (Mode, f64)> + '_ {
        Mode::ALL.iter().map(|&m| (m, self.get(m)))
    }

    /// The four reporting buckets.
    pub fn grouped(&self) -> Vec<(ModeGroup, f64)> {
        ModeGroup::ALL.iter().map(|&g| (g, self.group(g))).collect()
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().sum()
    }
}

fn mode_slot(mode: Mode) -> usize {
    mode.code() as usize - 1
}
