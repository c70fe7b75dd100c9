//! Time-period mapping between the demand model and the skim store.
//!
//! # Design
//!
//! CT-RAMP writes departure/arrival/stop times as integer periods (mostly
//! 30-minute bins, period 0 unused).  The network database slices the day
//! into eight coarser time-of-day buckets.  The mapping is a fixed lookup
//! table, not a formula: TOD 1 covers both 3–6 am and 8 pm–3 am, so its
//! periods are not contiguous.
//!
//! ```text
//! period  1–3   → TOD 1   [3am, 6am)
//! period  4–5   → TOD 2   [6am, 7am)
//! period  6–9   → TOD 3   [7am, 9am)
//! period 10–11  → TOD 4   [9am, 10am)
//! period 12–19  → TOD 5   [10am, 2pm)
//! period 20–23  → TOD 6   [2pm, 4pm)
//! period 24–27  → TOD 7   [4pm, 6pm)
//! period 28–31  → TOD 8   [6pm, 8pm)
//! period 32–42  → TOD 1   [8pm, 3am)
//! ```

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Period ────────────────────────────────────────────────────────────────────

/// A CT-RAMP time period as read from the source files.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period(pub u8);

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// ── Tod ───────────────────────────────────────────────────────────────────────

/// Skim-store time-of-day bucket, always in `1..=8`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tod(u8);

impl Tod {
    pub const COUNT: usize = 8;

    pub fn new(tod: u8) -> CoreResult<Tod> {
        if (1..=8).contains(&tod) {
            Ok(Tod(tod))
        } else {
            Err(CoreError::InvalidTod(tod as i64))
        }
    }

    /// All eight buckets in order.
    pub fn all() -> impl Iterator<Item = Tod> {
        (1..=8u8).map(Tod)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Dense index 0–7.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl TryFrom<i64> for Tod {
    type Error = CoreError;
    fn try_from(n: i64) -> CoreResult<Tod> {
        u8::try_from(n)
            .map_err(|_| CoreError::InvalidTod(n))
            .and_then(Tod::new)
    }
}

impl fmt::Display for Tod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── PeriodMap ─────────────────────────────────────────────────────────────────

/// Period → TOD lookup table, indexed by period number.
///
/// Entry 0 is `None`: period 0 does not exist in CT-RAMP output.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodMap {
    tod_by_period: Vec<Option<Tod>>,
}

impl PeriodMap {
    /// Build from an explicit table.  Values must be valid TOD buckets.
    pub fn new(tod_by_period: Vec<Option<u8>>) -> CoreResult<Self> {
        let tod_by_period = tod_by_period
            .into_iter()
            .map(|t| t.map(Tod::new).transpose())
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self { tod_by_period })
    }

    /// The CT-RAMP / CMAP 42-period table.
    pub fn ctramp() -> Self {
        let mut t: Vec<Option<Tod>> = Vec::with_capacity(43);
        t.push(None);
        for (tod, count) in [(1, 3), (2, 2), (3, 4), (4, 2), (5, 8), (6, 4), (7, 4), (8, 4), (1, 11)] {
            t.extend(std::iter::repeat_n(Some(Tod(tod)), count));
        }
        Self { tod_by_period: t }
    }

    /// Highest period with a mapping.
    pub fn max_period(&self) -> usize {
        self.tod_by_period.len().saturating_sub(1)
    }

    /// Forward lookup.  Unknown periods are fatal input errors, never clamped.
    pub fn tod(&self, period: i64) -> CoreResult<Tod> {
        usize::try_from(period)
            .ok()
            .and_then(|i| self.tod_by_period.get(i).copied().flatten())
            .ok_or(CoreError::PeriodOutOfRange(period))
    }

    /// Inverse lookup: every period that maps to `tod`, ascending.
    pub fn periods(&self, tod: Tod) -> Vec<Period> {
        self.tod_by_period
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == Some(tod))
            .map(|(i, _)| Period(i as u8))
            .collect()
    }
}

impl Default for PeriodMap {
    fn default() -> Self {
        Self::ctramp()
    }
}
