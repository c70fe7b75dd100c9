//! Sample-rate bookkeeping.
//!
//! CT-RAMP is usually run on a fraction of households (5 % by default).  Any
//! count read from the store is a [`RawCount`] and must go through
//! [`RawCount::unsample`] before it can be added to, subtracted from, or
//! compared with another scenario's figure.  [`Unsampled`] values carry no
//! rate, so mixing two scenarios with different sample rates is safe once
//! both sides are unsampled.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Neg, Sub};

use crate::{CoreError, CoreResult};

/// Fraction of the population simulated, in `(0, 1]`.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleRate(f64);

impl SampleRate {
    pub const DEFAULT: SampleRate = SampleRate(0.05);

    pub fn new(rate: f64) -> CoreResult<Self> {
        if rate > 0.0 && rate <= 1.0 {
            Ok(Self(rate))
        } else {
            Err(CoreError::InvalidSampleRate(rate))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

// ── RawCount ──────────────────────────────────────────────────────────────────

/// A count observed in the sampled model output.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct RawCount(pub u64);

impl RawCount {
    /// Project to full population scale: `n / rate`.
    #[inline]
    pub fn unsample(self, rate: SampleRate) -> Unsampled {
        Unsampled(self.0 as f64 / rate.0)
    }
}

impl Add for RawCount {
    type Output = RawCount;
    fn add(self, rhs: RawCount) -> RawCount {
        RawCount(self.0 + rhs.0)
    }
}

impl AddAssign for RawCount {
    fn add_assign(&mut self, rhs: RawCount) {
        self.0 += rhs.0;
    }
}

impl Sum for RawCount {
    fn sum<I: Iterator<Item = RawCount>>(iter: I) -> RawCount {
        RawCount(iter.map(|c| c.0).sum())
    }
}

// ── Unsampled ─────────────────────────────────────────────────────────────────

/// A full-population estimate.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unsampled(pub f64);

impl Unsampled {
    pub const ZERO: Unsampled = Unsampled(0.0);

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Add for Unsampled {
    type Output = Unsampled;
    fn add(self, rhs: Unsampled) -> Unsampled {
        Unsampled(self.0 + rhs.0)
    }
}

impl AddAssign for Unsampled {
    fn add_assign(&mut self, rhs: Unsampled) {
        self.0 += rhs.0;
    }
}

impl Sub for Unsampled {
    type Output = Unsampled;
    fn sub(self, rhs: Unsampled) -> Unsampled {
        Unsampled(self.0 - rhs.0)
    }
}

impl Neg for Unsampled {
    type Output = Unsampled;
    fn neg(self) -> Unsampled {
        Unsampled(-self.0)
    }
}

/// Ratio of two estimates (shares, percent change).
impl Div for Unsampled {
    type Output = f64;
    fn div(self, rhs: Unsampled) -> f64 {
        self.0 / rhs.0
    }
}

impl Sum for Unsampled {
    fn sum<I: Iterator<Item = Unsampled>>(iter: I) -> Unsampled {
        Unsampled(iter.map(|c| c.0).sum())
    }
}

impl fmt::Display for Unsampled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}", self.0)
    }
}
