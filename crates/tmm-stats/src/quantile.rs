//! Equal-count quantile bins over boarding totals.
//!
//! Edges are the `k/n` quantiles of the values (linear interpolation
//! between order statistics).  The first bin is closed on both ends; every
//! later bin is open on the left, so each value lands in exactly one bin.

use std::collections::BTreeMap;
use std::fmt;

use crate::{StatsError, StatsResult};

/// One quantile bin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    pub lower:        f64,
    pub upper:        f64,
    pub lower_closed: bool,
}

impl Interval {
    pub fn contains(&self, v: f64) -> bool {
        let above = if self.lower_closed { v >= self.lower } else { v > self.lower };
        above && v <= self.upper
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lower_closed { '[' } else { '(' };
        write!(f, "{open}{}, {}]", self.lower, self.upper)
    }
}

/// Bins plus the zero-based bin label of every key.
#[derive(Clone, Debug, PartialEq)]
pub struct Quantiles<K: Ord> {
    pub bins:   Vec<Interval>,
    pub labels: BTreeMap<K, usize>,
}

/// Split `values` into `n` equal-count bins.
pub fn quantile_bins(values: &[f64], n: usize) -> StatsResult<Vec<Interval>> {
    if n == 0 {
        return Err(StatsError::ZeroBins);
    }
    if values.len() < n {
        return Err(StatsError::TooFewValues { values: values.len(), bins: n });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let edges: Vec<f64> = (0..=n).map(|k| quantile(&sorted, k as f64 / n as f64)).collect();
    for pair in edges.windows(2) {
        if pair[0] == pair[1] {
            return Err(StatsError::DuplicateQuantileEdges(pair[0]));
        }
    }

    Ok(edges
        .windows(2)
        .enumerate()
        .map(|(i, pair)| Interval { lower: pair[0], upper: pair[1], lower_closed: i == 0 })
        .collect())
}

/// Bin every `(key, value)` pair into `n` quantiles.
pub fn quantiles<K: Ord + Clone>(values: &[(K, f64)], n: usize) -> StatsResult<Quantiles<K>> {
    let raw: Vec<f64> = values.iter().map(|(_, v)| *v).collect();
    let bins = quantile_bins(&raw, n)?;
    let labels = values
        .iter()
        .map(|(k, v)| (k.clone(), label(&bins, *v)))
        .collect();
    Ok(Quantiles { bins, labels })
}

/// Index of the bin holding `v`.  Values come from the same set the edges
/// were computed from, so one bin always matches.
fn label(bins: &[Interval], v: f64) -> usize {
    bins.iter().position(|b| b.contains(v)).unwrap_or(bins.len() - 1)
}

/// Linearly interpolated `q` quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
