//! `tmm-stats` — aggregation over one built scenario.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`dataset`]  | `ScenarioDataset` (aggregate root), `TableCounts`          |
//! | [`share`]    | `ModeShare`, grouped and ungrouped                         |
//! | [`transit`]  | `TransitStats` per sub-mode                                |
//! | [`classes`]  | `ClassTally`, `StratifiedClasses`                          |
//! | [`quantile`] | equal-count boarding bins                                  |
//! | [`error`]    | `StatsError`, `StatsResult<T>`                             |
//!
//! Counts of people, tours and trips are unsampled before they leave this
//! crate; transit assignment totals are reported as assigned.

pub mod classes;
pub mod dataset;
pub mod error;
pub mod quantile;
pub mod share;
pub mod transit;

#[cfg(test)]
mod tests;

pub use classes::{ClassTally, StratifiedClasses};
pub use dataset::{ScenarioDataset, TableCounts, TravelerTrips};
pub use error::{StatsError, StatsResult};
pub use quantile::{Interval, Quantiles, quantile_bins, quantiles};
pub use share::ModeShare;
pub use transit::{SubModeStats, TransitStats, TransitTotals};
