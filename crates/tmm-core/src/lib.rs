//! `tmm-core` — foundational types for the `tmm` travel-model metrics workspace.
//!
//! This crate is a dependency of every other `tmm-*` crate.  It has no
//! `tmm-*` dependencies and only `thiserror` (plus optional `serde`) from the
//! outside world.
//!
//! # What lives here
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`ids`]    | `HouseholdId`, `ZoneId`, `SubzoneId`, `TapId`, `NodeNumber`, composite string ids |
//! | [`mode`]   | `Mode` (14-code taxonomy), `ModeGroup`, `DriveMode`            |
//! | [`time`]   | `Period`, `Tod`, `PeriodMap`                                   |
//! | [`tables`] | `ModelTables`, `MatrixNumbers`, `TransitSubMode`               |
//! | [`sample`] | `SampleRate`, `RawCount`, `Unsampled`                          |
//! | [`error`]  | `CoreError`, `CoreResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod mode;
pub mod sample;
pub mod tables;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{
    HouseholdId, NodeNumber, Participant, PersonId, PersonTourId, PersonTripId, SubzoneId, TapId,
    TourId, TripId, ZoneId,
};
pub use mode::{DriveMode, Mode, ModeGroup};
pub use sample::{RawCount, SampleRate, Unsampled};
pub use tables::{ExportRanges, MatrixNumbers, MatrixPair, ModelTables, TransitSubMode};
pub use time::{Period, PeriodMap, Tod};
