//! `tmm-store` — the relational store behind a scenario.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`config`]  | `ScenarioConfig` (TOML), `DbLocation`                        |
//! | [`schema`]  | table definitions, built-schema check                        |
//! | [`store`]   | `ScenarioStore`, `RecordWriter`                              |
//! | [`query`]   | typed read queries, `StratifyBy`, `Stratum`                  |
//! | [`builder`] | `ScenarioBuilder` (staged load pipeline)                     |
//! | [`error`]   | `StoreError`, `StoreResult<T>`                               |
//! | `fixture`   | synthetic model runs for tests (feature `fixture`)           |

pub mod builder;
pub mod config;
pub mod error;
pub mod query;
pub mod schema;
pub mod store;

#[cfg(any(test, feature = "fixture"))]
pub mod fixture;

#[cfg(test)]
mod tests;

pub use builder::ScenarioBuilder;
pub use config::{DbLocation, ScenarioConfig};
pub use error::{StoreError, StoreResult};
pub use query::{
    ClassCount, JoinPath, ModeTable, RealKey, Stratum, StratifyBy, SubModeTotals, Table, TravelUnit,
    TravelerModeCount,
};
pub use store::{RecordWriter, ScenarioStore};
