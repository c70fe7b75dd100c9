//! `tmm-skim` — congested skim matrices and TAP zone lookup.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`matrix`] | `ZoneMatrix` (dense, zone-indexed)                          |
//! | [`skims`]  | `SkimSet` (6 drive modes × 8 TODs × time/distance)          |
//! | [`source`] | `SkimSource` trait, `CsvSkimSource`, `MemorySkimSource`     |
//! | [`taps`]   | `TapZones` (TAP → zone)                                     |
//! | [`error`]  | `SkimError`, `SkimResult<T>`                                |

pub mod error;
pub mod matrix;
pub mod skims;
pub mod source;
pub mod taps;


pub use error::{SkimError, SkimResult};
pub use matrix::ZoneMatrix;
pub use skims::SkimSet;
pub use source::{CsvSkimSource, MemorySkimSource, SkimSource};
pub use taps::TapZones;
