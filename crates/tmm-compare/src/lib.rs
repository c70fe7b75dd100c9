//! `tmm-compare` — base vs. test scenario comparison.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`comparison`]| `Comparison` (mode share, new trips, transit, classes)   |
//! | [`diversion`] | per-traveler auto-trip diversion / elimination           |
//! | [`export`]    | per-zone person-trip user-class rows                     |
//! | [`change`]    | `Change` and the grouped change records                  |
//! | [`pair`]      | `load_pair` (concurrent with feature `parallel`)         |
//! | [`error`]     | `CompareError`, `CompareResult<T>`                       |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Builds the base and test scenarios on Rayon's pool.    |

pub mod change;
pub mod comparison;
pub mod diversion;
pub mod error;
pub mod export;
pub mod pair;


pub use change::{Change, ClassChange, SubModeChange, TotalsChange, TransitChange};
pub use comparison::Comparison;
pub use diversion::{AutoImpact, ModeDiffs, attribute_auto_change};
pub use error::{CompareError, CompareResult};
pub use export::stratify_by;
pub use pair::{load_pair, load_pair_with};
