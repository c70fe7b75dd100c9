//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised while interpreting model codes and lookup tables.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("mode code {0} is outside the 1-14 taxonomy")]
    InvalidMode(i64),

    #[error("time period {0} has no time-of-day mapping")]
    PeriodOutOfRange(i64),

    #[error("time-of-day {0} is outside 1-8")]
    InvalidTod(i64),

    #[error("sample rate {0} must be in (0, 1]")]
    InvalidSampleRate(f64),

    #[error("mode {0} has no skim matrices")]
    NotADriveMode(u8),
}

/// Shorthand result type for `tmm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
