use thiserror::Error;

use tmm_store::StoreError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A share was requested over a table with no rows.
    #[error("{0} is empty; shares are undefined")]
    EmptyTable(&'static str),

    #[error("quantile split needs at least one bin")]
    ZeroBins,

    #[error("cannot split {values} values into {bins} quantile bins")]
    TooFewValues { values: usize, bins: usize },

    #[error("quantile edge {0} repeats; bins must be distinct")]
    DuplicateQuantileEdges(f64),

    #[error("user class {0} is outside 1..=3")]
    UserClass(u8),
}

pub type StatsResult<T> = Result<T, StatsError>;
