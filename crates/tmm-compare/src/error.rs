use thiserror::Error;

use tmm_output::OutputError;
use tmm_stats::StatsError;
use tmm_store::StoreError;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Output(#[from] OutputError),

    /// Percent change of a figure that is zero in the base scenario.
    #[error("percent change against a zero base (test value {test})")]
    ZeroBase { test: f64 },
}

impl From<StoreError> for CompareError {
    fn from(e: StoreError) -> Self {
        CompareError::Stats(StatsError::Store(e))
    }
}

pub type CompareResult<T> = Result<T, CompareError>;
