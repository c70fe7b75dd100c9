//! Skim-layer error type.

use thiserror::Error;

use tmm_core::{TapId, ZoneId};

/// Errors produced by `tmm-skim`.
#[derive(Debug, Error)]
pub enum SkimError {
    #[error("matrix {0} not found in skim source")]
    MatrixNotFound(String),

    #[error("matrix {matrix} has no value for zone pair ({from}, {to})")]
    ZonePairNotFound { matrix: String, from: ZoneId, to: ZoneId },

    #[error("TAP {0} has no zone mapping")]
    UnknownTap(TapId),

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SkimResult<T> = Result<T, SkimError>;
