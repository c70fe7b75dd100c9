//! Error types for tmm-store.

use thiserror::Error;

use tmm_core::CoreError;
use tmm_load::LoadError;
use tmm_skim::SkimError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file is missing or has no scenario schema.  Raised before
    /// any query runs.
    #[error("scenario database {0} has not been built")]
    NotBuilt(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Skim(#[from] SkimError),

    #[error("invalid scenario configuration: {0}")]
    Core(#[from] CoreError),

    #[error("scenario configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unexpected value {value} in column {column}")]
    BadColumn { column: &'static str, value: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
