//! Loader error type.

use thiserror::Error;

use tmm_core::{CoreError, PersonId, TourId, TripId};
use tmm_skim::SkimError;

/// Errors raised while turning source rows into records.  All of them abort
/// the load: downstream joins assume full referential integrity.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent or its cell is empty.
    #[error("line {line}: missing {column}")]
    MissingField { line: u64, column: &'static str },

    #[error("line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("line {line}: {source}")]
    Code {
        line:   u64,
        #[source]
        source: CoreError,
    },

    #[error("trip {trip}: {source}")]
    Skim {
        trip:   TripId,
        #[source]
        source: SkimError,
    },

    #[error("trip references unknown tour {0}")]
    UnknownTour(TourId),

    #[error("no user classes for person {0}")]
    UnknownPerson(PersonId),

    #[error("transit assignment scenario {0} not found")]
    ScenarioNotFound(String),

    #[error("{path}: {source}")]
    File {
        path:   String,
        #[source]
        source: Box<LoadError>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// Attach the file a row came from.
    pub fn in_file(self, path: &std::path::Path) -> LoadError {
        LoadError::File { path: path.display().to_string(), source: Box::new(self) }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
