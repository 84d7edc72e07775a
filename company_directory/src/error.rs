//! Error types for loading, searching, updating and persisting the company collection.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The company document could not be loaded. Fatal at startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read company data from {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse company data in {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Writing the collection back to its document failed.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to serialize company data")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to save updated company data to {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A search could not complete.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("company at position {index} has no {field}")]
    MissingField { field: &'static str, index: usize },

    #[error("invalid search pattern")]
    Pattern(#[from] regex::Error),
}

/// A single field assignment was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("field {field} expects {expected}, got {found}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// An update could not complete. Fields applied before the failure stay applied.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("failed to apply field {field}")]
    Field {
        field: &'static str,
        #[source]
        source: FieldError,
    },

    #[error(transparent)]
    Persist(#[from] PersistError),
}
