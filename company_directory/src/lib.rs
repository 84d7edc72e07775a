//! Company Directory - Core Library
//!
//! An in-memory collection of company records backed by a JSON document,
//! with whole-word search and partial field updates.

pub mod cli;
pub mod document;
pub mod error;
pub mod middleware;
pub mod record;
pub mod search;
pub mod server;
pub mod settings;
pub mod store;
pub mod telemetry;
pub mod update;

pub use error::{DataLoadError, FieldError, PersistError, SearchError, UpdateError};
pub use record::{Company, CompanyField, FieldValue};
pub use search::MAX_SEARCH_RESULTS;
pub use store::CompanyStore;
pub use update::UpdateOutcome;
