//! The shared company collection and the document it is persisted to.

use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::document;
use crate::error::{DataLoadError, SearchError, UpdateError};
use crate::record::Company;
use crate::search;
use crate::update::{self, UpdateOutcome};

/// In-memory company collection backed by a single JSON document.
///
/// Searches share a read lock. Updates hold the write lock across
/// find, apply and persist, so document writes never interleave.
#[derive(Debug)]
pub struct CompanyStore {
    path: PathBuf,
    companies: RwLock<Vec<Company>>,
}

impl CompanyStore {
    /// Load the document at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DataLoadError> {
        let path = path.into();
        let companies = document::load(&path)?;
        info!("Loaded {} companies from {:?}", companies.len(), path);
        Ok(Self::from_companies(path, companies))
    }

    /// Wrap an already loaded collection. Updates will persist to `path`.
    pub fn from_companies(path: impl Into<PathBuf>, companies: Vec<Company>) -> Self {
        Self {
            path: path.into(),
            companies: RwLock::new(companies),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.companies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.read().is_empty()
    }

    /// Copy of the current collection.
    pub fn snapshot(&self) -> Vec<Company> {
        self.companies.read().clone()
    }

    #[instrument(skip(self))]
    pub fn search(&self, query: &str) -> Result<Vec<Company>, SearchError> {
        let companies = self.companies.read();
        search::search(&companies, query)
    }

    /// Apply `changes` to the company with `id` and rewrite the document.
    #[instrument(skip(self, changes), fields(changes = changes.len()))]
    pub fn update(&self, id: &str, changes: Map<String, Value>) -> Result<UpdateOutcome, UpdateError> {
        let mut companies = self.companies.write();
        let outcome = update::update(&mut companies, id, changes, |all| {
            document::persist(&self.path, all)
        });

        match &outcome {
            Ok(UpdateOutcome::Updated) => info!("Updated company {}", id),
            Ok(UpdateOutcome::NotFound) => warn!("Company {} not found", id),
            Err(e) => warn!("Update of company {} failed: {}", id, e),
        }
        outcome
    }
}
