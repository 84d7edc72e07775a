//! Partial field updates of a company located by identifier.

use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

use crate::error::{PersistError, UpdateError};
use crate::record::{Company, CompanyField};

/// Result of an update attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

impl UpdateOutcome {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Updated => "Company updated successfully.",
            Self::NotFound => "Company not found.",
        }
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Which requested fields were written and which names were not recognised.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppliedChanges {
    pub applied: Vec<CompanyField>,
    pub skipped: Vec<String>,
}

/// Position of the first company whose identifier equals `id` exactly.
/// Companies without an identifier never match.
pub fn position(companies: &[Company], id: &str) -> Option<usize> {
    companies.iter().position(|company| company.id() == Some(id))
}

/// Write each change onto `company` in request order.
///
/// Unknown names are skipped. A later name for an already written field
/// overwrites it. A rejected value stops the loop; fields written before
/// it keep their new values.
pub fn apply_changes(
    company: &mut Company,
    changes: Map<String, Value>,
) -> Result<AppliedChanges, UpdateError> {
    let mut outcome = AppliedChanges::default();

    for (name, value) in changes {
        let Some(field) = CompanyField::from_name(&name) else {
            warn!("Ignoring unknown company field: {}", name);
            outcome.skipped.push(name);
            continue;
        };

        company
            .set(field, value)
            .map_err(|source| UpdateError::Field {
                field: field.wire_name(),
                source,
            })?;
        outcome.applied.push(field);
    }

    Ok(outcome)
}

/// Find the company with `id`, apply `changes`, then hand the whole
/// collection to `persist`.
///
/// Nothing is persisted when the company is missing or a change is rejected.
pub fn update<P>(
    companies: &mut [Company],
    id: &str,
    changes: Map<String, Value>,
    persist: P,
) -> Result<UpdateOutcome, UpdateError>
where
    P: FnOnce(&[Company]) -> Result<(), PersistError>,
{
    let Some(index) = position(companies, id) else {
        return Ok(UpdateOutcome::NotFound);
    };

    apply_changes(&mut companies[index], changes)?;
    persist(companies)?;

    Ok(UpdateOutcome::Updated)
}
