//! Command-line interface definitions using clap derive API.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::store::CompanyStore;
use crate::update::UpdateOutcome;

/// Company directory service
#[derive(Parser)]
#[command(name = "company-directory")]
#[command(about = "Search and update company records stored in a JSON document")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind to (defaults to server.host:server.port)
        #[arg(long)]
        addr: Option<SocketAddr>,

        /// Company JSON document (defaults to data.json_file_path)
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Print companies whose name or description contains QUERY as a whole word
    Search {
        query: String,

        /// Company JSON document (defaults to data.json_file_path)
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Apply a JSON object of field changes to the company with ID
    Update {
        id: String,

        /// e.g. '{"company_name": "Acme", "year_founded": 1999}'
        changes: String,

        /// Company JSON document (defaults to data.json_file_path)
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

impl Commands {
    pub fn data(&self) -> Option<&Path> {
        match self {
            Self::Serve { data, .. } | Self::Search { data, .. } | Self::Update { data, .. } => {
                data.as_deref()
            }
        }
    }
}

fn open_store(path: &Path) -> Result<CompanyStore> {
    CompanyStore::open(path).context("Company data could not be loaded")
}

/// Search the document at `path` and render the matches as pretty JSON.
pub fn run_search(path: &Path, query: &str) -> Result<String> {
    let store = open_store(path)?;
    let results = store.search(query)?;
    Ok(serde_json::to_string_pretty(&results)?)
}

/// Apply `changes` (a JSON object) to company `id` in the document at `path`.
///
/// A missing company is an error so the process exits non-zero.
pub fn run_update(path: &Path, id: &str, changes: &str) -> Result<UpdateOutcome> {
    let changes: Map<String, Value> =
        serde_json::from_str(changes).context("CHANGES must be a JSON object")?;
    let store = open_store(path)?;
    match store.update(id, changes)? {
        UpdateOutcome::Updated => Ok(UpdateOutcome::Updated),
        UpdateOutcome::NotFound => bail!("{}", UpdateOutcome::NotFound),
    }
}
