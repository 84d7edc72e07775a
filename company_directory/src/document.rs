//! Reading and writing the JSON document that backs the company collection.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::error::{DataLoadError, PersistError};
use crate::record::Company;

/// Parse the document at `path` into an ordered collection.
#[instrument]
pub fn load(path: &Path) -> Result<Vec<Company>, DataLoadError> {
    let file = fs::File::open(path).map_err(|source| DataLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let companies: Vec<Company> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| DataLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Loaded {} companies", companies.len());
    Ok(companies)
}

/// Overwrite the document at `path` with the full collection, pretty-printed.
///
/// The collection is written to a temporary file next to the document and
/// renamed over it, so a failed write never leaves a truncated document.
#[instrument(skip(companies), fields(count = companies.len()))]
pub fn persist(path: &Path, companies: &[Company]) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, companies).map_err(PersistError::Serialize)?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    debug!("Saved companies to disk");
    Ok(())
}
