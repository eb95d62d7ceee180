//! Writing the dataset artifact to disk.

use std::io::Write;
use std::path::Path;

use site_common::Dataset;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{IngestionError, Result};

/// Serialize `dataset` as pretty-printed JSON to `path`.
///
/// Parent directories are created as needed. The JSON is written to a
/// temporary file in the target directory and renamed over `path`, so a
/// failed write leaves any previous artifact intact.
///
/// # Returns
/// Number of bytes written
pub fn write_dataset(dataset: &Dataset, path: &Path) -> Result<u64> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|source| IngestionError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let json = serde_json::to_string_pretty(dataset)?;

    let write_err = |source| IngestionError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!(path = %path.display(), bytes = json.len(), "Wrote dataset");
    Ok(json.len() as u64)
}
