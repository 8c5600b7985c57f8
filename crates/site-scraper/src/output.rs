use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ScrapeError;
use crate::extract::Record;

/// Writes `records` as a pretty-printed JSON array to `path`.
///
/// The records are encoded before anything touches the disk. The bytes go to
/// a temporary file next to `path` which then replaces it, so a failed run
/// never leaves a truncated `result.json` behind.
pub fn write_results(path: &Path, records: &[Record]) -> Result<(), ScrapeError> {
    let mut encoded = serde_json::to_vec_pretty(records).map_err(ScrapeError::ResultEncodeError)?;
    encoded.push(b'\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|source| ScrapeError::ResultFileCreateError {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(&encoded)
        .and_then(|_| file.flush())
        .map_err(|source| ScrapeError::ResultWriteError {
            path: path.to_path_buf(),
            source,
        })?;
    file.persist(path).map_err(|e| ScrapeError::ResultWriteError {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    tracing::debug!("Wrote {} bytes to {:?}", encoded.len(), path);
    Ok(())
}
