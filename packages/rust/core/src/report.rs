//! Reading the project list and persisting the enrichment report.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use repolens_shared::{EnrichmentReport, ProjectRecord, RepolensError, Result};

/// Read the human-maintained project list.
pub fn load_projects(path: &Path) -> Result<Vec<ProjectRecord>> {
    read_json(path)
}

/// Read a report written by [`write_report`].
pub fn load_report(path: &Path) -> Result<EnrichmentReport> {
    read_json(path)
}

/// Write `report` as pretty JSON, all or nothing.
pub fn write_report(path: &Path, report: &EnrichmentReport) -> Result<()> {
    write_json(path, report)
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| RepolensError::io(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| RepolensError::parse(format!("invalid JSON in {}: {e}", path.display())))
}

fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).map_err(|e| {
        RepolensError::validation(format!("JSON serialization failed: {e}"))
    })?;
    write_atomic(path, &json)?;
    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

/// Write to a hidden sibling temp file, then rename over `path`.
///
/// A failure at any point leaves `path` as it was.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| RepolensError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| RepolensError::validation(format!("{} is not a file path", path.display())))?;
    let temp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    std::fs::write(&temp, content).map_err(|e| RepolensError::io(&temp, e))?;

    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(RepolensError::io(path, e));
    }

    Ok(())
}
