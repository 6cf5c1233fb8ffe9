//! Writes `InventoryReport`s to disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use stockroom_inventory::InventoryReport;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write `report` as pretty JSON into `dir` under its dated file name and
/// return the full path. An existing report for the same day is replaced.
pub fn write_report(dir: &Path, report: &InventoryReport) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report.file_name());
    let bytes = serde_json::to_vec_pretty(report)?;
    fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), "inventory report written");
    Ok(path)
}
