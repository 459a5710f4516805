//! Backup files: the exported dataset written to and read from disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::errors::StoreError;
use crate::types::transfer::{DataBundle, BACKUP_FILE_NAME};

/// Writes `bundle` as pretty JSON to `<dir>/nav-panel-backup.json`.
///
/// Creates `dir` if it doesn't exist. Returns the path of the written file.
pub fn write_backup(dir: &Path, bundle: &DataBundle) -> Result<PathBuf, StoreError> {
    fs::create_dir_all(dir).map_err(|e| {
        StoreError::Backup(format!("Failed to create export directory: {}", e))
    })?;

    let json = serde_json::to_string_pretty(bundle)
        .map_err(|e| StoreError::Backup(format!("Failed to serialize backup: {}", e)))?;

    let path = dir.join(BACKUP_FILE_NAME);
    fs::write(&path, json)
        .map_err(|e| StoreError::Backup(format!("Failed to write backup file: {}", e)))?;

    Ok(path)
}

/// Reads a backup file.
///
/// Unknown top-level keys are ignored and missing sections stay `None`.
pub fn read_backup(path: &Path) -> Result<DataBundle, StoreError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StoreError::Backup(format!("Failed to read backup file: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| StoreError::Backup(format!("Failed to parse backup file: {}", e)))
}
