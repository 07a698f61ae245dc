//! Read/write the JSON documents consumed by the web page.
//!
//! Files are overwritten in full on every run; the directory is created when
//! missing. Non-ASCII characters are written literally (UTF-8).

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{OutputDocument, RealtimeSnapshot};
use crate::error::AppError;

pub const DATA_FILE: &str = "dette_data.json";
pub const SNAPSHOT_FILE: &str = "dette_insee_latest.json";

/// Write `dir/dette_data.json` and return its path.
pub fn write_document(dir: &Path, document: &OutputDocument) -> Result<PathBuf, AppError> {
    write_json(&dir.join(DATA_FILE), document)
}

/// Write `dir/dette_insee_latest.json` and return its path.
pub fn write_snapshot(dir: &Path, snapshot: &RealtimeSnapshot) -> Result<PathBuf, AppError> {
    write_json(&dir.join(SNAPSHOT_FILE), snapshot)
}

pub fn read_document(dir: &Path) -> Result<OutputDocument, AppError> {
    read_json(&dir.join(DATA_FILE))
}

pub fn read_snapshot(dir: &Path) -> Result<RealtimeSnapshot, AppError> {
    read_json(&dir.join(SNAPSHOT_FILE))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf, AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                AppError::io(format!("Failed to create output dir '{}': {e}", parent.display()))
            })?;
        }
    }

    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;
    writeln!(writer)
        .and_then(|_| writer.flush())
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;

    log::info!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open '{}': {e}", path.display())))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| AppError::io(format!("Invalid JSON in '{}': {e}", path.display())))
}
