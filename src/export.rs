//! JSON snapshots on disk.
//!
//! Plain UTF-8 JSON with 2-space indentation and no schema version. Writes are
//! not atomic.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize `data` as pretty JSON to `path`, replacing any existing file.
pub fn save_json<T: Serialize + ?Sized>(data: &T, path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Read and deserialize a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ExportError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
