//! Reading skeleton documents from disk.

use crate::error::ArmatureError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and parse one JSON document.
pub fn load_json(path: impl AsRef<Path>) -> Result<Value, ArmatureError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ArmatureError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArmatureError::ParseJson {
        path: path.display().to_string(),
        source,
    })
}

/// `*.json` files directly inside `dir`, sorted by file name.
pub fn list_documents(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ArmatureError> {
    let dir = dir.as_ref();
    let read_err = |source| ArmatureError::ReadFile {
        path: dir.display().to_string(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
