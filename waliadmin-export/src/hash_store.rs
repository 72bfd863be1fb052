//! Export hash store: SHA-256 record of every file written by export.
//!
//! Persists an [`ExportStoreFile`] JSON document at `~/.waliadmin/exports.json`.
//! Writes use the same atomic `.tmp` + rename pattern as the dataset store.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use waliadmin_core::paths;

use crate::error::{io_err, ExportError};

/// Maps absolute output path strings to their last exported SHA-256 hex digest.
pub type HashStore = HashMap<String, String>;

/// On-disk hash store payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportStoreFile {
    /// Time of the last export that wrote at least one file.
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub files: HashStore,
}

impl ExportStoreFile {
    pub fn empty() -> Self {
        ExportStoreFile {
            exported_at: None,
            files: HashMap::new(),
        }
    }
}

pub fn store_path_at(home: &Path) -> PathBuf {
    paths::export_store_path(home)
}

/// Load the export store. Returns an empty store if the file does not yet exist.
pub fn load_at(home: &Path) -> Result<ExportStoreFile, ExportError> {
    let path = store_path_at(home);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ExportStoreFile::empty()),
        Err(err) => return Err(io_err(&path, err)),
    };
    serde_json::from_str(&contents).map_err(|source| ExportError::StoreParse { path, source })
}

/// Save the export store atomically: `<path>.tmp` then rename.
pub fn save_at(home: &Path, store: &ExportStoreFile) -> Result<(), ExportError> {
    let path = store_path_at(home);
    let Some(dir) = path.parent() else {
        return Err(io_err(path, std::io::Error::other("invalid export store path")));
    };
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let json = serde_json::to_string_pretty(store)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(())
}
