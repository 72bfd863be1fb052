//! Single-document JSON store for the [`Dataset`].
//!
//! Every filesystem function takes the home directory explicitly. The CLI
//! resolves it once with [`home`]; tests pass a `TempDir`.

use std::path::{Path, PathBuf};

use crate::dataset::Dataset;
use crate::error::StoreError;
use crate::paths;

// ---------------------------------------------------------------------------
// 1. Directory
// ---------------------------------------------------------------------------

/// `<home>/.waliadmin/`
///
/// Creates the directory (mode `0700`) if it does not yet exist.
pub fn root_dir_at(home: &Path) -> Result<PathBuf, StoreError> {
    let dir = paths::root(home);
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    Ok(dir)
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load the dataset from `<home>/.waliadmin/data.json`.
///
/// Returns `StoreError::DatasetNotFound` if absent,
/// `StoreError::Parse` (with path + line context) if malformed JSON.
pub fn load_at(home: &Path) -> Result<Dataset, StoreError> {
    let path = paths::dataset_path(home);
    if !path.exists() {
        return Err(StoreError::DatasetNotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_json::from_str(&contents).map_err(|e| StoreError::Parse { path, source: e })
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save the dataset to `<home>/.waliadmin/data.json`.
///
/// Write flow: serialize → `data.json.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_at(home: &Path, dataset: &Dataset) -> Result<(), StoreError> {
    root_dir_at(home)?;
    let path = paths::dataset_path(home);
    let tmp_path = path.with_extension("json.tmp");

    let json = serde_json::to_string_pretty(dataset)?;
    std::fs::write(&tmp_path, json)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// 4. Init
// ---------------------------------------------------------------------------

/// Create an empty dataset under `home`.
///
/// Idempotent: if the file already exists, loads and returns it unchanged.
pub fn init_at(home: &Path) -> Result<Dataset, StoreError> {
    let path = paths::dataset_path(home);
    if path.exists() {
        return load_at(home);
    }
    let dataset = Dataset::default();
    save_at(home, &dataset)?;
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the user's home directory.
pub fn home() -> Result<PathBuf, StoreError> {
    dirs::home_dir().ok_or(StoreError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
pub(crate) fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
pub(crate) fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StudentId, StudentRecord};
    use tempfile::TempDir;

    fn make_home() -> TempDir {
        TempDir::new().expect("tempdir")
    }

    fn sample() -> Dataset {
        let mut ds = Dataset::default();
        ds.setup.school_name = "SMP Negeri 3 Bandung".to_string();
        ds.students.push(StudentRecord {
            id: StudentId::from("s-1"),
            name: "Siti Aminah".to_string(),
            ..Default::default()
        });
        ds
    }

    #[test]
    fn root_dir_created_with_perms() {
        let home = make_home();
        let dir = root_dir_at(home.path()).expect("root_dir_at");
        assert!(dir.exists());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o700);
        }
    }

    #[test]
    fn save_and_load_roundtrip() {
        let home = make_home();
        let ds = sample();
        save_at(home.path(), &ds).expect("save");
        let loaded = load_at(home.path()).expect("load");
        assert_eq!(loaded, ds);
    }

    #[test]
    fn atomic_write_cleans_up_tmp() {
        let home = make_home();
        save_at(home.path(), &sample()).expect("save");
        let tmp = paths::dataset_path(home.path()).with_extension("json.tmp");
        assert!(!tmp.exists(), ".tmp must be gone after successful save");
    }

    #[test]
    fn load_missing_dataset_returns_not_found() {
        let home = make_home();
        let err = load_at(home.path()).unwrap_err();
        assert!(matches!(err, StoreError::DatasetNotFound { .. }));
    }

    #[test]
    fn init_is_idempotent() {
        let home = make_home();
        init_at(home.path()).expect("first init");
        save_at(home.path(), &sample()).expect("save");
        let again = init_at(home.path()).expect("second init");
        assert_eq!(again.students.len(), 1, "init must not clobber existing data");
    }

    #[test]
    fn home_not_found_error_message() {
        assert!(StoreError::HomeNotFound.to_string().contains("home directory"));
    }
}
