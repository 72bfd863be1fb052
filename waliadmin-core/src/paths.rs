//! On-disk layout under the user's home directory.
//!
//! ```text
//! ~/.waliadmin/
//!   data.json        dataset document (mode 0600)
//!   config.yaml      settings (optional)
//!   templates/       user overrides for embedded document templates
//!   exports/         default export directory
//!   exports.json     export hash store
//! ```

use std::path::{Path, PathBuf};

pub const ROOT_DIR: &str = ".waliadmin";
pub const DATASET_FILE: &str = "data.json";
pub const CONFIG_FILE: &str = "config.yaml";
pub const TEMPLATES_DIR: &str = "templates";
pub const EXPORTS_DIR: &str = "exports";
pub const EXPORT_STORE_FILE: &str = "exports.json";

pub fn root(home: &Path) -> PathBuf {
    home.join(ROOT_DIR)
}

pub fn dataset_path(home: &Path) -> PathBuf {
    root(home).join(DATASET_FILE)
}

pub fn config_path(home: &Path) -> PathBuf {
    root(home).join(CONFIG_FILE)
}

pub fn templates_dir(home: &Path) -> PathBuf {
    root(home).join(TEMPLATES_DIR)
}

pub fn exports_dir(home: &Path) -> PathBuf {
    root(home).join(EXPORTS_DIR)
}

pub fn export_store_path(home: &Path) -> PathBuf {
    root(home).join(EXPORT_STORE_FILE)
}
