//! User settings at `~/.waliadmin/config.yaml`.
//!
//! Every key is optional; a missing file is the same as an empty one.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::paths;
use crate::store::{self, root_dir_at};

pub const DEFAULT_DOCUMENT_TITLE: &str = "Dokumen Wali Kelas";
pub const DEFAULT_NARRATIVE_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_CLIPBOARD_HOLD_SECS: u64 = 10;

/// Parsed `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Export directory; `~/.waliadmin/exports` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// `<title>` of exported envelopes.
    pub document_title: String,
    /// How long `export --clipboard` keeps serving the copied document on
    /// X11, where the selection dies with the process unless a clipboard
    /// manager takes it over first.
    pub clipboard_hold_secs: u64,
    pub narrative: NarrativeSettings,
}

/// Settings for the narrative text-generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeSettings {
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: None,
            document_title: DEFAULT_DOCUMENT_TITLE.to_string(),
            clipboard_hold_secs: DEFAULT_CLIPBOARD_HOLD_SECS,
            narrative: NarrativeSettings::default(),
        }
    }
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_NARRATIVE_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl Settings {
    pub fn clipboard_hold(&self) -> Duration {
        Duration::from_secs(self.clipboard_hold_secs)
    }

    /// Resolved export directory.
    pub fn output_dir_at(&self, home: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| paths::exports_dir(home))
    }
}

/// Load settings; an absent file yields [`Settings::default`].
pub fn load_at(home: &Path) -> Result<Settings, StoreError> {
    let path = paths::config_path(home);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| StoreError::ConfigParse { path, source: e })
}

/// Atomically write settings to `config.yaml`.
pub fn save_at(home: &Path, settings: &Settings) -> Result<(), StoreError> {
    root_dir_at(home)?;
    let path = paths::config_path(home);
    let tmp = path.with_extension("yaml.tmp");
    let yaml = serde_yaml::to_string(settings)?;
    std::fs::write(&tmp, yaml)?;
    store::set_file_permissions(&tmp)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let home = TempDir::new().unwrap();
        let settings = load_at(home.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(
            settings.output_dir_at(home.path()),
            paths::exports_dir(home.path())
        );
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let home = TempDir::new().unwrap();
        std::fs::create_dir_all(paths::root(home.path())).unwrap();
        std::fs::write(
            paths::config_path(home.path()),
            "output_dir: /srv/docs\nnarrative:\n  model: custom-model\n",
        )
        .unwrap();

        let settings = load_at(home.path()).unwrap();
        assert_eq!(settings.output_dir, Some(PathBuf::from("/srv/docs")));
        assert_eq!(settings.narrative.model, "custom-model");
        assert_eq!(settings.narrative.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(settings.document_title, DEFAULT_DOCUMENT_TITLE);
        assert_eq!(settings.clipboard_hold(), Duration::from_secs(DEFAULT_CLIPBOARD_HOLD_SECS));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let home = TempDir::new().unwrap();
        let settings = Settings {
            output_dir: Some(PathBuf::from("/tmp/out")),
            document_title: "Arsip Kelas".to_string(),
            clipboard_hold_secs: 3,
            narrative: NarrativeSettings::default(),
        };
        save_at(home.path(), &settings).unwrap();
        assert_eq!(load_at(home.path()).unwrap(), settings);
    }
}
