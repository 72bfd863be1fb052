//! Export status per template.
//!
//! Signal precedence:
//! 1. `NeverExported` (no hash recorded for the output path)
//! 2. `Missing` (hash recorded, file gone)
//! 3. `Modified` (file on disk differs from the recorded hash)
//! 4. `Outdated` (export would now produce different content)
//! 5. `Current`

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use waliadmin_report::TemplateKind;

use crate::pipeline::{prepare, ExportOptions};
use crate::writer::{content_hash, output_path, render_wrapped};
use crate::{error::io_err, hash_store, ExportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    NeverExported,
    Missing,
    Modified,
    Outdated,
    Current,
}

impl ExportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExportStatus::NeverExported => "never exported",
            ExportStatus::Missing => "missing",
            ExportStatus::Modified => "modified",
            ExportStatus::Outdated => "outdated",
            ExportStatus::Current => "current",
        }
    }
}

/// Status of one catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentStatus {
    pub template: &'static str,
    pub title: &'static str,
    pub path: PathBuf,
    pub status: ExportStatus,
}

/// Summary for `waliadmin status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub exported_at: Option<DateTime<Utc>>,
    pub documents: Vec<DocumentStatus>,
}

/// Check every catalog document under `options.out_dir`.
pub fn check(home: &Path, options: &ExportOptions) -> Result<StatusReport, ExportError> {
    let (dataset, renderer) = prepare(home)?;
    let store = hash_store::load_at(home)?;

    let mut documents = Vec::with_capacity(TemplateKind::all().len());
    for kind in TemplateKind::all() {
        let path = output_path(&options.out_dir, *kind);
        let key = path.to_string_lossy().to_string();

        let status = match store.files.get(&key) {
            None => ExportStatus::NeverExported,
            Some(recorded) => match hash_file(&path)? {
                None => ExportStatus::Missing,
                Some(on_disk) if &on_disk != recorded => ExportStatus::Modified,
                Some(_) => {
                    let fresh = render_wrapped(&renderer, *kind, &dataset, options)?;
                    if &content_hash(&fresh) == recorded {
                        ExportStatus::Current
                    } else {
                        ExportStatus::Outdated
                    }
                }
            },
        };

        let info = kind.info();
        documents.push(DocumentStatus {
            template: info.id,
            title: info.title,
            path,
            status,
        });
    }

    Ok(StatusReport {
        exported_at: store.exported_at,
        documents,
    })
}

/// Hash of the file's normalised content, or `None` when it does not exist.
fn hash_file(path: &Path) -> Result<Option<String>, ExportError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content_hash(&content))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Compact age of a timestamp: `42s`, `5m`, `3h`, `2d`.
pub fn format_datetime_age(timestamp: DateTime<Utc>) -> String {
    let age = Utc::now().signed_duration_since(timestamp).num_seconds().max(0) as u64;
    format_seconds(age)
}

fn format_seconds(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{seconds}s");
    }
    if seconds < 60 * 60 {
        return format!("{}m", seconds / 60);
    }
    if seconds < 60 * 60 * 24 {
        return format!("{}h", seconds / (60 * 60));
    }
    format!("{}d", seconds / (60 * 60 * 24))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ages_are_compact() {
        assert_eq!(format_datetime_age(Utc::now()), "0s");
        assert_eq!(format_seconds(65), "1m");
        assert_eq!(format_seconds(2 * 60 * 60 + 5), "2h");
        assert_eq!(format_seconds(3 * 24 * 60 * 60), "3d");
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ExportStatus::NeverExported).unwrap();
        assert_eq!(json, "\"never_exported\"");
    }
}
