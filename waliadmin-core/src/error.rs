//! Error types for waliadmin-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from dataset and settings persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (dataset save path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error (settings save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse error on load: includes file path and line/column from serde_json.
    #[error("failed to parse dataset at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parse error while loading `config.yaml`.
    #[error("failed to parse settings at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`: cannot locate `~/.waliadmin/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The dataset file did not exist at the expected path.
    #[error("dataset not found at {path}; run `waliadmin init` first")]
    DatasetNotFound { path: PathBuf },
}

/// Rejections from the record mutation operations on [`crate::Dataset`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// An attendance batch must cover exactly one day.
    #[error("attendance batch mixes dates: expected {expected}, found {found}")]
    MixedBatchDates { expected: String, found: String },

    /// A student appears twice in one attendance batch.
    #[error("attendance batch for {date} lists student '{student}' more than once")]
    DuplicateAttendance { date: String, student: String },

    /// A record date that is not `YYYY-MM-DD`.
    #[error("invalid date '{0}'; expected YYYY-MM-DD")]
    InvalidDate(String),

    /// A student with the same id is already on the roster.
    #[error("student id '{0}' already exists")]
    DuplicateStudent(String),
}
