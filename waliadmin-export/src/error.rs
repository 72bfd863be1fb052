//! Error types for waliadmin-export.

use std::path::PathBuf;

use thiserror::Error;

use waliadmin_core::StoreError;
use waliadmin_report::RenderError;

/// Errors from file export, diff and status checks.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Loading the dataset.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Export hash store could not be parsed.
    #[error("export store at {path} is malformed: {source}")]
    StoreParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("export store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures reported by a [`Clipboard`](crate::clipboard::Clipboard) port.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display server).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard was reachable but refused the content.
    #[error("clipboard rejected content: {0}")]
    Rejected(String),
}

/// Convenience constructor for [`ExportError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.into(),
        source,
    }
}
