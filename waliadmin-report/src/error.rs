//! Error types for waliadmin-report.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while building or rendering a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Parse or render failure in an embedded or user-supplied template.
    #[error("document template error: {0}")]
    Tera(#[from] tera::Error),

    #[error("failed to build document context: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading `~/.waliadmin/templates`.
    #[error("cannot read override template {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}
