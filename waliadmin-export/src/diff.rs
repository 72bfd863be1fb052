//! Unified diff between what `waliadmin export` would write and what is on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::pipeline::{prepare, ExportOptions, ExportScope};
use crate::writer::{normalize_line_endings, output_path, render_wrapped};
use crate::{error::io_err, ExportError};

/// A single document diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Render what export would generate and compare it with the files in
/// `options.out_dir`. Documents whose file already matches are omitted.
///
/// No files are written.
pub fn diff_exports(
    home: &Path,
    scope: ExportScope,
    options: &ExportOptions,
) -> Result<Vec<FileDiff>, ExportError> {
    let (dataset, renderer) = prepare(home)?;

    let mut diffs = Vec::new();
    for kind in scope.kinds() {
        let rendered =
            normalize_line_endings(&render_wrapped(&renderer, kind, &dataset, options)?);
        let path = output_path(&options.out_dir, kind);
        let existing = read_existing_or_empty(&path)?;
        if existing == rendered {
            continue;
        }

        let name = format!("{}.html", kind.id());
        let unified = TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&format!("a/{name}"), &format!("b/{name}"))
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path,
            unified_diff: unified,
        });
    }
    Ok(diffs)
}

fn read_existing_or_empty(path: &Path) -> Result<String, ExportError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(normalize_line_endings(&content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}
