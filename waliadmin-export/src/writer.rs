//! Atomic writer and document export.
//!
//! ## `atomic_write`: 7-step protocol
//!
//! 1. Render and wrap the document (done by caller).
//! 2. SHA-256 hash the normalised content.
//! 3. Load the export store.
//! 4. Compare with the stored hash → skip if identical and the file is still there.
//! 5. Write to `<path>.tmp`.
//! 6. Rename to final path (atomic on POSIX).
//! 7. Update the store entry (caller saves the store).

use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};

use waliadmin_core::Dataset;
use waliadmin_report::{Renderer, TemplateKind};

use crate::envelope::wrap;
use crate::error::{io_err, ExportError};
use crate::hash_store::{self, ExportStoreFile, HashStore};
use crate::pipeline::ExportOptions;

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped: content matches the stored hash.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// One exported document.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub kind: TemplateKind,
    /// Full enveloped HTML, as written (or as it would be written).
    pub html: String,
    pub result: WriteResult,
}

/// `<out_dir>/<template_id>.html`
pub fn output_path(out_dir: &Path, kind: TemplateKind) -> PathBuf {
    out_dir.join(format!("{}.html", kind.id()))
}

pub(crate) fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n")
}

pub(crate) fn content_hash(content: &str) -> String {
    let mut h = Sha256::new();
    h.update(normalize_line_endings(content).as_bytes());
    hex::encode(h.finalize())
}

/// Render `kind` and wrap it in the export envelope.
pub(crate) fn render_wrapped(
    renderer: &Renderer,
    kind: TemplateKind,
    dataset: &Dataset,
    options: &ExportOptions,
) -> Result<String, ExportError> {
    let doc = renderer.render(kind, dataset, options.today)?;
    Ok(wrap(&doc.html, &options.title))
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Atomically write a single document and update the in-memory hash store.
pub(crate) fn atomic_write(
    path: &Path,
    content: &str,
    hash_store: &mut HashStore,
    dry_run: bool,
) -> Result<WriteResult, ExportError> {
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    atomic_write_with_tmp(path, content, hash_store, dry_run, &tmp)
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    hash_store: &mut HashStore,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, ExportError> {
    let normalized = normalize_line_endings(content);
    let digest = content_hash(&normalized);

    let key = path.to_string_lossy().to_string();
    if hash_store.get(&key) == Some(&digest) && path.exists() {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, &normalized).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    hash_store.insert(key, digest);

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// export_documents
// ---------------------------------------------------------------------------

/// Render, wrap and write every kind in `kinds` under `options.out_dir`.
///
/// The export store is saved once, and only when something was actually
/// written. A failure part-way through still records the files written
/// before it.
pub fn export_documents(
    home: &Path,
    dataset: &Dataset,
    renderer: &Renderer,
    kinds: &[TemplateKind],
    options: &ExportOptions,
) -> Result<Vec<ExportedDocument>, ExportError> {
    let mut store = hash_store::load_at(home)?;
    let mut exported = Vec::with_capacity(kinds.len());

    let outcome = write_all(dataset, renderer, kinds, options, &mut store, &mut exported);

    let wrote_any = exported
        .iter()
        .any(|d| matches!(d.result, WriteResult::Written { .. }));
    if wrote_any {
        store.exported_at = Some(Utc::now());
        if let Err(save_err) = hash_store::save_at(home, &store) {
            if let Err(write_err) = &outcome {
                tracing::error!("export stopped early: {write_err}");
            }
            return Err(save_err);
        }
    }
    outcome.map(|()| exported)
}

fn write_all(
    dataset: &Dataset,
    renderer: &Renderer,
    kinds: &[TemplateKind],
    options: &ExportOptions,
    store: &mut ExportStoreFile,
    exported: &mut Vec<ExportedDocument>,
) -> Result<(), ExportError> {
    for kind in kinds {
        let html = render_wrapped(renderer, *kind, dataset, options)?;
        let path = output_path(&options.out_dir, *kind);
        let result = atomic_write(&path, &html, &mut store.files, options.dry_run)?;
        exported.push(ExportedDocument {
            kind: *kind,
            html,
            result,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
