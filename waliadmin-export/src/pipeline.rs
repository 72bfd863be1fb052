//! Shared export entrypoint used by `waliadmin export`, `diff` and `status`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use waliadmin_core::{paths, store, Dataset, Settings};
use waliadmin_report::{Renderer, TemplateKind};

use crate::writer::{export_documents, ExportedDocument};
use crate::ExportError;

/// Which documents an export run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// Every catalog template.
    All,
    /// A single template.
    Template(TemplateKind),
}

impl ExportScope {
    pub fn kinds(&self) -> Vec<TemplateKind> {
        match self {
            ExportScope::All => TemplateKind::all().to_vec(),
            ExportScope::Template(kind) => vec![*kind],
        }
    }
}

/// Per-run export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    /// Envelope `<title>`.
    pub title: String,
    /// Render date printed in the documents.
    pub today: NaiveDate,
    pub dry_run: bool,
}

impl ExportOptions {
    /// Options from `config.yaml` settings, not a dry run.
    pub fn from_settings(home: &Path, settings: &Settings, today: NaiveDate) -> Self {
        ExportOptions {
            out_dir: settings.output_dir_at(home),
            title: settings.document_title.clone(),
            today,
            dry_run: false,
        }
    }
}

/// Load the dataset and build a renderer that honours user template overrides.
pub fn prepare(home: &Path) -> Result<(Dataset, Renderer), ExportError> {
    let dataset = store::load_at(home)?;
    let renderer = Renderer::with_overrides(&paths::templates_dir(home))?;
    Ok((dataset, renderer))
}

/// Run the export pipeline for a scope.
pub fn run(
    home: &Path,
    scope: ExportScope,
    options: &ExportOptions,
) -> Result<Vec<ExportedDocument>, ExportError> {
    let (dataset, renderer) = prepare(home)?;
    export_documents(home, &dataset, &renderer, &scope.kinds(), options)
}
