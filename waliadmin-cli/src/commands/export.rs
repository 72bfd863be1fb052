//! `waliadmin export`: write documents to the export directory.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use waliadmin_core::config;
use waliadmin_export::{
    pipeline::{self, ExportOptions, ExportScope},
    transfer, ExportedDocument, SystemClipboard, WriteResult,
};
use waliadmin_report::TemplateKind;

use super::home_dir;
use crate::{parse_date_arg, render_date};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Template id to export (omit when using `--all`).
    #[arg(required_unless_present = "all")]
    pub template: Option<TemplateKind>,

    /// Export every template.
    #[arg(long, conflicts_with = "template")]
    pub all: bool,

    /// Export directory (default: `output_dir` from config, or ~/.waliadmin/exports).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Show what would be written without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Also copy the document to the system clipboard.
    #[arg(long, conflicts_with = "all")]
    pub clipboard: bool,

    /// Render date printed in the documents (default: today).
    #[arg(long, value_parser = parse_date_arg, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

impl ExportArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let settings = config::load_at(&home).context("failed to load settings")?;

        let mut options = ExportOptions::from_settings(&home, &settings, render_date(self.date));
        options.dry_run = self.dry_run;
        if let Some(dir) = self.out_dir {
            options.out_dir = dir;
        }

        let scope = match self.template {
            Some(kind) => ExportScope::Template(kind),
            None => ExportScope::All,
        };
        let documents = pipeline::run(&home, scope, &options).context("export failed")?;
        print_results(&documents, self.dry_run);

        if self.clipboard {
            if let Some(doc) = documents.first() {
                copy_to_clipboard(doc, settings.clipboard_hold());
            }
        }
        Ok(())
    }
}

/// Copy the wrapped document. On X11 this blocks for up to `hold` so the
/// selection can be pasted or picked up by a clipboard manager.
fn copy_to_clipboard(doc: &ExportedDocument, hold: Duration) {
    let copied = match SystemClipboard::new(hold) {
        Ok(mut clipboard) => {
            println!(
                "Copying '{}' to clipboard (held up to {}s)...",
                doc.kind,
                clipboard.hold().as_secs()
            );
            transfer(&mut clipboard, &doc.html)
        }
        Err(e) => {
            tracing::warn!("{e}");
            false
        }
    };
    if copied {
        println!("✓ Copied '{}' to clipboard", doc.kind);
    } else {
        println!("✗ Could not copy '{}' to clipboard", doc.kind);
    }
}

fn print_results(documents: &[ExportedDocument], dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let written = documents
        .iter()
        .filter(|d| {
            matches!(
                d.result,
                WriteResult::Written { .. } | WriteResult::WouldWrite { .. }
            )
        })
        .count();
    let unchanged = documents.len() - written;

    println!("{prefix}✓ Exported ({written} written, {unchanged} unchanged)");
    for doc in documents {
        match &doc.result {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
        }
    }
}
