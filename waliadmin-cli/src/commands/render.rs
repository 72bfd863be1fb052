//! `waliadmin render <template>`: render one document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use waliadmin_core::{config, paths, store};
use waliadmin_export::wrap;
use waliadmin_report::Renderer;

use super::home_dir;
use crate::{parse_date_arg, render_date};

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template id (see `waliadmin templates`). Unknown ids render a placeholder.
    pub template: String,

    /// Render date printed in the document (default: today).
    #[arg(long, value_parser = parse_date_arg, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Wrap the body in a complete HTML document.
    #[arg(long)]
    pub wrap: bool,

    /// Write to a file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let dataset = store::load_at(&home).context("failed to load dataset")?;
        let settings = config::load_at(&home).context("failed to load settings")?;
        let renderer = Renderer::with_overrides(&paths::templates_dir(&home))
            .context("failed to load templates")?;

        let doc = renderer
            .render_id(&self.template, &dataset, render_date(self.date))
            .with_context(|| format!("render failed for '{}'", self.template))?;
        if doc.kind.is_none() {
            tracing::warn!("unknown template '{}', rendered placeholder", self.template);
        }

        let html = if self.wrap {
            wrap(&doc.html, &settings.document_title)
        } else {
            doc.html
        };

        match self.out {
            Some(path) => {
                std::fs::write(&path, &html)
                    .with_context(|| format!("failed to write '{}'", path.display()))?;
                eprintln!("✓ Wrote {}", path.display());
            }
            None => print!("{html}"),
        }
        Ok(())
    }
}
