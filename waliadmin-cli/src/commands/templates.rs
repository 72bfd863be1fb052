//! `waliadmin templates`: list the document catalog.

use anyhow::{Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use waliadmin_report::catalog;

#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "id")]
    id: &'static str,
    #[tabled(rename = "")]
    icon: &'static str,
    #[tabled(rename = "title")]
    title: &'static str,
    #[tabled(rename = "category")]
    category: &'static str,
}

impl TemplatesArgs {
    pub fn run(self) -> Result<()> {
        let entries = catalog();
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).context("failed to serialize catalog")?
            );
            return Ok(());
        }

        let rows: Vec<TemplateRow> = entries
            .into_iter()
            .map(|t| TemplateRow {
                id: t.id,
                icon: t.icon,
                title: t.title,
                category: t.category,
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
