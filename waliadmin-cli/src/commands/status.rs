//! `waliadmin status`: export status per document.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use waliadmin_core::{config, store, DatasetSummary};
use waliadmin_export::{
    pipeline::ExportOptions,
    status::{check, format_datetime_age},
    ExportStatus, StatusReport,
};

use super::home_dir;
use crate::render_date;

/// Arguments for `waliadmin status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusJson {
    summary: DatasetSummary,
    export_dir: String,
    last_export_at: Option<String>,
    documents: Vec<DocumentJson>,
}

#[derive(Serialize)]
struct DocumentJson {
    template: &'static str,
    title: &'static str,
    status: ExportStatus,
    path: String,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "template")]
    template: &'static str,
    #[tabled(rename = "title")]
    title: &'static str,
    #[tabled(rename = "status")]
    status: String,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let dataset =
            store::load_at(&home).context("failed to load dataset")?;
        let settings = config::load_at(&home).context("failed to load settings")?;
        let options = ExportOptions::from_settings(&home, &settings, render_date(None));

        let report = check(&home, &options).context("status check failed")?;
        let summary = dataset.summary();
        let export_dir = options.out_dir.display().to_string();

        if self.json {
            print_json(summary, export_dir, report)?;
        } else {
            print_table(summary, &export_dir, report);
        }
        Ok(())
    }
}

fn print_json(summary: DatasetSummary, export_dir: String, report: StatusReport) -> Result<()> {
    let payload = StatusJson {
        summary,
        export_dir,
        last_export_at: report.exported_at.map(|t| t.to_rfc3339()),
        documents: report
            .documents
            .into_iter()
            .map(|d| DocumentJson {
                template: d.template,
                title: d.title,
                status: d.status,
                path: d.path.display().to_string(),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(summary: DatasetSummary, export_dir: &str, report: StatusReport) {
    let last_export = report
        .exported_at
        .map(|t| format!("{} ago", format_datetime_age(t)))
        .unwrap_or_else(|| "never".to_string());
    println!(
        "Waliadmin v{} | {} students | {} counseling notes | {} achievements | last export {}",
        env!("CARGO_PKG_VERSION"),
        summary.students,
        summary.counseling_notes,
        summary.achievements,
        last_export,
    );
    println!("Export dir: {export_dir}");

    let needs_export = report
        .documents
        .iter()
        .filter(|d| d.status != ExportStatus::Current)
        .count();
    let rows: Vec<StatusTableRow> = report
        .documents
        .into_iter()
        .map(|d| StatusTableRow {
            template: d.template,
            title: d.title,
            status: status_indicator(d.status),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if needs_export > 0 {
        println!("Run 'waliadmin export --all' to refresh {needs_export} document(s).");
    }
}

fn status_indicator(status: ExportStatus) -> String {
    let label = status.label().to_uppercase();
    match status {
        ExportStatus::NeverExported => label.bright_black().bold().to_string(),
        ExportStatus::Current => label.green().bold().to_string(),
        ExportStatus::Outdated => label.yellow().bold().to_string(),
        ExportStatus::Modified => label.red().bold().to_string(),
        ExportStatus::Missing => label.magenta().bold().to_string(),
    }
}
