//! `waliadmin guidance add|list`: the counseling book.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use waliadmin_core::{CounselingEntry, CounselingKind, StudentId};
use waliadmin_report::MISSING_STUDENT_LABEL;

use super::{home_dir, load_dataset, record_date, require_student, save_dataset};
use crate::parse_date_arg;

#[derive(Subcommand, Debug)]
pub enum GuidanceCommand {
    /// Write a counseling note.
    Add(AddArgs),

    /// List notes in the order they were written.
    List,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Student id (see `waliadmin student list`).
    pub student: String,

    /// Problem or incident.
    pub description: String,

    /// konseling | pelanggaran | prestasi | lainnya
    #[arg(long = "type", value_name = "TYPE", default_value = "konseling")]
    pub kind: CounselingKind,

    /// Follow-up action (tindak lanjut).
    #[arg(long, default_value = "")]
    pub action: String,

    #[arg(long, value_parser = parse_date_arg, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

#[derive(Tabled)]
struct NoteRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "date")]
    date: String,
    #[tabled(rename = "student")]
    student: String,
    #[tabled(rename = "type")]
    kind: &'static str,
    #[tabled(rename = "description")]
    description: String,
}

pub fn run(cmd: GuidanceCommand) -> Result<()> {
    match cmd {
        GuidanceCommand::Add(args) => add(args),
        GuidanceCommand::List => list(),
    }
}

fn add(args: AddArgs) -> Result<()> {
    let home = home_dir()?;
    let mut dataset = load_dataset(&home)?;
    let student_id = StudentId::from(args.student);
    let name = require_student(&dataset, &student_id)?.name.clone();

    let id = dataset.next_counseling_id();
    dataset.add_counseling(CounselingEntry {
        id: id.clone(),
        date: record_date(args.date),
        student_id,
        kind: args.kind,
        description: args.description,
        action: args.action,
    });
    save_dataset(&home, &dataset)?;
    println!("✓ Added {} note for '{name}' ({id})", args.kind.label());
    Ok(())
}

fn list() -> Result<()> {
    let dataset = load_dataset(&home_dir()?)?;
    if dataset.guidance.is_empty() {
        println!("No counseling notes.");
        return Ok(());
    }
    let rows: Vec<NoteRow> = dataset
        .guidance
        .iter()
        .map(|g| NoteRow {
            id: g.id.to_string(),
            date: g.date.clone(),
            student: dataset
                .find_student(&g.student_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| MISSING_STUDENT_LABEL.to_string()),
            kind: g.kind.label(),
            description: g.description.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
