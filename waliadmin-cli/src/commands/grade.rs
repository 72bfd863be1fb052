//! `waliadmin grade add|list`

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use waliadmin_core::{GradeEntry, StudentId};
use waliadmin_report::grade_average;

use super::{home_dir, load_dataset, record_date, require_student, save_dataset};
use crate::parse_date_arg;

/// Score book.
#[derive(Subcommand, Debug)]
pub enum GradeCommand {
    /// Record one score.
    Add(AddArgs),

    /// Show each student's score count and average.
    List,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Student id (see `waliadmin student list`).
    pub student: String,

    /// Score, normally 0-100.
    pub score: f64,

    #[arg(long)]
    pub subject: String,

    /// Ulangan Harian, Tugas, PTS, PAS, Sikap, ...
    #[arg(long, default_value = "Ulangan Harian")]
    pub category: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, value_parser = parse_date_arg, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

#[derive(Tabled)]
struct AverageRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "scores")]
    scores: usize,
    #[tabled(rename = "average")]
    average: String,
}

pub fn run(cmd: GradeCommand) -> Result<()> {
    match cmd {
        GradeCommand::Add(args) => add(args),
        GradeCommand::List => list(),
    }
}

fn add(args: AddArgs) -> Result<()> {
    let home = home_dir()?;
    let mut dataset = load_dataset(&home)?;
    let student_id = StudentId::from(args.student);
    let name = require_student(&dataset, &student_id)?.name.clone();
    if !(0.0..=100.0).contains(&args.score) {
        tracing::warn!("score {} is outside 0-100", args.score);
    }

    let id = dataset.next_grade_id();
    dataset.add_grade(GradeEntry {
        id: id.clone(),
        student_id,
        subject: args.subject.clone(),
        category: args.category,
        score: args.score,
        description: args.description,
        date: record_date(args.date),
    });
    save_dataset(&home, &dataset)?;
    println!("✓ Recorded {} for '{name}' in {} ({id})", args.score, args.subject);
    Ok(())
}

fn list() -> Result<()> {
    let dataset = load_dataset(&home_dir()?)?;
    let rows: Vec<AverageRow> = dataset
        .students
        .iter()
        .map(|s| AverageRow {
            id: s.id.to_string(),
            name: s.name.clone(),
            scores: dataset.grades.iter().filter(|g| g.student_id == s.id).count(),
            average: grade_average(&dataset, &s.id).display(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
