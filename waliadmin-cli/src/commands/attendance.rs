//! `waliadmin attendance save|show`

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use waliadmin_core::{AttendanceEntry, AttendanceStatus, StudentId};

use super::{home_dir, load_dataset, record_date, require_student, save_dataset};
use crate::parse_date_arg;

/// Daily attendance.
#[derive(Subcommand, Debug)]
pub enum AttendanceCommand {
    /// Record one day for the whole roster, replacing what was saved for it.
    Save(SaveArgs),

    /// Show what was recorded for one day.
    Show {
        /// Day to show (default: today).
        #[arg(long, value_parser = parse_date_arg, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Day being recorded (default: today).
    #[arg(long, value_parser = parse_date_arg, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Non-present student, e.g. `--mark s3=S`. Codes: H, I (izin), S (sakit),
    /// A (alfa). Students not marked are recorded as present.
    #[arg(long = "mark", value_name = "ID=CODE", value_parser = parse_mark)]
    pub marks: Vec<(StudentId, AttendanceStatus)>,
}

fn parse_mark(s: &str) -> std::result::Result<(StudentId, AttendanceStatus), String> {
    let (id, code) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid mark '{s}'; expected ID=CODE"))?;
    Ok((StudentId::from(id.trim()), code.trim().parse()?))
}

#[derive(Tabled)]
struct DayRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "status")]
    status: &'static str,
}

pub fn run(cmd: AttendanceCommand) -> Result<()> {
    match cmd {
        AttendanceCommand::Save(args) => save(args),
        AttendanceCommand::Show { date } => show(date),
    }
}

fn save(args: SaveArgs) -> Result<()> {
    let home = home_dir()?;
    let mut dataset = load_dataset(&home)?;
    if dataset.students.is_empty() {
        bail!("no students on the roster; run `waliadmin student add <name>` first");
    }
    for (id, _) in &args.marks {
        require_student(&dataset, id)?;
    }

    let date = record_date(args.date);
    let batch: Vec<AttendanceEntry> = dataset
        .students
        .iter()
        .map(|s| AttendanceEntry {
            date: date.clone(),
            student_id: s.id.clone(),
            status: args
                .marks
                .iter()
                .rev()
                .find(|(id, _)| id == &s.id)
                .map(|(_, status)| *status)
                .unwrap_or_default(),
            note: String::new(),
        })
        .collect();

    let count = |status: AttendanceStatus| batch.iter().filter(|e| e.status == status).count();
    let summary = format!(
        "{} H, {} S, {} I, {} A",
        count(AttendanceStatus::Present),
        count(AttendanceStatus::Sick),
        count(AttendanceStatus::ExcusedLeave),
        count(AttendanceStatus::Absent),
    );

    dataset
        .save_attendance_batch(batch)
        .with_context(|| format!("failed to save attendance for {date}"))?;
    save_dataset(&home, &dataset)?;
    println!("✓ Saved attendance for {date}: {summary}");
    Ok(())
}

fn show(date: Option<NaiveDate>) -> Result<()> {
    let dataset = load_dataset(&home_dir()?)?;
    let date = record_date(date);
    let rows: Vec<DayRow> = dataset
        .attendance
        .iter()
        .filter(|e| e.date == date)
        .map(|e| DayRow {
            id: e.student_id.to_string(),
            name: dataset
                .find_student(&e.student_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "-".to_string()),
            status: e.status.code(),
        })
        .collect();

    if rows.is_empty() {
        println!("No attendance recorded for {date}.");
        return Ok(());
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
