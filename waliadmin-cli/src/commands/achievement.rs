//! `waliadmin achievement add|remove|list`

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use waliadmin_core::{AchievementEntry, AchievementLevel, RecordId, StudentId};

use super::{home_dir, load_dataset, record_date, require_student, save_dataset};
use crate::parse_date_arg;

/// Achievement book.
#[derive(Subcommand, Debug)]
pub enum AchievementCommand {
    /// Record an achievement.
    Add(AddArgs),

    /// Delete an achievement by id.
    Remove {
        /// Achievement id (see `waliadmin achievement list`).
        id: String,
    },

    /// List achievements in storage order.
    List,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Student id (see `waliadmin student list`).
    pub student: String,

    /// Competition or award name.
    pub title: String,

    /// sekolah | kecamatan | kabupaten/kota | provinsi | nasional | internasional
    #[arg(long, default_value = "sekolah")]
    pub level: AchievementLevel,

    /// Placing, e.g. "Juara 1".
    #[arg(long, default_value = "")]
    pub rank: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, value_parser = parse_date_arg, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

#[derive(Tabled)]
struct AchievementRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "date")]
    date: String,
    #[tabled(rename = "student")]
    student: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "level")]
    level: &'static str,
    #[tabled(rename = "rank")]
    rank: String,
}

pub fn run(cmd: AchievementCommand) -> Result<()> {
    match cmd {
        AchievementCommand::Add(args) => add(args),
        AchievementCommand::Remove { id } => remove(id),
        AchievementCommand::List => list(),
    }
}

fn add(args: AddArgs) -> Result<()> {
    let home = home_dir()?;
    let mut dataset = load_dataset(&home)?;
    let student_id = StudentId::from(args.student);
    let name = require_student(&dataset, &student_id)?.name.clone();

    let id = dataset.next_achievement_id();
    dataset.add_achievement(AchievementEntry {
        id: id.clone(),
        student_id,
        date: record_date(args.date),
        title: args.title.clone(),
        level: args.level,
        rank: args.rank,
        description: args.description,
    });
    save_dataset(&home, &dataset)?;
    println!("✓ Added '{}' for '{name}' ({id})", args.title);
    Ok(())
}

fn remove(id: String) -> Result<()> {
    let home = home_dir()?;
    let mut dataset = load_dataset(&home)?;
    let id = RecordId::from(id);
    if !dataset.remove_achievement(&id) {
        bail!("unknown achievement '{id}'; see `waliadmin achievement list`");
    }
    save_dataset(&home, &dataset)?;
    println!("✓ Removed {id}");
    Ok(())
}

fn list() -> Result<()> {
    let dataset = load_dataset(&home_dir()?)?;
    if dataset.achievements.is_empty() {
        println!("No achievements recorded.");
        return Ok(());
    }
    let rows: Vec<AchievementRow> = dataset
        .achievements
        .iter()
        .map(|a| AchievementRow {
            id: a.id.to_string(),
            date: a.date.clone(),
            student: dataset
                .find_student(&a.student_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| a.student_id.to_string()),
            title: a.title.clone(),
            level: a.level.label(),
            rank: a.rank.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
