//! `waliadmin student list|add|update|remove`

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use waliadmin_core::{Gender, StudentId, StudentRecord, RECORD_DATE_FORMAT};

use super::{home_dir, load_dataset, save_dataset};
use crate::parse_date_arg;

/// Manage the class roster.
#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    /// List the roster in storage order.
    List {
        /// Emit the roster as JSON records.
        #[arg(long)]
        json: bool,
    },

    /// Add a student to the roster.
    Add(AddArgs),

    /// Change fields of an existing student.
    Update(UpdateArgs),

    /// Remove a student. Their attendance, grades and notes are kept.
    Remove {
        /// Student id (see `waliadmin student list`).
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Full name.
    pub name: String,

    /// Student id. Defaults to the next free `s<n>`.
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub fields: StudentFields,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Student id (see `waliadmin student list`).
    pub id: String,

    /// New full name.
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub fields: StudentFields,
}

/// Optional roster fields shared by `add` and `update`.
#[derive(Args, Debug)]
pub struct StudentFields {
    #[arg(long)]
    pub nis: Option<String>,

    #[arg(long)]
    pub nisn: Option<String>,

    /// L (laki-laki) or P (perempuan).
    #[arg(long, value_name = "L|P")]
    pub sex: Option<Gender>,

    #[arg(long)]
    pub birth_place: Option<String>,

    #[arg(long, value_parser = parse_date_arg, value_name = "YYYY-MM-DD")]
    pub birth_date: Option<NaiveDate>,

    #[arg(long)]
    pub religion: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub father: Option<String>,

    #[arg(long)]
    pub mother: Option<String>,

    /// Parent phone number.
    #[arg(long)]
    pub phone: Option<String>,
}

impl StudentFields {
    fn apply(self, student: &mut StudentRecord) {
        fn set(slot: &mut String, value: Option<String>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        set(&mut student.nis, self.nis);
        set(&mut student.nisn, self.nisn);
        if let Some(sex) = self.sex {
            student.gender = sex;
        }
        set(&mut student.birth_place, self.birth_place);
        set(
            &mut student.birth_date,
            self.birth_date
                .map(|d| d.format(RECORD_DATE_FORMAT).to_string()),
        );
        set(&mut student.religion, self.religion);
        set(&mut student.address, self.address);
        set(&mut student.father_name, self.father);
        set(&mut student.mother_name, self.mother);
        set(&mut student.parent_phone, self.phone);
    }
}

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "NIS/NISN")]
    identifiers: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "L/P")]
    sex: &'static str,
}

pub fn run(cmd: StudentCommand) -> Result<()> {
    match cmd {
        StudentCommand::List { json } => list(json),
        StudentCommand::Add(args) => add(args),
        StudentCommand::Update(args) => update(args),
        StudentCommand::Remove { id } => remove(id),
    }
}

fn list(json: bool) -> Result<()> {
    let dataset = load_dataset(&home_dir()?)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&dataset.students)
                .context("failed to serialize roster")?
        );
        return Ok(());
    }
    if dataset.students.is_empty() {
        println!("No students on the roster.");
        println!("Run: waliadmin student add <name>");
        return Ok(());
    }

    let rows: Vec<StudentRow> = dataset
        .students
        .iter()
        .map(|s| StudentRow {
            id: s.id.to_string(),
            identifiers: format!("{}/{}", s.nis, s.nisn),
            name: s.name.clone(),
            sex: s.gender.code(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

fn add(args: AddArgs) -> Result<()> {
    let home = home_dir()?;
    let mut dataset = load_dataset(&home)?;
    if args.name.trim().is_empty() {
        bail!("student name must not be empty");
    }

    let id = match args.id {
        Some(id) => StudentId::from(id),
        None => dataset.next_student_id(),
    };
    let mut student = StudentRecord {
        id: id.clone(),
        name: args.name,
        ..Default::default()
    };
    args.fields.apply(&mut student);
    let name = student.name.clone();

    dataset
        .add_student(student)
        .with_context(|| format!("failed to add '{name}'"))?;
    save_dataset(&home, &dataset)?;
    println!("✓ Added '{name}' ({id})");
    Ok(())
}

fn update(args: UpdateArgs) -> Result<()> {
    let home = home_dir()?;
    let mut dataset = load_dataset(&home)?;
    let id = StudentId::from(args.id);

    let mut student = super::require_student(&dataset, &id)?.clone();
    if let Some(name) = args.name {
        student.name = name;
    }
    args.fields.apply(&mut student);
    let name = student.name.clone();

    dataset.update_student(student);
    save_dataset(&home, &dataset)?;
    println!("✓ Updated '{name}' ({id})");
    Ok(())
}

fn remove(id: String) -> Result<()> {
    let home = home_dir()?;
    let mut dataset = load_dataset(&home)?;
    let id = StudentId::from(id);
    if !dataset.remove_student(&id) {
        bail!("unknown student '{id}'; see `waliadmin student list`");
    }
    save_dataset(&home, &dataset)?;
    println!("✓ Removed {id}");
    Ok(())
}
