//! Waliadmin: homeroom-teacher document generator CLI.
//!
//! # Usage
//!
//! ```text
//! waliadmin init
//! waliadmin setup show | set [--school-name ...] [--semester ganjil|genap] ...
//! waliadmin student list [--json] | add <name> [--nis ...] | update <id> ... | remove <id>
//! waliadmin attendance save [--date YYYY-MM-DD] [--mark <id>=S|I|A ...] | show [--date ...]
//! waliadmin grade add <student> <score> --subject <subject> [--category ...] | list
//! waliadmin guidance add <student> <description> [--type pelanggaran] [--action ...] | list
//! waliadmin achievement add <student> <title> [--level ...] [--rank ...] | remove <id> | list
//! waliadmin templates [--json]
//! waliadmin render <template> [--date YYYY-MM-DD] [--wrap] [--out <file>]
//! waliadmin export [<template> | --all] [--out-dir <dir>] [--dry-run] [--clipboard] [--date ...]
//! waliadmin diff [<template>] [--date ...]
//! waliadmin status [--json]
//! waliadmin narrate <student> <keywords>
//! ```

mod commands;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

use commands::{
    achievement::AchievementCommand, attendance::AttendanceCommand, diff::DiffArgs,
    export::ExportArgs, grade::GradeCommand, guidance::GuidanceCommand, init::InitArgs,
    narrate::NarrateArgs, render::RenderArgs, setup::SetupCommand, status::StatusArgs,
    student::StudentCommand, templates::TemplatesArgs,
};
use waliadmin_report::format::DATE_FORMAT;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "WALIADMIN_LOG";

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "waliadmin",
    version,
    about = "Generate homeroom-teacher administration documents from class records",
    long_about = None,
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create ~/.waliadmin with an empty dataset.
    Init(InitArgs),

    /// Institution and homeroom profile.
    Setup {
        #[command(subcommand)]
        command: SetupCommand,
    },

    /// Class roster.
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Daily attendance.
    Attendance {
        #[command(subcommand)]
        command: AttendanceCommand,
    },

    /// Score book.
    Grade {
        #[command(subcommand)]
        command: GradeCommand,
    },

    /// Counseling and incident notes.
    Guidance {
        #[command(subcommand)]
        command: GuidanceCommand,
    },

    /// Student achievements.
    Achievement {
        #[command(subcommand)]
        command: AchievementCommand,
    },

    /// List the document templates.
    Templates(TemplatesArgs),

    /// Render one document to stdout or a file.
    Render(RenderArgs),

    /// Write documents to the export directory.
    Export(ExportArgs),

    /// Show unified diff of what export would write.
    Diff(DiffArgs),

    /// Show export status per document.
    Status(StatusArgs),

    /// Generate a development narrative for a student.
    Narrate(NarrateArgs),
}

// ---------------------------------------------------------------------------
// Shared argument parsing
// ---------------------------------------------------------------------------

/// `--date` parser: `YYYY-MM-DD`.
pub fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| format!("invalid date '{s}'; expected YYYY-MM-DD"))
}

/// The render date: `--date` when given, otherwise the local calendar day.
pub fn render_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Setup { command } => commands::setup::run(command),
        Commands::Student { command } => commands::student::run(command),
        Commands::Attendance { command } => commands::attendance::run(command),
        Commands::Grade { command } => commands::grade::run(command),
        Commands::Guidance { command } => commands::guidance::run(command),
        Commands::Achievement { command } => commands::achievement::run(command),
        Commands::Templates(args) => args.run(),
        Commands::Render(args) => args.run(),
        Commands::Export(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Narrate(args) => args.run(),
    }
}
