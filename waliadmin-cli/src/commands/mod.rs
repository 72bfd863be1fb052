//! One module per subcommand.

pub mod achievement;
pub mod attendance;
pub mod diff;
pub mod export;
pub mod grade;
pub mod guidance;
pub mod init;
pub mod narrate;
pub mod render;
pub mod setup;
pub mod status;
pub mod student;
pub mod templates;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use waliadmin_core::{store, Dataset, StudentId, StudentRecord, RECORD_DATE_FORMAT};

use crate::render_date;

/// Home directory every command resolves `~/.waliadmin` against.
pub fn home_dir() -> Result<PathBuf> {
    waliadmin_core::store::home().context("could not determine home directory")
}

pub fn load_dataset(home: &Path) -> Result<Dataset> {
    store::load_at(home).context("failed to load dataset")
}

pub fn save_dataset(home: &Path, dataset: &Dataset) -> Result<()> {
    store::save_at(home, dataset).context("failed to save dataset")
}

/// Roster entry for `id`, or an error naming the unknown id.
pub fn require_student<'a>(dataset: &'a Dataset, id: &StudentId) -> Result<&'a StudentRecord> {
    dataset
        .find_student(id)
        .with_context(|| format!("unknown student '{id}'; see `waliadmin student list`"))
}

/// Stored form of a record `--date`, defaulting to today.
pub fn record_date(date: Option<NaiveDate>) -> String {
    render_date(date).format(RECORD_DATE_FORMAT).to_string()
}
