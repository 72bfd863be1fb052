//! `waliadmin diff [<template>]`: show unified diffs for what export would write.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use waliadmin_core::config;
use waliadmin_export::{
    diff::diff_exports,
    pipeline::{ExportOptions, ExportScope},
};
use waliadmin_report::TemplateKind;

use super::home_dir;
use crate::{parse_date_arg, render_date};

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Template id to diff (default: all).
    pub template: Option<TemplateKind>,

    /// Render date printed in the documents (default: today).
    #[arg(long, value_parser = parse_date_arg, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let settings = config::load_at(&home).context("failed to load settings")?;
        let options = ExportOptions::from_settings(&home, &settings, render_date(self.date));
        let scope = match self.template {
            Some(kind) => ExportScope::Template(kind),
            None => ExportScope::All,
        };

        let diffs = diff_exports(&home, scope, &options).context("diff failed")?;
        if diffs.is_empty() {
            println!("No differences in {}.", options.out_dir.display());
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}
