//! `waliadmin init`

use anyhow::{Context, Result};
use clap::Args;

use waliadmin_core::{config, paths, store, Settings};

use super::home_dir;

/// Create `~/.waliadmin` with an empty dataset and default `config.yaml`.
/// Existing files are left alone.
#[derive(Args, Debug)]
pub struct InitArgs {}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let home = home_dir()?;
        let existed = paths::dataset_path(&home).exists();
        let dataset = store::init_at(&home).context("failed to initialize ~/.waliadmin")?;
        let summary = dataset.summary();

        let config_path = paths::config_path(&home);
        if !config_path.exists() {
            config::save_at(&home, &Settings::default())
                .context("failed to write default config.yaml")?;
        }

        if existed {
            println!("✓ Dataset already present; nothing changed");
        } else {
            println!("✓ Initialized waliadmin");
        }
        println!("  Dataset:   {}", paths::dataset_path(&home).display());
        println!("  Settings:  {}", config_path.display());
        println!("  Templates: {}", paths::templates_dir(&home).display());
        println!(
            "  {} students | {} counseling notes | {} achievements | {} documents",
            summary.students, summary.counseling_notes, summary.achievements, summary.documents
        );
        Ok(())
    }
}
