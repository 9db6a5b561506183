//! `generate-ics` command

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::fs;
use std::path::Path;

use eol_check::calendar::generate_calendar;
use eol_check::config::Settings;
use eol_check::resolve::ApiResolver;
use eol_check::ui;

pub fn cmd_generate_ics(yaml: &Path, ics: &Path) -> Result<()> {
    let settings = Settings::from_env()?;
    let entries = super::load_inventory(yaml)?;
    let resolver = ApiResolver::new(&settings);

    let calendar = generate_calendar(&entries, &resolver, Utc::now())?;

    if let Some(parent) = ics.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(ics, calendar.to_ics())
        .with_context(|| format!("Failed to write calendar to {}", ics.display()))?;

    if !ui::is_quiet() {
        println!(
            "{} Wrote {} event(s) to {}",
            "✓".green(),
            calendar.events().len(),
            ui::colors::identifier(&ics.display().to_string())
        );
    }

    Ok(())
}
