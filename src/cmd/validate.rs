//! `validate` command: offline inventory checks

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use eol_check::inventory::EolSource;
use eol_check::ui;

pub fn cmd_validate(yaml: &Path) -> Result<()> {
    let entries = super::load_inventory(yaml)?;

    if ui::is_quiet() {
        return Ok(());
    }

    let manual = entries
        .iter()
        .filter(|e| e.source == EolSource::Manual)
        .count();
    let with_issues = entries.iter().filter(|e| e.issue_repo.is_some()).count();

    println!(
        "{} {} valid: {} entries ({} api, {} manual, {} with issue_repo)",
        "✓".green(),
        yaml.display(),
        entries.len(),
        entries.len() - manual,
        manual,
        with_issues
    );

    Ok(())
}
