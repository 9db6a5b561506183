//! `check` command: EOL overview without side effects

use anyhow::Result;
use serde_json::Value;
use std::path::Path;

use eol_check::config::Settings;
use eol_check::resolve::ApiResolver;
use eol_check::status::{self, EolState, StatusRow};
use eol_check::ui::{self, colors, format};

pub fn cmd_check(yaml: &Path, json: bool) -> Result<()> {
    let settings = Settings::from_env()?;
    let entries = super::load_inventory(yaml)?;
    let resolver = ApiResolver::new(&settings);

    let rows = status::check(&entries, &resolver, super::today(), settings.default_warn_days);

    if json {
        let array: Vec<Value> = rows.iter().map(StatusRow::to_json).collect();
        println!("{}", serde_json::to_string_pretty(&array)?);
    } else {
        print_table(&rows);
    }

    let unresolved = rows
        .iter()
        .filter(|r| r.state == EolState::Unknown)
        .count();
    if unresolved > 0 {
        anyhow::bail!("{} of {} entries could not be resolved", unresolved, rows.len());
    }

    Ok(())
}

fn print_table(rows: &[StatusRow]) {
    if rows.is_empty() {
        if !ui::is_quiet() {
            println!("No entries in inventory.");
        }
        return;
    }

    let width = rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0);

    for row in rows {
        let label = format::pad(&row.label, width);
        match (row.eol, row.days) {
            (Some(eol), Some(days)) => {
                let detail = format!("{}  {}", eol.format("%Y-%m-%d"), format::days_left(days));
                let detail = match row.state {
                    EolState::Expired => colors::error(&detail),
                    EolState::Due => colors::warning(&detail),
                    _ => colors::success(&detail),
                };
                let repo = row
                    .issue_repo
                    .as_deref()
                    .map(|r| format!("  → {}", r))
                    .unwrap_or_default();
                println!(
                    "{} {}  {}{}",
                    ui::state_icon(row.state),
                    colors::heading(&label),
                    detail,
                    colors::secondary(&repo)
                );
            }
            _ => {
                println!(
                    "{} {}  {}",
                    ui::state_icon(row.state),
                    colors::heading(&label),
                    colors::error(row.error.as_deref().unwrap_or("unresolved"))
                );
            }
        }
    }
}
