//! `open-issues` command

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use eol_check::config::Settings;
use eol_check::github::GhCli;
use eol_check::issues::{open_issues, IssueOptions, IssueOutcome, IssueReport};
use eol_check::resolve::ApiResolver;
use eol_check::ui::{self, colors, format};

pub fn cmd_open_issues(yaml: &Path, dry_run: bool) -> Result<()> {
    let settings = Settings::from_env()?;
    let entries = super::load_inventory(yaml)?;

    if !dry_run {
        settings.require_gh_token()?;
    }

    let resolver = ApiResolver::new(&settings);
    let tracker = GhCli::from_settings(&settings);
    let options = IssueOptions {
        today: super::today(),
        default_warn_days: settings.default_warn_days,
        dry_run,
    };

    let report = open_issues(&entries, &resolver, &tracker, options);
    print_report(&report);

    if !dry_run && !ui::is_quiet() {
        println!("Opened {} issue(s)", report.created());
    }

    if report.has_failures() {
        anyhow::bail!(
            "{} of {} entries failed",
            report.failed(),
            report.entries.len()
        );
    }

    Ok(())
}

fn print_report(report: &IssueReport) {
    let quiet = ui::is_quiet();

    for entry in &report.entries {
        match &entry.outcome {
            IssueOutcome::Created { repo, title } => {
                println!("Created issue in {}: {}", colors::identifier(repo), title);
            }
            IssueOutcome::WouldCreate { repo, title } => {
                println!(
                    "{} Would create issue in {}: {}",
                    "→".cyan(),
                    colors::identifier(repo),
                    title
                );
            }
            IssueOutcome::AlreadyExists { repo, title } if !quiet => {
                println!(
                    "Issue already exists in {}: {}",
                    colors::identifier(repo),
                    title
                );
            }
            IssueOutcome::NotDue { eol, days } if !quiet => {
                println!(
                    "{}",
                    colors::secondary(&format!(
                        "{}: EOL {} ({}), not due yet",
                        entry.label,
                        eol.format("%Y-%m-%d"),
                        format::days_left(*days)
                    ))
                );
            }
            IssueOutcome::Failed(message) => {
                eprintln!("{} {}: {}", "✗".red(), entry.label, colors::error(message));
            }
            _ => {}
        }
    }
}
