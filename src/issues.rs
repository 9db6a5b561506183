//! Deadline evaluation and issue opening for entries nearing EOL.
//!
//! An entry is due once its EOL date is within `warn_days` of today,
//! including dates that have already passed. Due entries with an
//! `issue_repo` get one issue, deduplicated by exact title.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::github::IssueTracker;
use crate::inventory::EolEntry;
use crate::resolve::EolResolver;

/// Issue title; also used as the calendar event description.
pub fn issue_title(entry: &EolEntry, eol: NaiveDate) -> String {
    format!(
        "{} {} reaches EOL on {}",
        entry.product,
        entry.version,
        eol.format("%Y-%m-%d")
    )
}

pub fn issue_body(entry: &EolEntry, eol: NaiveDate) -> String {
    format!(
        "⚠️ **End-of-life approaching**\n\n\
         * **Product:** {} {}\n\
         * **EOL date:** {}\n\n\
         _Source: {}_\n",
        entry.product,
        entry.version,
        eol.format("%Y-%m-%d"),
        entry.source_ref()
    )
}

/// Whole days from `today` until `eol`; negative once the date has passed.
pub fn days_until(eol: NaiveDate, today: NaiveDate) -> i64 {
    (eol - today).num_days()
}

pub fn is_due(days: i64, warn_days: i64) -> bool {
    days <= warn_days
}

/// What happened to one entry during an issue pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    /// No `issue_repo`; the entry only feeds the calendar
    CalendarOnly,
    NotDue { eol: NaiveDate, days: i64 },
    AlreadyExists { repo: String, title: String },
    WouldCreate { repo: String, title: String },
    Created { repo: String, title: String },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct EntryReport {
    pub label: String,
    pub outcome: IssueOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct IssueReport {
    pub entries: Vec<EntryReport>,
}

impl IssueReport {
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, IssueOutcome::Failed(_)))
            .count()
    }

    pub fn created(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, IssueOutcome::Created { .. }))
            .count()
    }
}

/// Options for one issue pass
#[derive(Debug, Clone, Copy)]
pub struct IssueOptions {
    pub today: NaiveDate,
    /// Warn window for entries that do not set `warn_days`
    pub default_warn_days: i64,
    /// Report what would be created without calling the tracker
    pub dry_run: bool,
}

/// Evaluate every entry in order and open issues for those that are due.
///
/// A failure on one entry is recorded and does not stop the pass.
pub fn open_issues(
    entries: &[EolEntry],
    resolver: &dyn EolResolver,
    tracker: &dyn IssueTracker,
    options: IssueOptions,
) -> IssueReport {
    let mut report = IssueReport::default();

    for entry in entries {
        let outcome = process_entry(entry, resolver, tracker, options).unwrap_or_else(|e| {
            warn!(entry = %entry.label(), error = %format!("{:#}", e), "issue check failed");
            IssueOutcome::Failed(format!("{:#}", e))
        });
        report.entries.push(EntryReport {
            label: entry.label(),
            outcome,
        });
    }

    report
}

fn process_entry(
    entry: &EolEntry,
    resolver: &dyn EolResolver,
    tracker: &dyn IssueTracker,
    options: IssueOptions,
) -> anyhow::Result<IssueOutcome> {
    let Some(repo) = entry.issue_repo.as_deref() else {
        return Ok(IssueOutcome::CalendarOnly);
    };

    let eol = resolver.resolve(entry)?;
    let days = days_until(eol, options.today);
    let warn_days = entry.warn_days_or(options.default_warn_days);
    debug!(entry = %entry.label(), %eol, days, warn_days, "evaluated deadline");

    if !is_due(days, warn_days) {
        return Ok(IssueOutcome::NotDue { eol, days });
    }

    let title = issue_title(entry, eol);
    let repo = repo.to_string();

    if options.dry_run {
        return Ok(IssueOutcome::WouldCreate { repo, title });
    }

    if tracker.issue_exists(&repo, &title)? {
        info!(%repo, %title, "issue already exists");
        return Ok(IssueOutcome::AlreadyExists { repo, title });
    }

    tracker.create_issue(&repo, &title, &issue_body(entry, eol))?;
    info!(%repo, %title, "created issue");
    Ok(IssueOutcome::Created { repo, title })
}
