//! Read-only EOL overview across the inventory.

use chrono::NaiveDate;
use serde_json::{json, Value};
use std::fmt;

use crate::inventory::EolEntry;
use crate::issues::{days_until, is_due};
use crate::resolve::EolResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EolState {
    /// EOL date has passed
    Expired,
    /// Within the warn window
    Due,
    Ok,
    /// Date could not be resolved
    Unknown,
}

impl fmt::Display for EolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EolState::Expired => write!(f, "expired"),
            EolState::Due => write!(f, "due"),
            EolState::Ok => write!(f, "ok"),
            EolState::Unknown => write!(f, "unknown"),
        }
    }
}

pub fn classify(days: i64, warn_days: i64) -> EolState {
    if days < 0 {
        EolState::Expired
    } else if is_due(days, warn_days) {
        EolState::Due
    } else {
        EolState::Ok
    }
}

#[derive(Debug, Clone)]
pub struct StatusRow {
    pub label: String,
    pub eol: Option<NaiveDate>,
    pub days: Option<i64>,
    pub warn_days: i64,
    pub issue_repo: Option<String>,
    pub state: EolState,
    pub error: Option<String>,
}

impl StatusRow {
    pub fn to_json(&self) -> Value {
        json!({
            "entry": self.label,
            "eol_date": self.eol.map(|d| d.format("%Y-%m-%d").to_string()),
            "days_left": self.days,
            "warn_days": self.warn_days,
            "issue_repo": self.issue_repo,
            "state": self.state.to_string(),
            "error": self.error,
        })
    }
}

/// Resolve and classify every entry. Resolution errors become `Unknown` rows.
pub fn check(
    entries: &[EolEntry],
    resolver: &dyn EolResolver,
    today: NaiveDate,
    default_warn_days: i64,
) -> Vec<StatusRow> {
    entries
        .iter()
        .map(|entry| {
            let warn_days = entry.warn_days_or(default_warn_days);
            let (eol, days, state, error) = match resolver.resolve(entry) {
                Ok(eol) => {
                    let days = days_until(eol, today);
                    (Some(eol), Some(days), classify(days, warn_days), None)
                }
                Err(e) => (None, None, EolState::Unknown, Some(e.to_string())),
            };

            StatusRow {
                label: entry.label(),
                eol,
                days,
                warn_days,
                issue_repo: entry.issue_repo.clone(),
                state,
                error,
            }
        })
        .collect()
}
