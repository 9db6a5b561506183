//! Command handlers for the eol-check CLI

use anyhow::Result;
use chrono::NaiveDate;
use std::path::Path;
use tracing::info;

use eol_check::inventory::{self, EolEntry};

pub mod check;
pub mod ics;
pub mod issues;
pub mod validate;

/// Load the inventory and log how many entries it holds.
pub fn load_inventory(path: &Path) -> Result<Vec<EolEntry>> {
    let entries = inventory::load(path)?;
    info!(path = %path.display(), count = entries.len(), "loaded inventory");
    Ok(entries)
}

/// Today's date in local time; deadlines are counted in local days.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
