//! # eol-check - End-of-life monitoring for shared tooling
//!
//! eol-check reads an inventory of products and versions, resolves their
//! end-of-life dates from [endoflife.date](https://endoflife.date) (or from
//! manual overrides), and turns them into an iCalendar feed and GitHub issues.
//!
//! ## Modules
//!
//! - [`inventory`] - YAML inventory parsing and validation
//! - [`resolve`] - EOL date resolution against the endoflife.date v1 API
//! - [`calendar`] - RFC 5545 calendar generation
//! - [`issues`] - Deadline evaluation and issue opening
//! - [`github`] - `gh` CLI issue tracker
//! - [`status`] - Read-only overview of the inventory
//! - [`config`] - Runtime settings from the environment
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use eol_check::calendar::generate_calendar;
//! use eol_check::config::Settings;
//! use eol_check::resolve::ApiResolver;
//!
//! let settings = Settings::from_env().expect("invalid settings");
//! let entries = eol_check::inventory::load(Path::new("eol.yaml")).expect("bad inventory");
//! let resolver = ApiResolver::new(&settings);
//!
//! let calendar = generate_calendar(&entries, &resolver, chrono::Utc::now())
//!     .expect("failed to resolve EOL dates");
//! std::fs::write("eol.ics", calendar.to_ics()).expect("failed to write calendar");
//! ```

pub mod calendar;
pub mod config;
pub mod github;
pub mod inventory;
pub mod issues;
pub mod resolve;
pub mod status;
pub mod ui;
