//! CLI argument definitions for eol-check.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eol-check")]
#[command(version)]
#[command(about = "EOL monitoring: calendars and GitHub issues from an EOL inventory", long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    GH_TOKEN                  Token used by gh (required by open-issues)\n    EOL_CHECK_GH              gh program to invoke (default: gh)\n    EOL_CHECK_HTTP_TIMEOUT    endoflife.date request timeout in seconds (default: 10)\n    EOL_CHECK_WARN_DAYS       Warn window for entries without warn_days (default: 30)\n    EOL_CHECK_LOG             Log filter, e.g. debug or eol_check=trace"
)]
pub struct Cli {
    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an iCalendar file with one all-day event per EOL date
    #[command(name = "generate-ics")]
    GenerateIcs {
        /// Path to the YAML inventory
        yaml: PathBuf,
        /// Output .ics path
        ics: PathBuf,
    },
    /// Open GitHub issues for entries whose EOL is within warn_days
    #[command(name = "open-issues")]
    OpenIssues {
        /// Path to the YAML inventory
        yaml: PathBuf,
        /// Show which issues would be opened without calling gh
        #[arg(long)]
        dry_run: bool,
    },
    /// Show resolved EOL dates and days remaining
    Check {
        /// Path to the YAML inventory
        yaml: PathBuf,
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate the inventory without network access
    Validate {
        /// Path to the YAML inventory
        yaml: PathBuf,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version information
    Version {
        /// Include commit and build date
        #[arg(long)]
        full: bool,
    },
}
