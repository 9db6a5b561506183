//! CLI entry point for eol-check.

mod cli;
mod cmd;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use eol_check::config::env_vars;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    eol_check::ui::init_color();
    if cli.quiet {
        std::env::set_var(env_vars::QUIET, "1");
    }

    match cli.command {
        Commands::GenerateIcs { yaml, ics } => cmd::ics::cmd_generate_ics(&yaml, &ics),
        Commands::OpenIssues { yaml, dry_run } => cmd::issues::cmd_open_issues(&yaml, dry_run),
        Commands::Check { yaml, json } => cmd::check::cmd_check(&yaml, json),
        Commands::Validate { yaml } => cmd::validate::cmd_validate(&yaml),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            generate(shell, &mut command, "eol-check", &mut io::stdout());
            Ok(())
        }
        Commands::Version { full } => cmd_version(full),
    }
}

/// Route tracing output to stderr.
///
/// `EOL_CHECK_LOG` wins over `--verbose`; the default only shows warnings.
/// A malformed `EOL_CHECK_LOG` falls back to the default and is reported.
fn init_logging(verbose: bool) {
    let fallback = || EnvFilter::new(if verbose { "eol_check=debug" } else { "warn" });

    let (filter, rejected) = match std::env::var(env_vars::LOG) {
        Ok(directives) if !directives.trim().is_empty() => match EnvFilter::try_new(&directives) {
            Ok(filter) => (filter, None),
            Err(e) => (fallback(), Some((directives, e))),
        },
        _ => (fallback(), None),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Some((directives, e)) = rejected {
        tracing::warn!("Ignoring invalid {}='{}': {}", env_vars::LOG, directives, e);
    }
}

fn cmd_version(full: bool) -> Result<()> {
    println!("eol-check {}", env!("CARGO_PKG_VERSION"));

    if full {
        println!("commit: {}", env!("EOL_CHECK_GIT_SHA"));
        println!("built: {}", env!("EOL_CHECK_BUILD_DATE"));
    }

    Ok(())
}
