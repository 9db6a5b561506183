//! GitHub issue operations through the `gh` CLI.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::process::{Command, Output};
use tracing::debug;

use crate::config::{env_vars, Settings};

/// Search limit for duplicate detection; matches are then compared exactly
const SEARCH_LIMIT: &str = "20";

/// Issue tracker seam used by the issue flow.
pub trait IssueTracker {
    /// Whether an issue (open or closed) with exactly this title exists.
    fn issue_exists(&self, repo: &str, title: &str) -> Result<bool>;

    fn create_issue(&self, repo: &str, title: &str, body: &str) -> Result<()>;
}

/// Tracker that shells out to the GitHub CLI.
pub struct GhCli {
    program: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IssueTitle {
    title: String,
}

impl GhCli {
    pub fn new(program: impl Into<String>, token: Option<String>) -> Self {
        Self {
            program: program.into(),
            token,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.gh_program.clone(), settings.gh_token.clone())
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(program = %self.program, ?args, "running gh");

        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(token) = &self.token {
            cmd.env(env_vars::GH_TOKEN, token);
        }

        let output = cmd.output().with_context(|| {
            format!(
                "Failed to invoke {}. Is the GitHub CLI installed and in PATH?",
                self.program
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "{} {} failed ({}): {}",
                self.program,
                args.iter().take(2).copied().collect::<Vec<_>>().join(" "),
                output.status,
                stderr.trim()
            );
        }

        Ok(output)
    }
}

impl IssueTracker for GhCli {
    fn issue_exists(&self, repo: &str, title: &str) -> Result<bool> {
        let search = format!("in:title \"{}\"", title);
        let output = self.run(&[
            "issue", "list", "--repo", repo, "--state", "all", "--json", "title", "--search",
            &search, "-L", SEARCH_LIMIT,
        ])?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let found = parse_title_matches(&stdout, title)
            .with_context(|| format!("Failed to parse issue list from {}", repo))?;
        Ok(found)
    }

    fn create_issue(&self, repo: &str, title: &str, body: &str) -> Result<()> {
        self.run(&[
            "issue", "create", "--repo", repo, "--title", title, "--body", body,
        ])?;
        Ok(())
    }
}

/// True when the `gh issue list --json title` output contains `title` exactly.
fn parse_title_matches(json: &str, title: &str) -> Result<bool> {
    if json.trim().is_empty() {
        return Ok(false);
    }
    let issues: Vec<IssueTitle> = serde_json::from_str(json)?;
    let wanted = title.trim();
    Ok(issues.iter().any(|issue| issue.title.trim() == wanted))
}
