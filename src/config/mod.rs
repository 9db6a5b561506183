//! Runtime settings for eol-check.
//!
//! Settings start from built-in defaults and are overridden by environment
//! variables. The inventory file itself is handled by [`crate::inventory`].

use anyhow::{Context, Result};
use std::time::Duration;

pub mod defaults;

pub use defaults::env_vars;
use defaults::*;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Timeout applied to each endoflife.date request
    pub http_timeout: Duration,
    /// Program invoked for GitHub issue operations
    pub gh_program: String,
    /// Warn window used when an entry does not set `warn_days`
    pub default_warn_days: i64,
    /// User-Agent sent with API requests
    pub user_agent: String,
    /// Token for `gh`, read from `GH_TOKEN`
    pub gh_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(default_http_timeout_secs()),
            gh_program: default_gh_program(),
            default_warn_days: default_warn_days(),
            user_agent: default_user_agent(),
            gh_token: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(raw) = get(env_vars::HTTP_TIMEOUT) {
            let secs: u64 = raw.trim().parse().with_context(|| {
                format!(
                    "{} must be a whole number of seconds, got '{}'",
                    env_vars::HTTP_TIMEOUT,
                    raw
                )
            })?;
            if secs == 0 {
                anyhow::bail!("{} must be greater than 0", env_vars::HTTP_TIMEOUT);
            }
            settings.http_timeout = Duration::from_secs(secs);
        }

        if let Some(program) = get(env_vars::GH_PROGRAM) {
            settings.gh_program = program;
        }

        if let Some(raw) = get(env_vars::WARN_DAYS) {
            let days: i64 = raw.trim().parse().with_context(|| {
                format!(
                    "{} must be an integer number of days, got '{}'",
                    env_vars::WARN_DAYS,
                    raw
                )
            })?;
            if days < 0 {
                anyhow::bail!("{} must not be negative, got {}", env_vars::WARN_DAYS, days);
            }
            settings.default_warn_days = days;
        }

        settings.gh_token = get(env_vars::GH_TOKEN);

        Ok(settings)
    }

    /// Fail unless a GitHub token is available.
    pub fn require_gh_token(&self) -> Result<&str> {
        self.gh_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("{} env var not set", env_vars::GH_TOKEN))
    }
}
