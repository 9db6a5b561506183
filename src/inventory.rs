//! EOL inventory: the YAML list of products and versions to monitor.
//!
//! ```yaml
//! - product: python
//!   version: "3.9"
//!   api_endpoint: https://endoflife.date/api/v1/products/python/
//!   issue_repo: acme/tooling
//!   warn_days: 60
//! - product: internal-sdk
//!   version: 2
//!   source: manual
//!   eol_date: 2026-03-31
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Where an entry's EOL date comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EolSource {
    #[default]
    Api,
    Manual,
}

impl fmt::Display for EolSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EolSource::Api => write!(f, "api"),
            EolSource::Manual => write!(f, "manual"),
        }
    }
}

/// A single monitored product release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EolEntry {
    pub product: String,
    /// Release cycle name. YAML numbers are accepted and rendered as text.
    #[serde(deserialize_with = "deserialize_version")]
    pub version: String,
    #[serde(default)]
    pub source: EolSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eol_date: Option<String>,
    /// Repository (`owner/name`) that receives issues; calendar-only when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warn_days: Option<i64>,
}

impl EolEntry {
    /// `"{product} {version}"`
    pub fn label(&self) -> String {
        format!("{} {}", self.product, self.version)
    }

    /// Human-readable origin of the EOL date, used in issue bodies.
    pub fn source_ref(&self) -> &str {
        match (self.source, self.api_endpoint.as_deref()) {
            (EolSource::Api, Some(endpoint)) => endpoint,
            _ => "manual entry",
        }
    }

    pub fn warn_days_or(&self, default: i64) -> i64 {
        self.warn_days.unwrap_or(default)
    }

    /// The manually supplied EOL date, if this is a manual entry.
    pub fn manual_eol_date(&self) -> Option<Result<NaiveDate, chrono::ParseError>> {
        match self.source {
            EolSource::Manual => self.eol_date.as_deref().map(parse_iso_date),
            EolSource::Api => None,
        }
    }
}

pub fn parse_iso_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
}

fn deserialize_version<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "version must be a string or number, got {:?}",
            other
        ))),
    }
}

/// Load and validate an inventory file.
pub fn load(path: &Path) -> Result<Vec<EolEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read inventory from {}", path.display()))?;

    parse(&content).with_context(|| format!("Invalid inventory {}", path.display()))
}

/// Parse and validate inventory YAML.
pub fn parse(content: &str) -> Result<Vec<EolEntry>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Option<Vec<EolEntry>> =
        serde_yaml::from_str(content).context("Failed to parse inventory YAML")?;
    let entries = entries.unwrap_or_default();

    validate(&entries)?;
    Ok(entries)
}

/// Check every entry and report all problems at once.
pub fn validate(entries: &[EolEntry]) -> Result<()> {
    let problems: Vec<String> = entries
        .iter()
        .enumerate()
        .flat_map(|(idx, entry)| {
            entry_problems(entry)
                .into_iter()
                .map(move |p| format!("entry {} ({}): {}", idx + 1, entry.label().trim(), p))
        })
        .collect();

    if problems.is_empty() {
        return Ok(());
    }

    anyhow::bail!(
        "{} problem(s) found:\n  - {}",
        problems.len(),
        problems.join("\n  - ")
    )
}

fn entry_problems(entry: &EolEntry) -> Vec<String> {
    let mut problems = Vec::new();

    if entry.product.trim().is_empty() {
        problems.push("product must not be empty".to_string());
    }
    if entry.version.trim().is_empty() {
        problems.push("version must not be empty".to_string());
    }

    match entry.source {
        EolSource::Manual => match entry.eol_date.as_deref() {
            None => problems.push("eol_date is required when source is manual".to_string()),
            Some(raw) => {
                if parse_iso_date(raw).is_err() {
                    problems.push(format!("eol_date '{}' is not a YYYY-MM-DD date", raw));
                }
            }
        },
        EolSource::Api => match entry.api_endpoint.as_deref() {
            None => problems.push("api_endpoint is required when source is api".to_string()),
            Some(raw) => {
                if let Err(reason) = check_endpoint(raw) {
                    problems.push(format!("api_endpoint '{}' {}", raw, reason));
                }
            }
        },
    }

    if let Some(repo) = entry.issue_repo.as_deref() {
        if !repo_pattern().is_match(repo) {
            problems.push(format!("issue_repo '{}' must look like owner/name", repo));
        }
    }

    if let Some(days) = entry.warn_days {
        if days < 0 {
            problems.push(format!("warn_days must not be negative, got {}", days));
        }
    }

    problems
}

fn check_endpoint(raw: &str) -> Result<(), &'static str> {
    let url = url::Url::parse(raw).map_err(|_| "is not a valid URL")?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(()),
        "http" | "https" => Err("has no host"),
        _ => Err("must use http or https"),
    }
}

fn repo_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").expect("repo pattern is valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
- product: python
  version: "3.9"
  api_endpoint: https://endoflife.date/api/v1/products/python/
  issue_repo: acme/tooling
  warn_days: 60
- product: nodejs
  version: 18
  api_endpoint: https://endoflife.date/api/v1/products/nodejs/
- product: internal-sdk
  version: 2.4
  source: manual
  eol_date: 2026-03-31
  issue_repo: acme/sdk-users
"#;

    #[test]
    fn test_parse_sample_inventory() {
        let entries = parse(SAMPLE).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].label(), "python 3.9");
        assert_eq!(entries[0].source, EolSource::Api);
        assert_eq!(entries[0].warn_days_or(30), 60);
        assert_eq!(
            entries[0].source_ref(),
            "https://endoflife.date/api/v1/products/python/"
        );

        assert_eq!(entries[1].version, "18");
        assert_eq!(entries[1].issue_repo, None);
        assert_eq!(entries[1].warn_days_or(30), 30);

        assert_eq!(entries[2].version, "2.4");
        assert_eq!(entries[2].source, EolSource::Manual);
        assert_eq!(entries[2].source_ref(), "manual entry");
        assert_eq!(
            entries[2].manual_eol_date().unwrap().unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
        );
    }

    #[test]
    fn test_empty_inventory() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \n").unwrap().is_empty());
        assert!(parse("[]").unwrap().is_empty());
        assert!(parse("# nothing tracked yet\n").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_source_is_parse_error() {
        let err = parse("- product: x\n  version: '1'\n  source: scraped\n").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse inventory YAML"));
    }

    #[test]
    fn test_version_must_be_scalar() {
        let err = parse("- product: x\n  version: [1, 2]\n  source: manual\n  eol_date: 2030-01-01\n")
            .unwrap_err();
        assert!(format!("{:#}", err).contains("version must be a string or number"));
    }

    #[test]
    fn test_validation_collects_all_problems() {
        let content = r#"
- product: python
  version: "3.8"
- product: ruby
  version: "2.7"
  source: manual
  eol_date: 31/03/2023
- product: go
  version: "1.20"
  api_endpoint: ftp://example.com/go
  issue_repo: not a repo
  warn_days: -1
"#;
        let err = parse(content).unwrap_err().to_string();

        assert!(err.starts_with("5 problem(s) found"));
        assert!(err.contains("entry 1 (python 3.8): api_endpoint is required when source is api"));
        assert!(err.contains("entry 2 (ruby 2.7): eol_date '31/03/2023' is not a YYYY-MM-DD date"));
        assert!(err.contains("entry 3 (go 1.20): api_endpoint 'ftp://example.com/go' must use http or https"));
        assert!(err.contains("issue_repo 'not a repo' must look like owner/name"));
        assert!(err.contains("warn_days must not be negative, got -1"));
    }

    #[test]
    fn test_manual_entry_requires_date() {
        let err = parse("- product: sdk\n  version: '1'\n  source: manual\n").unwrap_err();
        assert!(err
            .to_string()
            .contains("eol_date is required when source is manual"));
    }

    #[test]
    fn test_empty_product_rejected() {
        let err = parse("- product: ''\n  version: '1'\n  source: manual\n  eol_date: 2030-01-01\n")
            .unwrap_err();
        assert!(err.to_string().contains("product must not be empty"));
    }

    #[test]
    fn test_manual_date_ignored_for_api_entries() {
        let entries = parse(
            "- product: python\n  version: '3.12'\n  api_endpoint: https://endoflife.date/api/v1/products/python/\n  eol_date: 2020-01-01\n",
        )
        .unwrap();
        assert!(entries[0].manual_eol_date().is_none());
    }

    #[test]
    fn test_load_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("eol.yaml");
        fs::write(&path, "- product: python\n  version: '3.8'\n").unwrap();

        let err = load(&path).unwrap_err();
        let rendered = format!("{:#}", err);
        assert!(rendered.contains("Invalid inventory"));
        assert!(rendered.contains("eol.yaml"));
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load(&tmp.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read inventory"));
    }
}
