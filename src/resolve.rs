//! EOL date resolution against endoflife.date.
//!
//! Manual entries short-circuit the API entirely. API entries are resolved
//! from the v1 product payload (`result.releases[].eolFrom`).

use chrono::NaiveDate;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;
use ureq::Agent;

use crate::config::Settings;
use crate::inventory::{parse_iso_date, EolEntry};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Unexpected schema from {url}; expected result.releases")]
    Schema { url: String },

    #[error("eolFrom missing for {label}")]
    MissingEolFrom { label: String },

    #[error("{label} not found @ {url}")]
    NotFound { label: String, url: String },

    #[error("Invalid EOL date '{value}' for {label}")]
    InvalidDate { label: String, value: String },
}

/// Anything that can turn an inventory entry into an EOL date.
pub trait EolResolver {
    fn resolve(&self, entry: &EolEntry) -> Result<NaiveDate, ResolveError>;
}

/// Resolver backed by the endoflife.date HTTP API.
///
/// Payloads are cached per endpoint, so several versions of one product
/// cost a single request.
pub struct ApiResolver {
    agent: Agent,
    cache: RefCell<HashMap<String, Value>>,
}

impl ApiResolver {
    pub fn new(settings: &Settings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(settings.http_timeout)
            .user_agent(&settings.user_agent)
            .build();

        Self {
            agent,
            cache: RefCell::new(HashMap::new()),
        }
    }

    fn fetch(&self, url: &str) -> Result<Value, ResolveError> {
        if let Some(payload) = self.cache.borrow().get(url) {
            debug!(url, "using cached payload");
            return Ok(payload.clone());
        }

        debug!(url, "fetching release data");
        let response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => ResolveError::Status {
                url: url.to_string(),
                status,
            },
            ureq::Error::Transport(t) => ResolveError::Http {
                url: url.to_string(),
                message: t.to_string(),
            },
        })?;

        let payload: Value = response.into_json().map_err(|e| ResolveError::Http {
            url: url.to_string(),
            message: format!("invalid JSON body: {}", e),
        })?;

        self.cache
            .borrow_mut()
            .insert(url.to_string(), payload.clone());
        Ok(payload)
    }
}

impl EolResolver for ApiResolver {
    fn resolve(&self, entry: &EolEntry) -> Result<NaiveDate, ResolveError> {
        if let Some(manual) = resolve_manual(entry) {
            return manual;
        }

        let url = entry.api_endpoint.as_deref().unwrap_or_default();
        let payload = self.fetch(url)?;
        eol_from_payload(entry, url, &payload)
    }
}

/// Resolve a manual entry without touching the network.
///
/// Returns `None` for API-backed entries.
pub fn resolve_manual(entry: &EolEntry) -> Option<Result<NaiveDate, ResolveError>> {
    entry.manual_eol_date().map(|parsed| {
        parsed.map_err(|_| ResolveError::InvalidDate {
            label: entry.label(),
            value: entry.eol_date.clone().unwrap_or_default(),
        })
    })
}

/// Extract the EOL date for `entry` from an endoflife.date v1 product payload.
pub fn eol_from_payload(
    entry: &EolEntry,
    url: &str,
    payload: &Value,
) -> Result<NaiveDate, ResolveError> {
    let releases = payload
        .get("result")
        .and_then(|r| r.get("releases"))
        .and_then(|r| r.as_array())
        .ok_or_else(|| ResolveError::Schema {
            url: url.to_string(),
        })?;

    let release = releases
        .iter()
        .find(|rel| release_name(rel).as_deref() == Some(entry.version.as_str()))
        .ok_or_else(|| ResolveError::NotFound {
            label: entry.label(),
            url: url.to_string(),
        })?;

    let eol = release
        .get("eolFrom")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ResolveError::MissingEolFrom {
            label: entry.label(),
        })?;

    parse_iso_date(eol).map_err(|_| ResolveError::InvalidDate {
        label: entry.label(),
        value: eol.to_string(),
    })
}

fn release_name(release: &Value) -> Option<String> {
    match release.get("name")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
