//! Plain data returned by the search adapter

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::github::error::{GitHubError, GitHubResult};

/// Maximum number of results the search API will ever return for one query.
pub const SEARCH_RESULT_CAP: u64 = 1000;

/// Maximum page size accepted by the search API.
pub const SEARCH_PAGE_SIZE: u8 = 100;

/// A repository object exactly as the search API returned it.
///
/// Attribute extraction reads top-level fields by name, so the object is kept
/// as raw JSON instead of a typed model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawRepository(Value);

impl RawRepository {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Top-level field by name, `None` when absent.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Repository name (without owner)
    pub fn name(&self) -> GitHubResult<&str> {
        self.field("name")
            .and_then(Value::as_str)
            .ok_or(GitHubError::MissingField("name"))
    }

    /// Login of the owning account
    pub fn owner_login(&self) -> GitHubResult<&str> {
        self.field("owner")
            .and_then(|o| o.get("login"))
            .and_then(Value::as_str)
            .ok_or(GitHubError::MissingField("owner.login"))
    }

    /// Owner type, e.g. `User` or `Organization`
    #[must_use]
    pub fn owner_type(&self) -> Option<&str> {
        self.field("owner")
            .and_then(|o| o.get("type"))
            .and_then(Value::as_str)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// One page of a repository search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<RawRepository>,
}

/// Remaining core API budget and when it resets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBudget {
    pub remaining: u64,
    pub reset: DateTime<Utc>,
}

/// README located for a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readme {
    /// API URL of the README file
    pub url: String,
    /// Decoded text, when the API returned content
    pub content: Option<String>,
}
