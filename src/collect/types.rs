//! Type definitions for the collection run

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::collect::range::{RangeError, SubRange};
use crate::config::ConfigError;
use crate::export::ExportError;
use crate::github::GitHubError;

/// Error handling for a collection run
#[derive(Error, Debug)]
pub enum CollectError {
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type CollectResult<T> = Result<T, CollectError>;

/// One exported row before it is flattened
#[derive(Debug, Clone, PartialEq)]
pub struct RepoRecord {
    /// Configured attribute values, in `attrs` order
    pub attributes: Vec<Value>,
    pub readme_url: Option<String>,
    pub owner_type: Option<String>,
}

impl RepoRecord {
    /// Row cells: attributes, then `readme_url`, then `owner_type`.
    #[must_use]
    pub fn into_row(self) -> Vec<Value> {
        let mut row = self.attributes;
        row.push(self.readme_url.map_or(Value::Null, Value::String));
        row.push(self.owner_type.map_or(Value::Null, Value::String));
        row
    }
}

/// Result of probing one range while planning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub range: SubRange,
    pub total_count: u64,
}

/// Ordered sub-ranges to fetch for one term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub term: String,
    pub ranges: Vec<SubRange>,
    pub probes: Vec<Probe>,
}

/// Where a term's fetch stopped early because a range was over the cap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    pub range: SubRange,
    pub total_count: u64,
    /// Planned ranges after `range` that were never fetched
    pub skipped_ranges: usize,
}

/// Records gathered for one term
#[derive(Debug, Clone, PartialEq)]
pub struct TermHarvest {
    pub term: String,
    pub records: Vec<RepoRecord>,
    pub truncated: Option<Truncation>,
}

/// Per-term outcome reported after the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermReport {
    pub term: String,
    pub planned_ranges: usize,
    pub records: usize,
    pub truncated: Option<Truncation>,
    /// Set when the term failed and was skipped
    pub error: Option<String>,
}

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub terms: Vec<TermReport>,
    pub rows: usize,
    pub duplicates: usize,
    pub malformed_licenses: usize,
    pub written: Vec<PathBuf>,
}
