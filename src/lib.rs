//! `repo_census` - collect GitHub repositories matching search terms
//!
//! The search API returns at most 1000 results per query, so each term is
//! planned into date sub-ranges small enough to stay under that cap, fetched
//! one range at a time while pacing around the rate limit, and exported as a
//! table of configured repository attributes.

// Module declarations
pub mod collect;
pub mod config;
pub mod export;
pub mod github;

// Re-export GitHub client types
pub use github::{GitHubClient, GitHubClientBuilder, SearchBackend};

// Re-export GitHub error and data types
pub use github::{
    GitHubError, GitHubResult, RateBudget, RawRepository, Readme, SEARCH_RESULT_CAP, SearchPage,
};

// Re-export the collection run
pub use collect::{
    CollectError, CollectResult, Collector, DateRange, QueryPlan, RangeError, RateLimiter,
    ReadmeFetcher, RepoRecord, RunSummary, SubRange, TermReport, Truncation, plan_term,
    split_factor, split_range,
};

// Re-export configuration
pub use config::{Config, ConfigError, OutputFormat, PacingConfig, YearWindow};

// Re-export export types
pub use export::{Dataset, ExportError, Exporter};
