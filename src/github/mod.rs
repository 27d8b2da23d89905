//! GitHub API operations module
//!
//! Provides the search adapter used by the collector, implemented with the
//! octocrab library.

pub mod backend;
pub mod client;
pub mod error;
pub mod types;

// Re-export client types
pub use client::{GitHubClient, GitHubClientBuilder};

// Re-export the adapter seam
pub use backend::SearchBackend;

// Re-export error types
pub use error::{GitHubError, GitHubResult};

// Re-export adapter data types
pub use types::{
    RateBudget, RawRepository, Readme, SEARCH_PAGE_SIZE, SEARCH_RESULT_CAP, SearchPage,
};
