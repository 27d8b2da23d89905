//! Search backend seam
//!
//! The collector only talks to the hosting service through this trait. The
//! production implementation is [`GitHubClient`](crate::github::GitHubClient);
//! anything else (an in-memory fixture, a recorded session) can stand in.

use std::future::Future;

use crate::github::error::GitHubResult;
use crate::github::types::{RateBudget, RawRepository, Readme, SearchPage};

/// Operations the collector needs from a repository search service.
pub trait SearchBackend {
    /// Run a repository search and return one page of results (1-based page).
    fn search(&self, query: &str, page: u32) -> impl Future<Output = GitHubResult<SearchPage>>;

    /// Current core rate-limit budget.
    fn rate_budget(&self) -> impl Future<Output = GitHubResult<RateBudget>>;

    /// Current search rate-limit budget. Its window is much shorter than the
    /// core one.
    fn search_budget(&self) -> impl Future<Output = GitHubResult<RateBudget>>;

    /// README for a repository, `None` when the repository has none.
    fn readme(&self, repo: &RawRepository) -> impl Future<Output = GitHubResult<Option<Readme>>>;
}
