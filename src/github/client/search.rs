//! Search and rate-limit API methods

use chrono::DateTime;
use octocrab::Octocrab;
use serde::Serialize;

use crate::github::error::{GitHubError, GitHubResult};
use crate::github::types::{RateBudget, SEARCH_PAGE_SIZE, SearchPage};

#[derive(Serialize)]
struct SearchParams<'a> {
    q: &'a str,
    per_page: u8,
    page: u32,
}

/// Search repositories and return the raw page.
///
/// Uses the untyped route so that every field of the repository object stays
/// reachable for attribute extraction.
pub(crate) async fn search_repositories(
    oc: &Octocrab,
    query: &str,
    page: u32,
) -> GitHubResult<SearchPage> {
    if query.trim().is_empty() {
        return Err(GitHubError::InvalidInput(
            "search query cannot be empty".into(),
        ));
    }
    if page < 1 {
        return Err(GitHubError::InvalidInput("page must be >= 1".into()));
    }

    let params = SearchParams {
        q: query,
        per_page: SEARCH_PAGE_SIZE,
        page,
    };

    let page: SearchPage = oc.get("/search/repositories", Some(&params)).await?;
    Ok(page)
}

/// Read the core rate-limit window.
pub(crate) async fn core_rate_budget(oc: &Octocrab) -> GitHubResult<RateBudget> {
    let core = oc.ratelimit().get().await?.resources.core;
    to_budget(core.remaining as u64, core.reset as i64)
}

/// Read the search rate-limit window.
pub(crate) async fn search_rate_budget(oc: &Octocrab) -> GitHubResult<RateBudget> {
    let search = oc.ratelimit().get().await?.resources.search;
    to_budget(search.remaining as u64, search.reset as i64)
}

fn to_budget(remaining: u64, reset: i64) -> GitHubResult<RateBudget> {
    let reset = DateTime::from_timestamp(reset, 0)
        .ok_or_else(|| GitHubError::Api(format!("invalid rate reset timestamp {reset}")))?;
    Ok(RateBudget { remaining, reset })
}
