//! GitHub API client wrapper
//!
//! Provides the [`SearchBackend`] operations on top of Octocrab without
//! exposing Octocrab to the collector.
//!
//! # Examples
//!
//! ```rust,no_run
//! use repo_census::{GitHubClient, SearchBackend};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gh = GitHubClient::with_token("ghp_...")?;
//!
//!     let page = gh.search("clinical created:2015-01-01..2015-12-31", 1).await?;
//!     println!("{} repositories", page.total_count);
//!
//!     Ok(())
//! }
//! ```

use crate::github::backend::SearchBackend;
use crate::github::error::{GitHubError, GitHubResult};
use crate::github::types::{RateBudget, RawRepository, Readme, SearchPage};
use octocrab::Octocrab;
use std::sync::Arc;

mod repositories;
mod search;

/// Search backend talking to the GitHub REST API.
#[derive(Clone, Debug)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
}

impl GitHubClient {
    #[must_use]
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Client for github.com authenticated with a personal access token.
    pub fn with_token(token: impl Into<String>) -> GitHubResult<Self> {
        Self::builder().personal_token(token).build()
    }
}

impl SearchBackend for GitHubClient {
    async fn search(&self, query: &str, page: u32) -> GitHubResult<SearchPage> {
        search::search_repositories(&self.inner, query, page).await
    }

    async fn rate_budget(&self) -> GitHubResult<RateBudget> {
        search::core_rate_budget(&self.inner).await
    }

    async fn search_budget(&self) -> GitHubResult<RateBudget> {
        search::search_rate_budget(&self.inner).await
    }

    async fn readme(&self, repo: &RawRepository) -> GitHubResult<Option<Readme>> {
        repositories::get_readme(&self.inner, repo).await
    }
}

/// Token and API root for a [`GitHubClient`]
pub struct GitHubClientBuilder {
    token: Option<String>,
    base_uri: Option<String>,
}

impl GitHubClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: None,
            base_uri: None,
        }
    }

    pub fn personal_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// API root of a GitHub Enterprise server, e.g. `https://ghe.example.com/api/v3/`
    pub fn base_uri(mut self, uri: impl Into<String>) -> Self {
        self.base_uri = Some(uri.into());
        self
    }

    /// Fails with [`GitHubError::ClientSetup`] when the base URI does not parse.
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let mut builder = Octocrab::builder();

        if let Some(token) = self.token {
            builder = builder.personal_token(token);
        }

        if let Some(uri) = self.base_uri {
            builder = builder
                .base_uri(&uri)
                .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;
        }

        let octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientSetup(e.to_string()))?;

        Ok(GitHubClient {
            inner: Arc::new(octocrab),
        })
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
