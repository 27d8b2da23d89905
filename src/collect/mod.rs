//! Repository collection run
//!
//! Plans each search term into capped sub-ranges, fetches them sequentially
//! while pacing around the rate limit, and exports the combined results.

mod fetch;
mod planner;
mod range;
mod rate_limiter;
mod readme;
mod types;

pub use fetch::{FetchContext, extract_attributes};
pub use planner::{plan_term, search_query, split_factor};
pub use range::{DateRange, RangeError, SubRange, split_range};
pub use rate_limiter::RateLimiter;
pub use readme::{README_FILE_NAME, ReadmeFetcher};
pub use types::{
    CollectError, CollectResult, Probe, QueryPlan, RepoRecord, RunSummary, TermHarvest,
    TermReport, Truncation,
};

use chrono::{NaiveDate, Utc};
use log::{info, warn};

use crate::config::Config;
use crate::export::{Dataset, Exporter};
use crate::github::SearchBackend;

/// Name of the deduplicated table
pub const REPOS_TABLE: &str = "repos";

/// Name of the table holding repeated ids
pub const DUPLICATES_TABLE: &str = "repos_duplicates";

/// One collection run over a search backend
pub struct Collector<B> {
    backend: B,
    config: Config,
    rate_limiter: RateLimiter,
    readme: ReadmeFetcher,
    today: NaiveDate,
}

impl<B: SearchBackend> Collector<B> {
    #[must_use]
    pub fn new(backend: B, config: Config) -> Self {
        Self {
            rate_limiter: RateLimiter::from_config(&config.pacing),
            readme: ReadmeFetcher::new(config.readme_dir.clone()),
            today: Utc::now().date_naive(),
            backend,
            config,
        }
    }

    /// Pin the date used to cut the current year's range.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Collect every term and write both tables.
    pub async fn run(&self) -> CollectResult<RunSummary> {
        self.ensure_budget().await?;

        let (records, terms) = self.collect_all().await;
        let rows = records.into_iter().map(RepoRecord::into_row).collect();
        let mut dataset = Dataset::new(self.config.columns(), rows);
        let malformed_licenses = dataset.normalize_licenses();
        let (unique, duplicates) = dataset.dedupe_by_id();

        let exporter = Exporter::new(&self.config.output, self.config.output_format());
        let written = vec![
            exporter.write(&unique, REPOS_TABLE).await?,
            exporter.write(&duplicates, DUPLICATES_TABLE).await?,
        ];

        Ok(RunSummary {
            terms,
            rows: unique.len(),
            duplicates: duplicates.len(),
            malformed_licenses,
            written,
        })
    }

    /// Wait out an exhausted budget once before starting.
    async fn ensure_budget(&self) -> CollectResult<()> {
        let budget = self.backend.rate_budget().await?;
        info!("{} API calls left", budget.remaining);
        if budget.remaining == 0 {
            warn!("No API calls left before {}", budget.reset);
            self.rate_limiter.wait_for_reset(budget.reset).await;
            let budget = self.backend.rate_budget().await?;
            info!("{} API calls left after reset", budget.remaining);
        }
        Ok(())
    }

    /// Run every term; a failing term is logged and skipped.
    pub async fn collect_all(&self) -> (Vec<RepoRecord>, Vec<TermReport>) {
        let mut records = Vec::new();
        let mut reports = Vec::new();

        for term in &self.config.terms {
            info!("Searching for `{term}`");
            match self.collect_term(term).await {
                Ok((plan, harvest)) => {
                    info!("`{term}`: {} repositories", harvest.records.len());
                    reports.push(TermReport {
                        term: term.clone(),
                        planned_ranges: plan.ranges.len(),
                        records: harvest.records.len(),
                        truncated: harvest.truncated,
                        error: None,
                    });
                    records.extend(harvest.records);
                }
                Err(e) => {
                    warn!("Search for `{term}` failed: {e}; {} repositories so far", records.len());
                    reports.push(TermReport {
                        term: term.clone(),
                        planned_ranges: 0,
                        records: 0,
                        truncated: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        (records, reports)
    }

    async fn collect_term(&self, term: &str) -> CollectResult<(QueryPlan, TermHarvest)> {
        let plan = plan_term(&self.backend, term, self.config.criteria.time, self.today).await?;
        let ctx = FetchContext {
            backend: &self.backend,
            rate_limiter: &self.rate_limiter,
            readme: &self.readme,
            attrs: &self.config.attrs,
        };
        let harvest = ctx.fetch_term(&plan).await?;
        Ok((plan, harvest))
    }
}
