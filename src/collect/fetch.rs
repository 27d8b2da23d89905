//! Fetch loop: run the planned sub-queries and collect every result page

use log::{debug, info, warn};
use serde_json::Value;

use crate::collect::planner::search_query;
use crate::collect::rate_limiter::RateLimiter;
use crate::collect::readme::ReadmeFetcher;
use crate::collect::types::{CollectResult, QueryPlan, RepoRecord, TermHarvest, Truncation};
use crate::github::{RawRepository, SEARCH_RESULT_CAP, SearchBackend, SearchPage};

/// Everything the fetch loop borrows from the run
pub struct FetchContext<'a, B> {
    pub backend: &'a B,
    pub rate_limiter: &'a RateLimiter,
    pub readme: &'a ReadmeFetcher,
    pub attrs: &'a [String],
}

impl<B: SearchBackend> FetchContext<'_, B> {
    /// Fetch every planned range of `plan`, in order.
    ///
    /// A range whose total is over the cap stops the term: the ranges after it
    /// are not fetched and the loss is recorded in [`TermHarvest::truncated`].
    pub async fn fetch_term(&self, plan: &QueryPlan) -> CollectResult<TermHarvest> {
        let term = plan.term.as_str();
        let mut remaining = self.backend.rate_budget().await?.remaining;
        let mut harvest = TermHarvest {
            term: term.to_string(),
            records: Vec::new(),
            truncated: None,
        };

        for (idx, range) in plan.ranges.iter().enumerate() {
            debug!("range {range}, remaining rate {remaining}");
            let query = search_query(term, range);
            let first = self.backend.search(&query, 1).await?;
            let total = first.total_count;

            if total > SEARCH_RESULT_CAP {
                let skipped_ranges = plan.ranges.len() - idx - 1;
                warn!(
                    "`{term}` has {total} repositories in {range}, over the {SEARCH_RESULT_CAP} cap; \
                     skipping it and {skipped_ranges} later ranges"
                );
                harvest.truncated = Some(Truncation {
                    range: *range,
                    total_count: total,
                    skipped_ranges,
                });
                break;
            }

            if total == 0 {
                debug!("range {range} is empty");
                let budget = self.backend.search_budget().await?;
                self.rate_limiter.wait_for_reset(budget.reset).await;
                continue;
            }

            if RateLimiter::budget_too_low(remaining, total) {
                warn!("{remaining} calls left for {total} repositories; waiting for reset");
                let budget = self.backend.rate_budget().await?;
                self.rate_limiter.wait_for_reset(budget.reset).await;
                let first = self.backend.search(&query, 1).await?;
                let records = self.collect_pages(&query, first).await?;
                harvest.records.extend(records);
            } else {
                info!("processing {total} repositories in {range}");
                let records = self.collect_pages(&query, first).await?;
                harvest.records.extend(records);
                self.rate_limiter.cool_down().await;
                remaining = self.backend.rate_budget().await?.remaining;
            }
        }

        Ok(harvest)
    }

    /// Walk result pages, starting from an already fetched first page.
    async fn collect_pages(&self, query: &str, first: SearchPage) -> CollectResult<Vec<RepoRecord>> {
        let expected = first.total_count.min(SEARCH_RESULT_CAP);
        let mut records = Vec::new();
        let mut page_number = 1;
        let mut page = first;

        loop {
            if page.items.is_empty() {
                break;
            }
            for item in &page.items {
                records.push(self.to_record(item).await);
            }
            if records.len() as u64 >= expected {
                break;
            }
            page_number += 1;
            page = self.backend.search(query, page_number).await?;
        }

        Ok(records)
    }

    async fn to_record(&self, repo: &RawRepository) -> RepoRecord {
        RepoRecord {
            attributes: extract_attributes(repo, self.attrs),
            readme_url: self.readme.fetch(self.backend, repo).await,
            owner_type: repo.owner_type().map(str::to_string),
        }
    }
}

/// Configured attribute values of `repo`, `null` for absent fields.
#[must_use]
pub fn extract_attributes(repo: &RawRepository, attrs: &[String]) -> Vec<Value> {
    attrs
        .iter()
        .map(|name| repo.field(name).cloned().unwrap_or(Value::Null))
        .collect()
}
