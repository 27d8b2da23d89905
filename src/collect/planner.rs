//! Query planning: slice each year so every sub-query stays under the cap

use chrono::NaiveDate;
use log::{debug, warn};

use crate::collect::range::{DateRange, SubRange, split_range};
use crate::collect::types::{CollectResult, Probe, QueryPlan};
use crate::config::YearWindow;
use crate::github::{SEARCH_RESULT_CAP, SearchBackend};

/// Number of slices for a range whose probe returned `count` results.
///
/// One slice per thousand results, plus two to absorb count drift between the
/// probe and the fetch.
#[inline]
#[must_use]
pub fn split_factor(count: u64) -> usize {
    usize::try_from(count.div_ceil(SEARCH_RESULT_CAP))
        .unwrap_or(usize::MAX)
        .saturating_add(2)
}

/// Full search query for a term restricted to a range.
#[must_use]
pub fn search_query(term: &str, range: &SubRange) -> String {
    format!("{term} {}", range.qualifier())
}

async fn probe<B: SearchBackend>(backend: &B, term: &str, range: SubRange) -> CollectResult<Probe> {
    let page = backend.search(&search_query(term, &range), 1).await?;
    debug!("probe {range}: {} repositories", page.total_count);
    Ok(Probe {
        range,
        total_count: page.total_count,
    })
}

/// Build the ordered sub-ranges to fetch for `term`.
///
/// Everything created before the window is probed first; a count over the cap
/// there means `window.min` is too late and is reported as a warning. Each year
/// in the window is then probed and split by [`split_factor`].
pub async fn plan_term<B: SearchBackend>(
    backend: &B,
    term: &str,
    window: YearWindow,
    today: NaiveDate,
) -> CollectResult<QueryPlan> {
    let mut ranges = Vec::new();
    let mut probes = Vec::new();

    let before = probe(backend, term, SubRange::before_year(window.min)?).await?;
    if before.total_count > SEARCH_RESULT_CAP {
        warn!(
            "`{term}` has {} repositories created {}; criteria.time.min ({}) should be earlier",
            before.total_count, before.range, window.min
        );
    } else if before.total_count > 0 {
        ranges.push(before.range);
    }
    probes.push(before);

    for year in window.years() {
        let year_range = DateRange::year(year, today)?;
        let year_probe = probe(backend, term, year_range.into()).await?;
        let count = year_probe.total_count;
        probes.push(year_probe);
        if count == 0 {
            continue;
        }
        ranges.extend(slice_year(year_range, count)?.into_iter().map(SubRange::from));
    }

    debug!("`{term}` planned into {} ranges", ranges.len());
    Ok(QueryPlan {
        term: term.to_string(),
        ranges,
        probes,
    })
}

fn slice_year(range: DateRange, count: u64) -> CollectResult<Vec<DateRange>> {
    if range.days() == 0 {
        return Ok(vec![range]);
    }
    let mut slices = split_factor(count);
    if slices > range.max_slices() {
        warn!(
            "{range} has {count} repositories, more than one day per slice can keep under {SEARCH_RESULT_CAP}"
        );
        slices = range.max_slices();
    }
    Ok(split_range(range, slices)?)
}
