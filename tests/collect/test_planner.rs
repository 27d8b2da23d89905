//! Tests for query planning.

use chrono::NaiveDate;
use repo_census::{SubRange, YearWindow, plan_term, split_factor};

use super::support::MockBackend;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rendered(ranges: &[SubRange]) -> Vec<String> {
    ranges.iter().map(ToString::to_string).collect()
}

#[test]
fn test_split_factor() {
    assert_eq!(split_factor(2500), 5);
    assert_eq!(split_factor(1), 3);
    assert_eq!(split_factor(1000), 3);
    assert_eq!(split_factor(1001), 4);
    for count in [1, 7, 999, 4321, 1_000_000] {
        assert!(split_factor(count) >= 3);
    }
}

#[tokio::test]
async fn test_plan_splits_busy_year() {
    let backend = MockBackend::new()
        .with_count("ehr created:<2015-01-01", 0)
        .with_count("ehr created:2015-01-01..2015-12-31", 2500)
        .with_count("ehr created:2016-01-01..2016-12-31", 0);
    let window = YearWindow { min: 2015, max: 2016 };

    let plan = plan_term(&backend, "ehr", window, date(2020, 6, 1))
        .await
        .unwrap();

    assert_eq!(plan.term, "ehr");
    assert_eq!(plan.ranges.len(), 5);
    let ranges = rendered(&plan.ranges);
    assert!(ranges[0].starts_with("2015-01-01.."));
    assert!(ranges[4].ends_with("..2015-12-31"));
    assert_eq!(plan.probes.len(), 3);
    assert_eq!(plan.probes[1].total_count, 2500);
}

#[tokio::test]
async fn test_plan_keeps_small_before_range_first() {
    let backend = MockBackend::new()
        .with_count("ehr created:<2015-01-01", 12)
        .with_count("ehr created:2015-01-01..2015-12-31", 40);
    let window = YearWindow { min: 2015, max: 2015 };

    let plan = plan_term(&backend, "ehr", window, date(2020, 6, 1))
        .await
        .unwrap();

    assert_eq!(plan.ranges[0], SubRange::before_year(2015).unwrap());
    assert_eq!(plan.ranges.len(), 1 + 3);
}

#[tokio::test]
async fn test_plan_drops_oversized_before_range() {
    let backend = MockBackend::new()
        .with_count("ehr created:<2015-01-01", 1500)
        .with_count("ehr created:2015-01-01..2015-12-31", 10);
    let window = YearWindow { min: 2015, max: 2015 };

    let plan = plan_term(&backend, "ehr", window, date(2020, 6, 1))
        .await
        .unwrap();

    assert!(!plan.ranges.contains(&SubRange::before_year(2015).unwrap()));
    assert_eq!(plan.ranges.len(), 3);
    assert_eq!(plan.probes[0].total_count, 1500);
}

#[tokio::test]
async fn test_plan_skips_empty_years() {
    let backend = MockBackend::new();
    let window = YearWindow { min: 2010, max: 2014 };

    let plan = plan_term(&backend, "nothing", window, date(2020, 6, 1))
        .await
        .unwrap();

    assert!(plan.ranges.is_empty());
    assert_eq!(plan.probes.len(), 6);
}

#[tokio::test]
async fn test_plan_cuts_current_year_at_today() {
    let backend = MockBackend::new().with_count("ehr created:2020-01-01..2020-06-01", 5);
    let window = YearWindow { min: 2020, max: 2020 };

    let plan = plan_term(&backend, "ehr", window, date(2020, 6, 1))
        .await
        .unwrap();

    assert_eq!(plan.ranges.len(), 3);
    assert!(rendered(&plan.ranges)[2].ends_with("..2020-06-01"));
}

#[tokio::test]
async fn test_plan_keeps_single_day_year_whole() {
    let backend = MockBackend::new().with_count("ehr created:2020-01-01..2020-01-01", 5);
    let window = YearWindow { min: 2020, max: 2020 };

    let plan = plan_term(&backend, "ehr", window, date(2020, 1, 1))
        .await
        .unwrap();

    assert_eq!(rendered(&plan.ranges), vec!["2020-01-01..2020-01-01"]);
}

#[tokio::test]
async fn test_plan_clamps_to_one_slice_per_day() {
    let backend = MockBackend::new().with_count("ehr created:2019-01-01..2019-12-31", 1_000_000);
    let window = YearWindow { min: 2019, max: 2019 };

    let plan = plan_term(&backend, "ehr", window, date(2020, 6, 1))
        .await
        .unwrap();

    assert_eq!(plan.ranges.len(), 365);
    assert_eq!(rendered(&plan.ranges)[0], "2019-01-01..2019-01-01");
    assert_eq!(rendered(&plan.ranges)[364], "2019-12-31..2019-12-31");
}
