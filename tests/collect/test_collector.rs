//! Tests for the whole collection run.

use chrono::NaiveDate;
use repo_census::{Collector, Config};
use serde_json::{Value, json};

use super::support::{MockBackend, repo};

fn config(output: &std::path::Path, terms: &[&str], format: Option<&str>) -> Config {
    let mut raw = json!({
        "token": "test-token",
        "output": output,
        "terms": terms,
        "attrs": ["id", "full_name", "license"],
        "criteria": { "time": { "min": 2015, "max": 2015 } },
        "pacing": { "cooldown_secs": 120, "grace_secs": 30 },
    });
    if let Some(format) = format {
        raw["format"] = Value::String(format.to_string());
    }
    Config::from_json_str(&raw.to_string()).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()
}

/// Backend where `term` has `items` spread over the three 2015 slices.
fn backend_with(backend: MockBackend, term: &str, items: Vec<Value>) -> MockBackend {
    backend
        .with_count(
            &format!("{term} created:2015-01-01..2015-12-31"),
            items.len() as u64,
        )
        .with_items(&format!("{term} created:2015-01-01..2015-05-02"), items)
}

#[tokio::test(start_paused = true)]
async fn test_run_writes_deduplicated_tables() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MockBackend::new();
    let backend = backend_with(
        backend,
        "ehr",
        vec![repo(1, "alpha", "User"), repo(2, "beta", "Organization")],
    );
    let backend = backend_with(backend, "emr", vec![repo(2, "beta", "Organization")]);

    let summary = Collector::new(backend, config(dir.path(), &["ehr", "emr"], None))
        .with_today(today())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.malformed_licenses, 0);
    assert_eq!(summary.terms.len(), 2);
    assert_eq!(summary.terms[0].planned_ranges, 3);
    assert_eq!(summary.terms[0].records, 2);

    assert_eq!(summary.written.len(), 2);
    let repos_path = &summary.written[0];
    let duplicates_path = &summary.written[1];
    assert_eq!(repos_path.extension().unwrap(), "csv");
    assert!(
        repos_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("repos_")
    );
    assert!(
        duplicates_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("repos_duplicates_")
    );

    let repos = std::fs::read_to_string(repos_path).unwrap();
    let lines: Vec<&str> = repos.lines().collect();
    assert_eq!(lines[0], "id,full_name,license,readme_url,owner_type");
    assert_eq!(lines[1], "1,octo/alpha,mit,,User");
    assert_eq!(lines[2], "2,octo/beta,mit,,Organization");

    let duplicates = std::fs::read_to_string(duplicates_path).unwrap();
    assert_eq!(duplicates.lines().count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_run_continues_after_failed_term() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MockBackend::new().with_failure("broken created:<2015-01-01");
    let backend = backend_with(backend, "ehr", vec![repo(1, "alpha", "User")]);

    let summary = Collector::new(backend, config(dir.path(), &["broken", "ehr"], None))
        .with_today(today())
        .run()
        .await
        .unwrap();

    assert!(summary.terms[0].error.is_some());
    assert_eq!(summary.terms[0].records, 0);
    assert!(summary.terms[1].error.is_none());
    assert_eq!(summary.rows, 1);
}

#[tokio::test(start_paused = true)]
async fn test_run_waits_when_budget_is_exhausted() {
    let dir = tempfile::tempdir().unwrap();
    let backend = MockBackend::new().with_budgets([0, 5000]);
    let backend = backend_with(backend, "ehr", vec![repo(1, "alpha", "User")]);

    let collector = Collector::new(backend, config(dir.path(), &["ehr"], None)).with_today(today());
    let summary = collector.run().await.unwrap();

    assert_eq!(summary.rows, 1);
    // initial check, re-check after the wait, then the fetch loop's own reads
    assert!(collector.backend().budget_reads() >= 3);
}

#[tokio::test(start_paused = true)]
async fn test_run_honours_output_format() {
    let dir = tempfile::tempdir().unwrap();
    let backend = backend_with(MockBackend::new(), "ehr", vec![repo(1, "alpha", "User")]);

    let summary = Collector::new(backend, config(dir.path(), &["ehr"], Some("markdown")))
        .with_today(today())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.written[0].extension().unwrap(), "mk");
    let table = std::fs::read_to_string(&summary.written[0]).unwrap();
    assert!(table.starts_with("| id | full_name | license | readme_url | owner_type |"));
}

#[tokio::test(start_paused = true)]
async fn test_run_with_no_terms_writes_empty_tables() {
    let dir = tempfile::tempdir().unwrap();

    let summary = Collector::new(MockBackend::new(), config(dir.path(), &[], Some("JSON")))
        .with_today(today())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.rows, 0);
    let repos: Value =
        serde_json::from_str(&std::fs::read_to_string(&summary.written[0]).unwrap()).unwrap();
    assert_eq!(repos, json!([]));
}
