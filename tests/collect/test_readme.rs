//! Tests for README lookup and persistence.

use repo_census::{RawRepository, ReadmeFetcher};

use super::support::{MockBackend, repo};

const ALPHA_README: &str = "https://api.github.com/repos/octo/alpha/readme";

fn backend() -> MockBackend {
    MockBackend::new().with_readme("alpha", ALPHA_README, Some("# Alpha\n"))
}

#[tokio::test]
async fn test_no_readme_dir_records_nothing() {
    let alpha = RawRepository::new(repo(1, "alpha", "User"));

    assert_eq!(ReadmeFetcher::default().fetch(&backend(), &alpha).await, None);
}

#[tokio::test]
async fn test_readme_dir_saves_and_records_url() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ReadmeFetcher::new(Some(dir.path().to_path_buf()));
    let alpha = RawRepository::new(repo(1, "alpha", "User"));

    let url = fetcher.fetch(&backend(), &alpha).await;

    assert_eq!(url.as_deref(), Some(ALPHA_README));
    let saved = std::fs::read_to_string(dir.path().join("alpha/readme.md")).unwrap();
    assert_eq!(saved, "# Alpha\n");
}

#[tokio::test]
async fn test_missing_readme_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ReadmeFetcher::new(Some(dir.path().to_path_buf()));
    let beta = RawRepository::new(repo(2, "beta", "User"));

    assert_eq!(fetcher.fetch(&backend(), &beta).await, None);
}

#[tokio::test]
async fn test_unnamed_repository_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ReadmeFetcher::new(Some(dir.path().to_path_buf()));
    let unnamed = RawRepository::new(serde_json::json!({ "id": 9 }));

    assert_eq!(fetcher.fetch(&backend(), &unnamed).await, None);
}
