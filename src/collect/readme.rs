//! README download and persistence

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::collect::types::{CollectError, CollectResult};
use crate::github::{RawRepository, SearchBackend};

/// File name each README is saved under, inside a per-repository directory
pub const README_FILE_NAME: &str = "readme.md";

/// Looks up READMEs and optionally stores them under `<dest>/<repo>/readme.md`
#[derive(Debug, Clone, Default)]
pub struct ReadmeFetcher {
    dest: Option<PathBuf>,
}

impl ReadmeFetcher {
    #[must_use]
    pub fn new(dest: Option<PathBuf>) -> Self {
        Self { dest }
    }

    /// README URL for `repo` once its README is saved under `dest`.
    ///
    /// Without a destination nothing is looked up and the result is `None`.
    /// Lookup or write failures are logged and reported as `None` so that one
    /// repository never aborts its batch.
    pub async fn fetch<B: SearchBackend>(&self, backend: &B, repo: &RawRepository) -> Option<String> {
        let dest = self.dest.as_deref()?;
        match try_fetch(dest, backend, repo).await {
            Ok(url) => url,
            Err(e) => {
                warn!(
                    "README of {} skipped: {e}",
                    repo.name().unwrap_or("<unnamed>")
                );
                None
            }
        }
    }
}

async fn try_fetch<B: SearchBackend>(
    dest: &Path,
    backend: &B,
    repo: &RawRepository,
) -> CollectResult<Option<String>> {
    let Some(readme) = backend.readme(repo).await? else {
        return Ok(None);
    };

    match &readme.content {
        Some(content) => {
            let path = persist(dest, repo.name()?, content).await?;
            debug!("README saved to {}", path.display());
        }
        None => debug!("README of {} has no decodable content", repo.name()?),
    }

    Ok(Some(readme.url))
}

async fn persist(dest: &Path, repo_name: &str, content: &str) -> CollectResult<PathBuf> {
    let dir = dest.join(repo_name);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|source| CollectError::Io {
            path: dir.clone(),
            source,
        })?;

    let path = dir.join(README_FILE_NAME);
    tokio::fs::write(&path, content)
        .await
        .map_err(|source| CollectError::Io {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}
