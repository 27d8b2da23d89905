//! Repository content API methods

use log::debug;
use octocrab::Octocrab;

use crate::github::error::GitHubResult;
use crate::github::types::{RawRepository, Readme};

/// Probe the README endpoint, then fetch the README when it exists.
///
/// The probe is a plain GET whose status decides existence; only a 200 leads
/// to the content request. A 404 means the repository has no README.
pub(crate) async fn get_readme(oc: &Octocrab, repo: &RawRepository) -> GitHubResult<Option<Readme>> {
    let owner = repo.owner_login()?;
    let name = repo.name()?;

    let route = format!(
        "/repos/{}/{}/readme",
        urlencoding::encode(owner),
        urlencoding::encode(name)
    );
    let probe = oc._get(route).await?;
    let status = probe.status().as_u16();
    match status {
        200 => {}
        404 => {
            debug!("{owner}/{name} has no README");
            return Ok(None);
        }
        other => {
            return Err(format!("unexpected status {other} probing README of {owner}/{name}").into());
        }
    }

    let content = oc.repos(owner, name).get_readme().send().await?;
    Ok(Some(Readme {
        content: content.decoded_content(),
        url: content.url,
    }))
}
