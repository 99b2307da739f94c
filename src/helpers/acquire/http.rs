//! GitHub API requests
//!
//! Anonymous metadata lookups against the GitHub REST API. Callers pass the
//! API base URL so tests can point requests at a mock server.

use crate::core::output;
use crate::engine::FetchError;
use serde::Deserialize;
use std::time::Duration;

/// Accept header GitHub recommends for the v3 REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Repository metadata. Only the field we read is modelled.
#[derive(Deserialize, Debug, Default)]
pub struct GithubRepository {
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// GitHub release metadata
///
/// Assets stay as raw JSON; only the one we download gets decoded.
#[derive(Deserialize, Debug)]
pub struct GithubRelease {
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub assets: Option<Vec<serde_json::Value>>,
}

impl GithubRelease {
    /// First asset in the order GitHub lists them, decoded.
    ///
    /// `None` when the release has no assets. Later entries are never
    /// inspected.
    pub fn first_asset(&self) -> Option<Result<GithubAsset, serde_json::Error>> {
        let first = self.assets.as_deref()?.first()?;
        Some(GithubAsset::deserialize(first))
    }
}

/// GitHub release asset
#[derive(Deserialize, Debug, Clone)]
pub struct GithubAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// Create a GitHub API request with the standard headers and a bounded timeout.
fn github_request(agent: &ureq::Agent, url: &str, timeout: Duration) -> ureq::Request {
    agent.get(url).timeout(timeout).set("Accept", GITHUB_ACCEPT)
}

/// GET a GitHub API endpoint and decode its JSON body.
///
/// Any status other than 2xx is an error.
fn get_json<T: serde::de::DeserializeOwned>(
    agent: &ureq::Agent,
    url: &str,
    timeout: Duration,
) -> Result<T, FetchError> {
    output::debug(&format!("GET {}", url));

    let response = github_request(agent, url, timeout)
        .call()
        .map_err(|e| FetchError::from_ureq(url, e))?;

    response
        .into_json::<T>()
        .map_err(|e| FetchError::invalid_response(url, e))
}

/// Fetch `/repos/{owner}/{repo}`.
///
/// Only a 200 response counts; any other success code is reported as a
/// status error so the resolver falls back to its default.
pub fn repository_metadata(
    agent: &ureq::Agent,
    api_base: &str,
    owner: &str,
    repo: &str,
    timeout: Duration,
) -> Result<GithubRepository, FetchError> {
    let url = format!("{}/repos/{}/{}", api_base, owner, repo);
    output::debug(&format!("GET {}", url));

    let response = github_request(agent, &url, timeout)
        .call()
        .map_err(|e| FetchError::from_ureq(&url, e))?;

    if response.status() != 200 {
        return Err(FetchError::Status {
            url,
            code: response.status(),
        });
    }

    response
        .into_json::<GithubRepository>()
        .map_err(|e| FetchError::invalid_response(&url, e))
}

/// Fetch `/repos/{owner}/{repo}/releases/latest`.
pub fn latest_release(
    agent: &ureq::Agent,
    api_base: &str,
    owner: &str,
    repo: &str,
    timeout: Duration,
) -> Result<GithubRelease, FetchError> {
    let url = format!("{}/repos/{}/{}/releases/latest", api_base, owner, repo);
    get_json(agent, &url, timeout)
}
