//! Repository name and default-branch resolution
//!
//! Both lookups are total: a URL that does not parse, a failed request, or a
//! malformed body all degrade to the configured default instead of an error.

use crate::core::config::FetchConfig;
use crate::core::output;
use crate::helpers::acquire::http;
use crate::helpers::internal::url_utils::RepoIdentity;

/// Repository name from `url`, or the configured placeholder.
pub(super) fn repository_name(config: &FetchConfig, url: &str) -> String {
    RepoIdentity::parse(url)
        .map(|id| id.name)
        .unwrap_or_else(|| config.fallback_repo_name.clone())
}

/// Default branch of the repository named by `url`, or the configured default.
///
/// A URL that does not parse returns immediately without touching the network.
pub(super) fn default_branch(agent: &ureq::Agent, config: &FetchConfig, url: &str) -> String {
    let Some(id) = RepoIdentity::parse(url) else {
        output::debug(&format!(
            "no owner/repo in {}, using branch {}",
            url, config.default_branch
        ));
        return config.default_branch.clone();
    };

    match http::repository_metadata(
        agent,
        &config.api_base,
        &id.owner,
        &id.name,
        config.metadata_timeout,
    ) {
        Ok(repo) => repo
            .default_branch
            .filter(|branch| !branch.is_empty())
            .unwrap_or_else(|| config.default_branch.clone()),
        Err(e) => {
            output::debug(&format!(
                "default branch lookup failed ({}), using {}",
                e, config.default_branch
            ));
            config.default_branch.clone()
        }
    }
}
