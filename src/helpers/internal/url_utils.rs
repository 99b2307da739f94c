//! URL parsing and validation utilities
//!
//! Provides helpers for pulling an owner/repo identity out of GitHub URLs,
//! building archive paths, and validating download URLs.

use crate::engine::FetchError;
use regex::Regex;
use std::sync::OnceLock;

/// Host segment every repository URL is matched against.
const GITHUB_HOST: &str = "github.com/";

/// Allowed URL schemes for downloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlScheme {
    Http,
    Https,
}

impl UrlScheme {
    /// Get the scheme prefix string
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Http => "http://",
            Self::Https => "https://",
        }
    }
}

/// Validate that a URL uses one of the allowed schemes.
pub fn validate_url_scheme(url: &str, allowed: &[UrlScheme]) -> Result<(), FetchError> {
    let url_lower = url.to_lowercase();

    if allowed.iter().any(|scheme| url_lower.starts_with(scheme.prefix())) {
        return Ok(());
    }

    Err(FetchError::UnsupportedUrl(url.to_string()))
}

fn repo_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"github\.com/([^/]+)/([^/]+)").expect("repository pattern is valid")
    })
}

/// Owner and repository name parsed out of a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub owner: String,
    pub name: String,
}

impl RepoIdentity {
    /// Parse `github.com/<owner>/<repo>` anywhere in `url`.
    ///
    /// The name never carries a trailing `.git`. Returns `None` when the URL
    /// does not contain the pattern.
    ///
    /// # Example
    /// ```
    /// use repo_fetch::RepoIdentity;
    ///
    /// let id = RepoIdentity::parse("https://github.com/foo/bar.git").unwrap();
    /// assert_eq!(id.owner, "foo");
    /// assert_eq!(id.name, "bar");
    /// ```
    pub fn parse(url: &str) -> Option<Self> {
        let caps = repo_pattern().captures(url)?;
        let owner = caps.get(1)?.as_str().to_string();
        let raw_name = caps.get(2)?.as_str();
        let name = raw_name.strip_suffix(".git").unwrap_or(raw_name).to_string();
        Some(Self { owner, name })
    }
}

/// Path portion used to build branch-archive URLs.
///
/// This is the raw input text after the last `github.com/`, or the whole input
/// when the host does not appear. It is taken verbatim: casing, trailing
/// slashes and `.git` suffixes are not normalized.
pub fn archive_path_tail(repo_url: &str) -> &str {
    match repo_url.rfind(GITHUB_HOST) {
        Some(idx) => &repo_url[idx + GITHUB_HOST.len()..],
        None => repo_url,
    }
}

/// Sanitize a filename for safe filesystem use.
///
/// Replaces problematic characters and handles special names.
pub fn sanitize_filename(name: &str) -> String {
    // Handle empty or special names
    if name.is_empty() || name == "." || name == ".." {
        return "download".to_string();
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // Trim leading/trailing whitespace and dots
    let trimmed = sanitized.trim().trim_matches('.');

    if trimmed.is_empty() {
        "download".to_string()
    } else {
        trimmed.to_string()
    }
}
