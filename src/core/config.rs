//! Fetch configuration
//!
//! `FetchConfig` is what the engine consumes. The library never reads files or
//! environment variables on its own; `load()` is the layered loader used by the
//! command-line front end:
//!
//! 1. built-in defaults
//! 2. `$XDG_CONFIG_DIRS/repo-fetch/config.toml` (each dir, in order)
//! 3. `$XDG_CONFIG_HOME/repo-fetch/config.toml`
//! 4. an explicit `--config` file
//! 5. `REPO_FETCH_HTTP_TIMEOUT` (seconds, clamped to 5-300)

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default GitHub API base URL
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Default GitHub web base URL (archive downloads)
pub const GITHUB_WEB_BASE: &str = "https://github.com";

/// Default timeout for API metadata requests, in seconds
pub const DEFAULT_METADATA_TIMEOUT_SECS: u64 = 10;

/// Read size for streamed downloads
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// File whose presence marks an extracted tree as ready to install
pub const DEFAULT_INSTALLER_NAME: &str = "installerready.exe";

/// Branch used whenever the default branch cannot be resolved
pub const DEFAULT_BRANCH: &str = "main";

/// Repository name used when a URL cannot be parsed
pub const FALLBACK_REPO_NAME: &str = "downloaded_repo";

/// Environment variable overriding the metadata timeout
pub const TIMEOUT_ENV: &str = "REPO_FETCH_HTTP_TIMEOUT";

/// Settings for a [`FetchEngine`](crate::FetchEngine).
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// REST API root, without trailing slash.
    pub api_base: String,
    /// Web root that serves `/<owner>/<repo>/archive/...`, without trailing slash.
    pub web_base: String,
    pub user_agent: String,
    /// Timeout for metadata lookups. Streaming downloads have none.
    pub metadata_timeout: Duration,
    pub chunk_size: usize,
    pub installer_name: String,
    pub default_branch: String,
    pub fallback_repo_name: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API_BASE.to_string(),
            web_base: GITHUB_WEB_BASE.to_string(),
            user_agent: format!("repo-fetch/{}", env!("CARGO_PKG_VERSION")),
            metadata_timeout: Duration::from_secs(DEFAULT_METADATA_TIMEOUT_SECS),
            chunk_size: DEFAULT_CHUNK_SIZE,
            installer_name: DEFAULT_INSTALLER_NAME.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
            fallback_repo_name: FALLBACK_REPO_NAME.to_string(),
        }
    }
}

impl FetchConfig {
    /// Point API lookups at another base URL (mirrors, mock servers).
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = trim_base(base.into());
        self
    }

    /// Point archive downloads at another base URL.
    pub fn with_web_base(mut self, base: impl Into<String>) -> Self {
        self.web_base = trim_base(base.into());
        self
    }

    pub fn with_metadata_timeout(mut self, timeout: Duration) -> Self {
        self.metadata_timeout = timeout;
        self
    }
}

fn trim_base(base: String) -> String {
    base.trim_end_matches('/').to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    api_base: Option<String>,
    web_base: Option<String>,
    user_agent: Option<String>,
    timeout_secs: Option<u64>,
    chunk_size: Option<usize>,
    installer_name: Option<String>,
    default_branch: Option<String>,
    fallback_repo_name: Option<String>,
}

impl ConfigToml {
    fn merge(&mut self, other: ConfigToml) {
        if other.api_base.is_some() {
            self.api_base = other.api_base;
        }
        if other.web_base.is_some() {
            self.web_base = other.web_base;
        }
        if other.user_agent.is_some() {
            self.user_agent = other.user_agent;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.chunk_size.is_some() {
            self.chunk_size = other.chunk_size;
        }
        if other.installer_name.is_some() {
            self.installer_name = other.installer_name;
        }
        if other.default_branch.is_some() {
            self.default_branch = other.default_branch;
        }
        if other.fallback_repo_name.is_some() {
            self.fallback_repo_name = other.fallback_repo_name;
        }
    }

    fn apply(self, config: &mut FetchConfig) {
        if let Some(base) = self.api_base {
            config.api_base = trim_base(base);
        }
        if let Some(base) = self.web_base {
            config.web_base = trim_base(base);
        }
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }
        if let Some(secs) = self.timeout_secs {
            config.metadata_timeout = Duration::from_secs(secs.max(1));
        }
        if let Some(size) = self.chunk_size {
            config.chunk_size = size.max(1);
        }
        if let Some(name) = self.installer_name {
            config.installer_name = name;
        }
        if let Some(branch) = self.default_branch {
            config.default_branch = branch;
        }
        if let Some(name) = self.fallback_repo_name {
            config.fallback_repo_name = name;
        }
    }
}

fn split_xdg_config_dirs() -> Vec<PathBuf> {
    let raw = std::env::var("XDG_CONFIG_DIRS").unwrap_or_else(|_| "/etc/xdg".to_owned());
    raw.split(':')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn xdg_config_home() -> PathBuf {
    if let Ok(raw) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".").join(".config"))
}

fn read_toml(path: &Path) -> Result<ConfigToml> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str::<ConfigToml>(&text)
        .with_context(|| format!("Invalid TOML in {}", path.display()))
}

/// Candidate config files, lowest precedence first.
pub fn find_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for dir in split_xdg_config_dirs() {
        paths.push(dir.join("repo-fetch").join("config.toml"));
    }
    paths.push(xdg_config_home().join("repo-fetch").join("config.toml"));

    paths
}

/// Parse a timeout override in seconds, clamped to 5-300.
pub fn parse_timeout_override(raw: Option<&str>) -> Option<Duration> {
    let secs = raw?.trim().parse::<u64>().ok()?;
    Some(Duration::from_secs(secs.clamp(5, 300)))
}

/// Layer config files over the defaults. `extra` must exist if given.
pub fn load_from(candidates: &[PathBuf], extra: Option<&Path>) -> Result<FetchConfig> {
    let mut merged = ConfigToml::default();

    for path in candidates {
        if !path.exists() {
            continue;
        }
        merged.merge(read_toml(path)?);
    }

    if let Some(path) = extra {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
        merged.merge(read_toml(path)?);
    }

    let mut config = FetchConfig::default();
    merged.apply(&mut config);
    Ok(config)
}

/// Load the full layered configuration, including the environment override.
pub fn load(extra: Option<&Path>) -> Result<FetchConfig> {
    let mut config = load_from(&find_config_files(), extra)?;

    let raw = std::env::var(TIMEOUT_ENV).ok();
    if let Some(timeout) = parse_timeout_override(raw.as_deref()) {
        config.metadata_timeout = timeout;
    }

    Ok(config)
}
