//! Fetch engine
//!
//! Owns the HTTP agent and configuration shared by the three operations:
//! name/branch resolution, latest-release download and branch snapshot
//! download. Everything runs on the calling thread with blocking I/O.

mod branch;
mod error;
mod release;
mod resolve;

pub use branch::{BranchOutcome, archive_url};
pub use error::FetchError;

use crate::core::config::FetchConfig;
use crate::helpers::internal::progress::ProgressFn;
use std::path::{Path, PathBuf};

/// Repository fetch engine
pub struct FetchEngine {
    agent: ureq::Agent,
    config: FetchConfig,
}

impl FetchEngine {
    /// Create a new fetch engine
    pub fn new(config: FetchConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&config.user_agent)
            .build();

        Self { agent, config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Repository name parsed from `url`, without a trailing `.git`.
    ///
    /// Falls back to the configured placeholder (`downloaded_repo` by default).
    pub fn repository_name(&self, url: &str) -> String {
        resolve::repository_name(&self.config, url)
    }

    /// Default branch of the repository at `url`.
    ///
    /// Falls back to the configured default (`main`) on any failure.
    pub fn default_branch(&self, url: &str) -> String {
        resolve::default_branch(&self.agent, &self.config, url)
    }

    /// Download the first asset of the latest release into `save_dir`.
    ///
    /// Returns the saved file path, or `None` on failure. The final progress
    /// report carries the failure reason.
    pub fn fetch_latest_release(
        &self,
        owner: &str,
        repo: &str,
        save_dir: &Path,
        on_progress: Option<ProgressFn<'_>>,
    ) -> Option<PathBuf> {
        release::fetch_latest_release(
            &self.agent,
            &self.config,
            owner,
            repo,
            save_dir,
            on_progress,
        )
    }

    /// Download and extract the default-branch snapshot of `repo_url` into `save_dir`.
    pub fn fetch_branch_archive(
        &self,
        repo_url: &str,
        save_dir: &Path,
        on_progress: Option<ProgressFn<'_>>,
    ) -> BranchOutcome {
        branch::fetch_branch_archive(
            &self.agent,
            &self.config,
            repo_url,
            save_dir,
            on_progress,
        )
    }
}

impl Default for FetchEngine {
    fn default() -> Self {
        Self::new(FetchConfig::default())
    }
}
