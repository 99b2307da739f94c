//! Stage GitHub repositories on local disk
//!
//! Two ways to get a repository's contents onto disk, both reporting progress
//! to an optional synchronous callback:
//!
//! - [`fetch_latest_release`] downloads the first asset of the latest release.
//! - [`fetch_branch_archive`] downloads the default branch as a ZIP snapshot,
//!   extracts it and checks for an `installerready.exe` marker.
//!
//! Neither returns an error: failures end with a final `(1.0, "Failed ...")`
//! progress report and a sentinel result (`None` or [`BranchOutcome::Error`]).
//!
//! # Example
//!
//! ```no_run
//! use repo_fetch::{BranchOutcome, fetch_branch_archive};
//! use std::path::Path;
//!
//! let mut show = |fraction: f64, message: &str| {
//!     println!("{:>3.0}% {}", fraction * 100.0, message);
//! };
//! let url = "https://github.com/owner/tool";
//! match fetch_branch_archive(url, Path::new("/tmp"), Some(&mut show)) {
//!     BranchOutcome::Ready { path, .. } => println!("installer ready in {}", path.display()),
//!     BranchOutcome::NoInstaller { path, .. } => println!("extracted to {}", path.display()),
//!     BranchOutcome::Error { error } => eprintln!("failed: {}", error),
//! }
//! ```
//!
//! Use [`FetchEngine`] with a custom [`FetchConfig`] to change API endpoints,
//! timeouts or the installer file name.

pub mod core;
mod engine;
mod helpers;

pub use crate::core::config::FetchConfig;
pub use crate::core::output;
pub use engine::{BranchOutcome, FetchEngine, FetchError, archive_url};
pub use helpers::internal::progress::ProgressFn;
pub use helpers::internal::url_utils::RepoIdentity;

use std::path::{Path, PathBuf};

/// Repository name from a GitHub URL, without a trailing `.git`.
///
/// Returns `downloaded_repo` when the URL has no `github.com/<owner>/<repo>`.
pub fn extract_repository_name(url: &str) -> String {
    FetchEngine::default().repository_name(url)
}

/// Default branch of a GitHub repository, or `main` on any failure.
pub fn resolve_default_branch(url: &str) -> String {
    FetchEngine::default().default_branch(url)
}

/// Download the first asset of `owner/repo`'s latest release into `save_dir`.
pub fn fetch_latest_release(
    owner: &str,
    repo: &str,
    save_dir: &Path,
    on_progress: Option<ProgressFn<'_>>,
) -> Option<PathBuf> {
    FetchEngine::default().fetch_latest_release(owner, repo, save_dir, on_progress)
}

/// Download and extract the default-branch snapshot of `repo_url` into `save_dir`.
pub fn fetch_branch_archive(
    repo_url: &str,
    save_dir: &Path,
    on_progress: Option<ProgressFn<'_>>,
) -> BranchOutcome {
    FetchEngine::default().fetch_branch_archive(repo_url, save_dir, on_progress)
}
