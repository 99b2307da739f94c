//! Branch snapshot download
//!
//! Downloads the ZIP snapshot of a repository's default branch into memory,
//! unpacks it into the destination directory and checks the extracted tree for
//! the installer marker file.
//!
//! Progress budget: the transfer occupies `[0.0, 0.8]`, extraction is
//! announced at exactly 0.85, and completion at 1.0.

use crate::core::config::FetchConfig;
use crate::core::output;
use crate::engine::{FetchError, resolve};
use crate::helpers::acquire::Download;
use crate::helpers::build::extract_zip_bytes;
use crate::helpers::internal::fs_utils;
use crate::helpers::internal::progress::{ProgressFn, Reporter, scaled_fraction};
use crate::helpers::internal::url_utils::archive_path_tail;
use serde::Serialize;
use std::path::{Path, PathBuf};

const CONNECTING_FRACTION: f64 = 0.05;
const DOWNLOAD_CEILING: f64 = 0.8;
const EXTRACTING_FRACTION: f64 = 0.85;

/// Result of a branch snapshot download.
///
/// Serializes as `{"status": "ready" | "no_installer", "path": ..., "repo_name": ...}`
/// or `{"status": "error", "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BranchOutcome {
    /// Extracted, and the installer marker file is present.
    Ready { path: PathBuf, repo_name: String },
    /// Extracted, but no installer marker file was found.
    NoInstaller { path: PathBuf, repo_name: String },
    /// Any transport, HTTP, extraction or filesystem failure.
    Error { error: String },
}

impl BranchOutcome {
    /// Status tag: `ready`, `no_installer` or `error`.
    pub fn status(&self) -> &'static str {
        match self {
            BranchOutcome::Ready { .. } => "ready",
            BranchOutcome::NoInstaller { .. } => "no_installer",
            BranchOutcome::Error { .. } => "error",
        }
    }

    /// Extracted folder, unless the download failed.
    pub fn path(&self) -> Option<&Path> {
        match self {
            BranchOutcome::Ready { path, .. } | BranchOutcome::NoInstaller { path, .. } => {
                Some(path)
            }
            BranchOutcome::Error { .. } => None,
        }
    }

    pub fn repo_name(&self) -> Option<&str> {
        match self {
            BranchOutcome::Ready { repo_name, .. }
            | BranchOutcome::NoInstaller { repo_name, .. } => Some(repo_name),
            BranchOutcome::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            BranchOutcome::Error { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, BranchOutcome::Ready { .. })
    }
}

/// Archive URL for `branch` of the repository at `repo_url`.
///
/// The repository path is the raw text after `github.com/` in the input, not
/// the parsed owner/name pair, so a trailing slash or `.git` in the input is
/// carried into the URL as-is.
pub fn archive_url(web_base: &str, repo_url: &str, branch: &str) -> String {
    format!(
        "{}/{}/archive/refs/heads/{}.zip",
        web_base,
        archive_path_tail(repo_url),
        branch
    )
}

pub(super) fn fetch_branch_archive(
    agent: &ureq::Agent,
    config: &FetchConfig,
    repo_url: &str,
    save_dir: &Path,
    on_progress: Option<ProgressFn<'_>>,
) -> BranchOutcome {
    let mut progress = Reporter::new(on_progress);

    match download_branch(agent, config, repo_url, save_dir, &mut progress) {
        Ok(outcome) => outcome,
        Err(e) => {
            output::debug(&format!("branch download for {} failed: {}", repo_url, e));
            progress.report(1.0, &format!("Failed to download {}: {}", repo_url, e));
            BranchOutcome::Error {
                error: e.to_string(),
            }
        }
    }
}

fn download_branch(
    agent: &ureq::Agent,
    config: &FetchConfig,
    repo_url: &str,
    save_dir: &Path,
    progress: &mut Reporter<'_>,
) -> Result<BranchOutcome, FetchError> {
    let repo_name = resolve::repository_name(config, repo_url);
    let branch = resolve::default_branch(agent, config, repo_url);
    let zip_url = archive_url(&config.web_base, repo_url, &branch);

    progress.report(
        CONNECTING_FRACTION,
        &format!("Connecting to {} ({})...", repo_name, branch),
    );

    let download = Download::start(agent, &zip_url)?;
    let total = download.total;
    let message = format!("Downloading {}...", repo_name);
    let bytes = download.into_bytes(config.chunk_size, |downloaded| {
        if let Some(fraction) = scaled_fraction(downloaded, total, DOWNLOAD_CEILING) {
            progress.report(fraction, &message);
        }
    })?;

    progress.report(EXTRACTING_FRACTION, &format!("Extracting {}...", repo_name));
    extract_zip_bytes(&bytes, save_dir)?;
    drop(bytes);

    let extracted = fs_utils::find_child_dir_containing(save_dir, &repo_name)?
        .unwrap_or_else(|| save_dir.to_path_buf());

    progress.report(1.0, &format!("{} downloaded successfully.", repo_name));

    let outcome = match fs_utils::find_file_ignore_case(&extracted, &config.installer_name) {
        Some(installer) => {
            output::debug(&format!("found installer at {}", installer.display()));
            BranchOutcome::Ready {
                path: extracted,
                repo_name,
            }
        }
        None => BranchOutcome::NoInstaller {
            path: extracted,
            repo_name,
        },
    };

    Ok(outcome)
}
