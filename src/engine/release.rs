//! Latest-release asset download
//!
//! Picks the first asset of the latest GitHub release and streams it into the
//! destination directory. Failures are reported through the final progress
//! message and an absent result, never returned as errors.

use crate::core::config::FetchConfig;
use crate::core::output;
use crate::engine::FetchError;
use crate::helpers::acquire::{Download, http};
use crate::helpers::internal::progress::{ProgressFn, Reporter, scaled_fraction};
use crate::helpers::internal::url_utils::{UrlScheme, sanitize_filename, validate_url_scheme};
use std::path::{Path, PathBuf};

const CHECKING_FRACTION: f64 = 0.05;
const DOWNLOADING_FRACTION: f64 = 0.1;

pub(super) fn fetch_latest_release(
    agent: &ureq::Agent,
    config: &FetchConfig,
    owner: &str,
    repo: &str,
    save_dir: &Path,
    on_progress: Option<ProgressFn<'_>>,
) -> Option<PathBuf> {
    let mut progress = Reporter::new(on_progress);

    match download_latest_release(agent, config, owner, repo, save_dir, &mut progress) {
        Ok(path) => {
            progress.report(1.0, &format!("{} release downloaded successfully.", repo));
            Some(path)
        }
        Err(e) => {
            output::debug(&format!("release download for {}/{} failed: {}", owner, repo, e));
            progress.report(1.0, &format!("Failed to download release: {}", e));
            None
        }
    }
}

fn download_latest_release(
    agent: &ureq::Agent,
    config: &FetchConfig,
    owner: &str,
    repo: &str,
    save_dir: &Path,
    progress: &mut Reporter<'_>,
) -> Result<PathBuf, FetchError> {
    progress.report(CHECKING_FRACTION, &format!("Checking latest {} release...", repo));

    let release = http::latest_release(
        agent,
        &config.api_base,
        owner,
        repo,
        config.metadata_timeout,
    )?;
    if let Some(tag) = &release.tag_name {
        output::debug(&format!("latest release of {}/{} is {}", owner, repo, tag));
    }
    let asset = release
        .first_asset()
        .ok_or(FetchError::NoReleaseAssets)?
        .map_err(|e| {
            FetchError::invalid_response(&format!("latest release of {}/{}", owner, repo), e)
        })?;
    validate_url_scheme(&asset.browser_download_url, &[UrlScheme::Http, UrlScheme::Https])?;

    let dest = save_dir.join(sanitize_filename(&asset.name));
    let message = format!("Downloading {}...", asset.name);
    progress.report(DOWNLOADING_FRACTION, &message);

    let download = Download::start(agent, &asset.browser_download_url)?;
    let total = download.total;
    let written = download.save_to(&dest, config.chunk_size, |downloaded| {
        if let Some(fraction) = scaled_fraction(downloaded, total, 1.0) {
            progress.report(fraction, &message);
        }
    })?;

    output::debug(&format!("saved {} ({} bytes)", dest.display(), written));
    Ok(dest)
}
