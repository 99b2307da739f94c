//! repo-fetch CLI - stage GitHub repositories on local disk
//!
//! Usage:
//!   repo-fetch release <owner> <repo> [-o DIR]   Download the latest release asset
//!   repo-fetch branch <url> [-o DIR] [--json]    Download and extract the default branch
//!   repo-fetch name <url>                        Print the repository name
//!   repo-fetch default-branch <url>              Print the default branch

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use repo_fetch::core::config;
use repo_fetch::{BranchOutcome, FetchConfig, FetchEngine, output};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "repo-fetch")]
#[command(about = "Download GitHub release assets and branch snapshots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Extra config file, merged over the XDG config files
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub REST API base URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// GitHub web base URL used for archive downloads
    #[arg(long, global = true)]
    web_base: Option<String>,

    /// Timeout for metadata requests, in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Print debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the first asset of the latest release
    Release {
        /// Repository owner
        owner: String,

        /// Repository name
        repo: String,

        /// Destination directory
        #[arg(short = 'o', long = "output", default_value = ".")]
        output_dir: PathBuf,
    },

    /// Download and extract the default-branch snapshot
    Branch {
        /// Repository URL, e.g. https://github.com/owner/repo
        url: String,

        /// Destination directory
        #[arg(short = 'o', long = "output", default_value = ".")]
        output_dir: PathBuf,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the repository name parsed from a URL
    Name {
        /// Repository URL
        url: String,
    },

    /// Print the default branch of a repository
    DefaultBranch {
        /// Repository URL
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    output::set_verbose(cli.verbose);

    let config = build_config(&cli)?;
    let engine = FetchEngine::new(config);

    match cli.command {
        Commands::Release {
            owner,
            repo,
            output_dir,
        } => {
            ensure_output_dir(&output_dir)?;
            output::action(&format!("Fetching latest release of {}/{}", owner, repo));
            output::info(&format!("Saving into {}", output_dir.display()));

            let (result, last) = with_progress(|on_progress| {
                engine.fetch_latest_release(&owner, &repo, &output_dir, Some(on_progress))
            });

            match result {
                Some(path) => {
                    output::success(&format!("Saved {}", path.display()));
                }
                None => fail(&last),
            }
        }

        Commands::Branch {
            url,
            output_dir,
            json,
        } => {
            ensure_output_dir(&output_dir)?;
            if !json {
                output::action(&format!("Fetching {}", url));
            }

            let outcome = if json {
                engine.fetch_branch_archive(&url, &output_dir, None)
            } else {
                let (outcome, _) = with_progress(|on_progress| {
                    engine.fetch_branch_archive(&url, &output_dir, Some(on_progress))
                });
                outcome
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                report_branch(&outcome);
            }

            if let BranchOutcome::Error { error } = outcome {
                fail(&format!("Failed to download {}: {}", url, error));
            }
        }

        Commands::Name { url } => {
            println!("{}", engine.repository_name(&url));
        }

        Commands::DefaultBranch { url } => {
            println!("{}", engine.default_branch(&url));
        }
    }

    Ok(())
}

/// Layered config with command-line overrides applied last.
fn build_config(cli: &Cli) -> Result<FetchConfig> {
    let mut config = config::load(cli.config.as_deref())?;

    if let Some(base) = &cli.api_base {
        config = config.with_api_base(base.clone());
    }
    if let Some(base) = &cli.web_base {
        config = config.with_web_base(base.clone());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_metadata_timeout(Duration::from_secs(secs.max(1)));
    }

    output::debug(&format!(
        "api={} web={} timeout={}s",
        config.api_base,
        config.web_base,
        config.metadata_timeout.as_secs()
    ));
    Ok(config)
}

fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Run `op` with a progress bar wired to its callback.
///
/// Returns the operation's result and the last progress message.
fn with_progress<T>(op: impl FnOnce(&mut dyn FnMut(f64, &str)) -> T) -> (T, String) {
    let pb = output::fraction_progress();
    let mut last = String::new();

    let result = op(&mut |fraction: f64, message: &str| {
        output::set_fraction(&pb, fraction, message);
        last = message.to_string();
    });

    if last.starts_with("Failed") {
        output::progress_fail(pb, &last);
    } else {
        output::progress_success(pb, &last);
    }
    (result, last)
}

/// Report a failed fetch and exit non-zero.
fn fail(message: &str) -> ! {
    output::error(message);
    std::process::exit(1);
}

fn report_branch(outcome: &BranchOutcome) {
    match outcome {
        BranchOutcome::Ready { path, repo_name } => {
            output::success(&format!("{} is ready", repo_name));
            output::detail(&format!("installer found under {}", path.display()));
        }
        BranchOutcome::NoInstaller { path, repo_name } => {
            output::success(&format!("{} extracted", repo_name));
            output::detail(&path.display().to_string());
            output::warning("no installer marker found");
        }
        BranchOutcome::Error { .. } => {}
    }
}
