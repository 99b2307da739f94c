//! Colored output and progress reporting for repo-fetch
//!
//! Uses owo-colors for terminal colors and indicatif for progress bars.
//! Debug lines are suppressed unless verbose output was switched on.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Resolution of fraction-driven progress bars.
pub const PROGRESS_SCALE: u64 = 1000;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable debug output for the whole process.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Whether debug output is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print an action header (blue, bold)
/// Example: "==> Fetching latest release of ripgrep"
pub fn action(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Print a detail line (dimmed prefix)
/// Example: "     saved to /tmp/foo.zip"
pub fn detail(message: &str) {
    println!("     {}", message.dimmed());
}

/// Print a success message (green)
pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

/// Print an info message (cyan)
pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// Print a warning message (yellow)
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Print a debug message to stderr, only in verbose mode.
pub fn debug(message: &str) {
    if is_verbose() {
        eprintln!("{} {}", "[repo-fetch:debug]".dimmed(), message.dimmed());
    }
}

/// Create a progress bar driven by fractions in `[0.0, 1.0]`.
pub fn fraction_progress() -> ProgressBar {
    let pb = ProgressBar::new(PROGRESS_SCALE);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("     {spinner:.cyan} [{bar:30.cyan/dim}] {percent:>3}% {msg}")
            .unwrap()
            .progress_chars("━╸━"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Move a fraction-driven bar to `fraction` and show `message`.
pub fn set_fraction(pb: &ProgressBar, fraction: f64, message: &str) {
    let position = (fraction.clamp(0.0, 1.0) * PROGRESS_SCALE as f64).round() as u64;
    pb.set_position(position);
    pb.set_message(message.to_string());
}

/// Finish a progress bar with a success message
pub fn progress_success(pb: ProgressBar, message: &str) {
    pb.finish_with_message(format!("{}", message.green()));
}

/// Finish a progress bar with a failure message
pub fn progress_fail(pb: ProgressBar, message: &str) {
    pb.abandon_with_message(format!("{}", message.red()));
}
