//! Progress reporting plumbing
//!
//! Operations report `(fraction, message)` pairs to an optional observer.
//! The observer runs synchronously on the calling thread, so it must return
//! quickly or it stalls the transfer loop.

/// Progress observer: receives a fraction in `[0.0, 1.0]` and a status message.
pub type ProgressFn<'a> = &'a mut dyn FnMut(f64, &str);

/// Clamp a fraction into `[0.0, 1.0]`. NaN maps to 0.0.
pub fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Fraction of `total` covered by `downloaded`, scaled to `ceiling`.
///
/// Returns `None` when the total is unknown (zero), in which case callers
/// skip the intermediate report.
pub fn scaled_fraction(downloaded: u64, total: u64, ceiling: f64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let fraction = downloaded as f64 / total as f64 * ceiling;
    Some(fraction.min(ceiling))
}

/// Wraps an optional observer so call sites never branch on its presence.
pub struct Reporter<'a> {
    sink: Option<ProgressFn<'a>>,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: Option<ProgressFn<'a>>) -> Self {
        Self { sink }
    }

    /// Report progress. The fraction is clamped before reaching the observer.
    pub fn report(&mut self, fraction: f64, message: &str) {
        if let Some(sink) = self.sink.as_mut() {
            sink(clamp_fraction(fraction), message);
        }
    }
}
