//! Rectified moving-average envelope follower.
//!
//! The same follower drives the voice gate, the sidechain attack envelope,
//! and release smoothing of the gain curve.

use crate::level::ENV_FLOOR;

/// Smallest window the follower will use.
pub const MIN_WINDOW: usize = 3;

/// Forces a window length to an odd value of at least [`MIN_WINDOW`].
pub fn odd_window(window: usize) -> usize {
    (window | 1).max(MIN_WINDOW)
}

/// Converts a duration to a whole number of samples (truncating).
pub fn ms_to_samples(ms: f64, sample_rate: u32) -> usize {
    let samples = sample_rate as f64 * ms / 1000.0;
    if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    }
}

/// Computes the envelope of `signal` over a boxcar of `window` samples.
///
/// The signal is rectified, padded on both sides by repeating its edge
/// values, and averaged over a centered window. The result has exactly the
/// same length as `signal` and every value is at least [`ENV_FLOOR`].
pub fn follow(signal: &[f64], window: usize) -> Vec<f64> {
    let len = signal.len();
    if len == 0 {
        return Vec::new();
    }

    let window = odd_window(window);
    let pad = (window - 1) / 2;
    let first = signal[0].abs();
    let last = signal[len - 1].abs();

    // prefix[i] = sum of the first i rectified samples
    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(0.0);
    let mut acc = 0.0;
    for s in signal {
        acc += s.abs();
        prefix.push(acc);
    }

    // Window i covers samples i - pad ..= i + pad; the parts hanging off
    // either edge count as copies of the edge value.
    let width = window as f64;
    let envelope: Vec<f64> = (0..len)
        .map(|i| {
            let start = i.saturating_sub(pad);
            let end = (i + pad + 1).min(len);
            let before = pad.saturating_sub(i) as f64;
            let after = (i + pad + 1).saturating_sub(len) as f64;
            let sum = before * first + (prefix[end] - prefix[start]) + after * last;
            (sum / width).max(ENV_FLOOR)
        })
        .collect();

    fit_length(envelope, len)
}

/// Forces `values` to exactly `len` entries.
///
/// Excess entries are dropped from the end; missing entries repeat the last
/// value (or [`ENV_FLOOR`] when `values` is empty).
pub fn fit_length(mut values: Vec<f64>, len: usize) -> Vec<f64> {
    if values.len() > len {
        values.truncate(len);
    } else if values.len() < len {
        let fill = values.last().copied().unwrap_or(ENV_FLOOR);
        values.resize(len, fill);
    }
    values
}
