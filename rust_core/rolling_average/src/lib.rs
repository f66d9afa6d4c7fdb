//! rolling_average
//!
//! Edge-clamped symmetric rolling mean over a time-ordered series. Each output value is the mean of
//! the input at the same position together with up to `half_window` neighbours on each side. Near
//! the ends the window shrinks to whatever exists on that side; it is never padded, reflected or
//! re-expanded on the far side.
//!
//! Every window is summed on its own, so a huge or non-finite value only affects the windows that
//! contain it. The cost is `O(n * min(n, 2k + 1))`.

use std::borrow::Cow;

use log::debug;
use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smoothing period offered by the dashboard when none is chosen.
pub const DEFAULT_HALF_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothParams {
    pub half_window: usize, // neighbours taken on each side, 0 = raw data
}

impl Default for SmoothParams {
    fn default() -> Self {
        SmoothParams {
            half_window: DEFAULT_HALF_WINDOW,
        }
    }
}

impl SmoothParams {
    pub fn new(half_window: usize) -> Self {
        SmoothParams { half_window }
    }

    pub fn raw() -> Self {
        SmoothParams { half_window: 0 }
    }

    pub fn is_raw(&self) -> bool {
        self.half_window == 0
    }

    /// Total span in days covered around a point, as shown to users.
    pub fn window_days(&self) -> usize {
        self.half_window.saturating_mul(2)
    }

    pub fn from_json(s: &str) -> Result<Self, SmoothError> {
        serde_json::from_str(s).map_err(|e| SmoothError::Config(e.to_string()))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmoothError {
    #[error("half window must be non-negative, got {0}")]
    NegativeWindow(i64),

    #[error("output buffer has length {got}, expected {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("bad smoothing parameters: {0}")]
    Config(String),
}

/// Convert an untyped window size into a half window, rejecting negatives.
pub fn half_window_from_signed(k: i64) -> Result<usize, SmoothError> {
    usize::try_from(k).map_err(|_| SmoothError::NegativeWindow(k))
}

/// Inclusive bounds `(lo, hi)` of the window used for position `i` in a series of length `n`.
/// Returns `None` when `i` is outside the series.
pub fn clamped_bounds(i: usize, n: usize, half_window: usize) -> Option<(usize, usize)> {
    if i >= n {
        return None;
    }
    let lo = i.saturating_sub(half_window);
    let hi = i.saturating_add(half_window).min(n - 1);
    Some((lo, hi))
}

/// Smooth `series` with an edge-clamped window of `half_window` values on each side.
///
/// The output always has the same length as the input. `half_window == 0` returns an exact copy.
pub fn smooth(series: &[f64], half_window: usize) -> Vec<f64> {
    let mut out = vec![0.0; series.len()];
    fill(series, half_window, &mut out);
    out
}

pub fn smooth_with(series: &[f64], params: &SmoothParams) -> Vec<f64> {
    smooth(series, params.half_window)
}

/// Same as [`smooth`] but writes into `out`, which must match the input length.
pub fn smooth_into(series: &[f64], half_window: usize, out: &mut [f64]) -> Result<(), SmoothError> {
    if out.len() != series.len() {
        return Err(SmoothError::LengthMismatch {
            expected: series.len(),
            got: out.len(),
        });
    }
    fill(series, half_window, out);
    Ok(())
}

/// Smooth every column of `frame` independently. Rows are time steps, columns are series.
pub fn smooth_columns(frame: ArrayView2<f64>, half_window: usize) -> Array2<f64> {
    let mut out = Array2::<f64>::zeros(frame.raw_dim());
    for (src, mut dst) in frame.axis_iter(Axis(1)).zip(out.axis_iter_mut(Axis(1))) {
        // columns of a row-major frame are strided, copy only then
        let col: Cow<[f64]> = match src.as_slice() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(src.to_vec()),
        };
        match dst.as_slice_mut() {
            Some(d) => fill(&col, half_window, d),
            None => {
                for (d, v) in dst.iter_mut().zip(smooth(&col, half_window)) {
                    *d = v;
                }
            }
        }
    }
    out
}

fn fill(series: &[f64], half_window: usize, out: &mut [f64]) {
    let n = series.len();
    debug!("smoothing {} values with half window {}", n, half_window);
    if half_window == 0 {
        out.copy_from_slice(series);
        return;
    }

    for (i, slot) in out.iter_mut().enumerate() {
        let lo = i.saturating_sub(half_window);
        let hi = i.saturating_add(half_window).min(n - 1);
        let window = &series[lo..=hi];
        *slot = window.iter().sum::<f64>() / window.len() as f64;
    }
}
