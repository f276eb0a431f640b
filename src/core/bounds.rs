//! Geometry helpers: axis ranges + terminal size plumbing.

use terminal_size::{Height, Width, terminal_size};

use crate::{
    aggregate::CumulativeSeries,
    core::constants::{BORDER_WIDTH, CHROME_ROWS, LABEL_GUTTER, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH},
};

/// Which axis we’re measuring.
#[derive(Clone, Copy, Debug)]
pub enum Axis {
    /// Elapsed time, shared by every series.
    Time,
    /// Cumulative event count.
    Count,
}

impl Axis {
    /// Both axes start at zero.  The upper bound is the latest bucket end
    /// (time) or the largest total (count) across `series`.
    ///
    /// Falls back to `(0.0, 1.0)` when there is nothing to measure.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds<'a, I>(self, series: I) -> (f64, f64)
    where
        I: IntoIterator<Item = &'a CumulativeSeries>,
    {
        let high = series
            .into_iter()
            .map(|c| match self {
                Self::Time => c.end_time(),
                Self::Count => c.total() as f64,
            })
            .fold(0.0_f64, f64::max);

        if high > 0.0 && high.is_finite() {
            (0.0, high)
        } else {
            (0.0, 1.0)
        }
    }
}

/// Current terminal geometry (80×30 fallback).
#[inline]
#[must_use]
pub fn terminal_geometry() -> (Width, Height) {
    terminal_size().unwrap_or((Width(80), Height(30)))
}

/// Convert an outer character grid to the plot area.  Leaves space for
/// borders, y labels, the chrome rows and one legend row per series.
#[inline]
#[must_use]
pub fn graph_dims(
    (w, h): (usize, usize),
    label_width: usize,
    legend_rows: usize,
) -> (usize, usize) {
    let x_chars = w
        .saturating_sub(BORDER_WIDTH + LABEL_GUTTER + label_width)
        .max(MIN_GRAPH_WIDTH);
    let y_chars = h
        .saturating_sub(CHROME_ROWS + legend_rows + 1)
        .max(MIN_GRAPH_HEIGHT);
    (x_chars, y_chars)
}

/// How wide will the y-axis labels be for the current count range?
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn y_label_width(y_range: (f64, f64)) -> usize {
    let (low, high) = y_range;
    let digits = |v: f64| (v.max(0.0).round() as u64).to_string().len();
    digits(low).max(digits(high))
}
