//! Prefix sums over a histogram.

use crate::aggregate::binner::Histogram;

/// Running total of events at the start of every bucket.
///
/// Same length and order as the histogram it came from; counts never
/// decrease and the last one is the total number of events.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeSeries {
    width: f64,
    points: Vec<(f64, u64)>,
}

/// `cumulative[i] = count[0] + .. + count[i]`, paired with bucket `i`'s start.
#[must_use]
pub fn accumulate(hist: &Histogram) -> CumulativeSeries {
    let points = hist
        .iter()
        .scan(0u64, |running, (start, count)| {
            *running += count;
            Some((start, *running))
        })
        .collect();
    CumulativeSeries {
        width: hist.width(),
        points,
    }
}

impl From<&Histogram> for CumulativeSeries {
    #[inline]
    fn from(hist: &Histogram) -> Self {
        accumulate(hist)
    }
}

impl CumulativeSeries {
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn points(&self) -> &[(f64, u64)] {
        &self.points
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Final running total, 0 when empty.
    #[inline]
    #[must_use]
    pub fn total(&self) -> u64 {
        self.points.last().map_or(0, |&(_, c)| c)
    }

    /// End of the last bucket, 0 when empty.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.points.last().map_or(0.0, |&(s, _)| s + self.width)
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn index_of(&self, t: f64) -> usize {
        ((t.max(0.0) / self.width).floor() as usize).min(self.points.len() - 1)
    }

    /// Lowest and highest running total over the window `[t0, t1)`.
    ///
    /// `None` when the window lies entirely outside `[0, end_time)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn span(&self, t0: f64, t1: f64) -> Option<(u64, u64)> {
        if self.is_empty() || t1 <= 0.0 || t0 >= self.end_time() || t1 <= t0 {
            return None;
        }
        let first = self.index_of(t0);
        // last bucket starting strictly before t1
        let last = ((t1 / self.width).ceil() as usize)
            .saturating_sub(1)
            .clamp(first, self.points.len() - 1);
        Some((self.points[first].1, self.points[last].1))
    }
}
