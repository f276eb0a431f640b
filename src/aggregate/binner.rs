//! Fixed-width time binning.
//!
//! Turns an unordered bag of event timestamps into a gapless histogram:
//! * bucket `i` covers `[i * w, (i + 1) * w)`, the first one starts at 0
//! * an event at exactly `k * w` lands in bucket `k`
//! * every bucket up to the one holding the latest event is present, empty
//!   ones with a count of 0
//!
//! Memory is `O(max_t / w)`, independent of how many events there are.

use crate::{
    aggregate::width::check_positive,
    core::{constants::DEFAULT_MAX_BUCKETS, error::BinError},
};

/// Half-open interval `[start, start + width)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bucket {
    pub start: f64,
    pub width: f64,
}

impl Bucket {
    #[inline]
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.width
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end()
    }
}

/// Per-bucket event counts, ordered by bucket start, no gaps.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    width: f64,
    counts: Vec<u64>,
}

impl Histogram {
    #[inline]
    #[must_use]
    pub fn empty(width: f64) -> Self {
        Self {
            width,
            counts: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Sum of all counts; equals the number of binned events.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bucket(&self, index: usize) -> Bucket {
        Bucket {
            start: index as f64 * self.width,
            width: self.width,
        }
    }

    /// `(bucket_start, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (self.bucket(i).start, c))
    }
}

/// Stateless binning engine for one bucket width.
#[derive(Clone, Copy, Debug)]
pub struct Binner {
    width: f64,
    max_buckets: usize,
}

impl Binner {
    /// Fails with `InvalidParameter` unless `width` is positive and finite.
    pub fn new(width: f64) -> Result<Self, BinError> {
        Ok(Self {
            width: check_positive("bin_width", width)?,
            max_buckets: DEFAULT_MAX_BUCKETS,
        })
    }

    #[inline]
    #[must_use]
    pub fn max_buckets(mut self, cap: usize) -> Self {
        self.max_buckets = cap;
        self
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Index of the bucket holding `t`.  `t` must already be validated.
    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn index_of(&self, t: f64) -> usize {
        (t / self.width).floor() as usize
    }

    /// Buckets needed so the latest event at `max_t` falls inside the last
    /// one.  Fails with `TooManyBuckets` above the cap.
    pub fn bucket_count(&self, max_t: f64) -> Result<usize, BinError> {
        let needed = (max_t / self.width).floor() + 1.0;
        #[allow(clippy::cast_precision_loss)]
        let cap = self.max_buckets as f64;
        if !needed.is_finite() || needed > cap {
            return Err(BinError::TooManyBuckets {
                width: self.width,
                buckets: needed,
                cap: self.max_buckets,
            });
        }
        Ok(self.index_of(max_t) + 1)
    }

    /// Count `timestamps` into a gapless histogram.
    pub fn bin(&self, timestamps: &[f64]) -> Result<Histogram, BinError> {
        let Some(max_t) = max_timestamp(timestamps)? else {
            return Ok(Histogram::empty(self.width));
        };

        let n = self.bucket_count(max_t)?;
        let mut counts = vec![0u64; n];
        for &t in timestamps {
            // floor is monotone, so no index can pass the one for max_t
            counts[self.index_of(t).min(n - 1)] += 1;
        }

        Ok(Histogram {
            width: self.width,
            counts,
        })
    }
}

/// Latest timestamp, or `None` when there are no events.
///
/// Fails with `InvalidInput` on the first negative or non-finite value.
pub fn max_timestamp(timestamps: &[f64]) -> Result<Option<f64>, BinError> {
    let mut max: Option<f64> = None;
    for (index, &value) in timestamps.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(BinError::InvalidInput { index, value });
        }
        max = Some(max.map_or(value, |m| m.max(value)));
    }
    Ok(max)
}
