//! Centralised error types used across the crate.

use std::io;

use thiserror::Error;

use crate::core::{color::ColorError, data::ParseCsvError};

/// Per-series aggregation faults.  Never fatal for a whole comparison run:
/// the series that raised it is marked failed and the others carry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BinError {
    /// A timestamp was negative, NaN or infinite.
    #[error("timestamp #{index} is {value}; timestamps must be finite and non-negative")]
    InvalidInput { index: usize, value: f64 },
    /// A bucket width, target point count or width floor that is not positive.
    #[error("`{name}` must be positive, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    /// The width is valid but would materialise more buckets than allowed.
    #[error("bin width {width} needs {buckets} buckets, above the cap of {cap}")]
    TooManyBuckets { width: f64, buckets: f64, cap: usize },
}

/// Precise configuration faults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration missing field `{0}`")]
    MissingField(&'static str),
    #[error("range start {low} must be < range end {high}")]
    InvalidRange { low: f64, high: f64 },
    #[error("`{name}` must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] ParseCsvError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Bin(#[from] BinError),
    #[error("graph area too small: need ≥{want_w}×{want_h}, got {got_w}×{got_h}")]
    GraphTooSmall {
        want_w: usize,
        want_h: usize,
        got_w: usize,
        got_h: usize,
    },
    #[error("no series had anything to plot")]
    EmptyData,
}
