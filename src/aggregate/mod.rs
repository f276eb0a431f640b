//! Event timestamps -> gapless histogram -> cumulative series.

pub mod accumulator;
pub mod binner;
pub mod compose;
pub mod width;

pub use accumulator::{CumulativeSeries, accumulate};
pub use binner::{Binner, Bucket, Histogram, max_timestamp};
pub use compose::{Comparison, Series, SeriesOutcome, SeriesReport, compare, process};
pub use width::select_width;
