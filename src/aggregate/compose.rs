//! Bin-and-accumulate for several labelled series at once.
//!
//! Every series is processed on its own, with its own width when the width is
//! auto-selected.  A series that is empty or fails is recorded and skipped;
//! it never stops the others.

use log::{debug, warn};

use crate::{
    aggregate::{
        accumulator::{CumulativeSeries, accumulate},
        binner::{Binner, max_timestamp},
        width::select_width,
    },
    core::{config::BinConfig, error::BinError},
};

/// A labelled bag of event timestamps.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub timestamps: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, timestamps: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            timestamps,
        }
    }
}

/// What became of one series.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesOutcome {
    Ready(CumulativeSeries),
    /// No events.  A warning, not an error.
    Empty,
    Failed(BinError),
}

impl SeriesOutcome {
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ok",
            Self::Empty => "empty",
            Self::Failed(_) => "failed",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesReport {
    pub label: String,
    pub events: usize,
    pub outcome: SeriesOutcome,
}

/// Per-series results in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Comparison {
    pub reports: Vec<SeriesReport>,
}

impl Comparison {
    /// Series that can be plotted, in input order.
    pub fn ready(&self) -> impl Iterator<Item = (&str, &CumulativeSeries)> {
        self.reports.iter().filter_map(|r| match &r.outcome {
            SeriesOutcome::Ready(c) => Some((r.label.as_str(), c)),
            _ => None,
        })
    }

    #[must_use]
    pub fn is_plottable(&self) -> bool {
        self.ready().next().is_some()
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&SeriesReport> {
        self.reports.iter().find(|r| r.label == label)
    }
}

/// Bin and accumulate one series.  `Ok(None)` means it had no events.
pub fn process(timestamps: &[f64], cfg: &BinConfig) -> Result<Option<CumulativeSeries>, BinError> {
    let Some(max_t) = max_timestamp(timestamps)? else {
        return Ok(None);
    };
    let width = select_width(max_t, cfg)?;
    let hist = Binner::new(width)?.max_buckets(cfg.max_buckets).bin(timestamps)?;
    Ok(Some(accumulate(&hist)))
}

/// Run every series through [`process`], collecting outcomes.
pub fn compare<I>(series: I, cfg: &BinConfig) -> Comparison
where
    I: IntoIterator<Item = Series>,
{
    let reports = series
        .into_iter()
        .map(|s| {
            let outcome = match process(&s.timestamps, cfg) {
                Ok(Some(c)) => {
                    debug!(
                        "{}: {} events -> {} buckets of {}s",
                        s.label,
                        s.timestamps.len(),
                        c.len(),
                        c.width()
                    );
                    SeriesOutcome::Ready(c)
                }
                Ok(None) => {
                    warn!("{}: no events, nothing to plot", s.label);
                    SeriesOutcome::Empty
                }
                Err(e) => {
                    warn!("{}: skipped, {e}", s.label);
                    SeriesOutcome::Failed(e)
                }
            };
            SeriesReport {
                events: s.timestamps.len(),
                label: s.label,
                outcome,
            }
        })
        .collect();
    Comparison { reports }
}
