//! Public-facing crate root – re-exports + one-shot helpers.

pub mod aggregate;
pub mod cli;
pub mod core;
pub mod render;

use std::io::Write;

use log::{debug, warn};

pub use crate::aggregate::{
    Binner, Comparison, CumulativeSeries, Histogram, Series, SeriesOutcome, SeriesReport,
    accumulate, compare, select_width,
};
pub use crate::core::{
    color::{AnsiCode, ColorError, Palette, colorize},
    config::{BinConfig, BinConfigBuilder, Config, ConfigBuilder},
    data::{ParseCsvError, SeriesSource, read_events, read_events_from_path},
    error::{BinError, ConfigError, GraphError},
};
pub use crate::render::{ChartStyle, Renderer, render_comparison};

/// A source that could not be read, with the reason.
#[derive(Debug)]
pub struct Skipped {
    pub label: String,
    pub error: ParseCsvError,
}

/// Read every source.  Unreadable ones are logged and returned separately;
/// they never stop the others from loading.
#[must_use]
pub fn load_sources(sources: &[SeriesSource]) -> (Vec<Series>, Vec<Skipped>) {
    let mut loaded = Vec::with_capacity(sources.len());
    let mut skipped = Vec::new();
    for src in sources {
        match read_events_from_path(&src.path) {
            Ok(timestamps) => {
                debug!("{}: read {} events from {}", src.label, timestamps.len(), src.path.display());
                loaded.push(Series::new(src.label.clone(), timestamps));
            }
            Err(error) => {
                warn!("{}: cannot read {}: {error}", src.label, src.path.display());
                skipped.push(Skipped {
                    label: src.label.clone(),
                    error,
                });
            }
        }
    }
    (loaded, skipped)
}

/// Load, aggregate and draw `sources` in one go.
///
/// Returns the per-series outcomes so callers can report what was left out.
pub fn plot_sources<W: Write>(
    out: &mut W,
    sources: &[SeriesSource],
    bin: &BinConfig,
    style: &ChartStyle,
) -> Result<Comparison, GraphError> {
    let (series, _) = load_sources(sources);
    let cmp = compare(series, bin);
    render_comparison(out, &cmp, style)?;
    Ok(cmp)
}
