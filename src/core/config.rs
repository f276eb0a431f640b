//! Run-time configuration objects + fluent builders.

use crate::core::{
    color::Palette,
    constants::{DEFAULT_MAX_BUCKETS, DEFAULT_MIN_BIN_WIDTH, DEFAULT_TARGET_POINTS},
    error::ConfigError,
};

// --- Aggregation ---

/// Parameters consumed by the bin-and-accumulate pipeline.
///
/// Fields are public so library callers can hand-assemble one; the binner
/// re-validates whatever it receives, so a bad value fails the affected
/// series instead of the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinConfig {
    /// Explicit bucket width.  Overrides auto-selection entirely.
    pub bin_width: Option<f64>,
    /// Points aimed for when `bin_width` is absent.
    pub target_points: usize,
    /// Floor for the auto-selected width.
    pub min_bin_width: f64,
    /// Maximum buckets one series may materialise.
    pub max_buckets: usize,
}

impl Default for BinConfig {
    fn default() -> Self {
        Self {
            bin_width: None,
            target_points: DEFAULT_TARGET_POINTS,
            min_bin_width: DEFAULT_MIN_BIN_WIDTH,
            max_buckets: DEFAULT_MAX_BUCKETS,
        }
    }
}

impl BinConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> BinConfigBuilder {
        BinConfigBuilder::default()
    }
}

/// Fluent builder; `build` rejects values the pipeline could never use.
#[derive(Debug, Default)]
pub struct BinConfigBuilder {
    bin_width: Option<f64>,
    target_points: Option<usize>,
    min_bin_width: Option<f64>,
    max_buckets: Option<usize>,
}

impl BinConfigBuilder {
    #[inline]
    #[must_use]
    pub fn bin_width(mut self, w: f64) -> Self {
        self.bin_width = Some(w);
        self
    }
    #[inline]
    #[must_use]
    pub fn bin_width_opt(mut self, w: Option<f64>) -> Self {
        if w.is_some() {
            self.bin_width = w;
        }
        self
    }
    #[inline]
    #[must_use]
    pub fn target_points(mut self, p: usize) -> Self {
        self.target_points = Some(p);
        self
    }
    #[inline]
    #[must_use]
    pub fn min_bin_width(mut self, w: f64) -> Self {
        self.min_bin_width = Some(w);
        self
    }
    #[inline]
    #[must_use]
    pub fn max_buckets(mut self, n: usize) -> Self {
        self.max_buckets = Some(n);
        self
    }

    pub fn build(self) -> Result<BinConfig, ConfigError> {
        let defaults = BinConfig::default();
        let cfg = BinConfig {
            bin_width: self.bin_width,
            target_points: self.target_points.unwrap_or(defaults.target_points),
            min_bin_width: self.min_bin_width.unwrap_or(defaults.min_bin_width),
            max_buckets: self.max_buckets.unwrap_or(defaults.max_buckets),
        };

        if let Some(w) = cfg.bin_width {
            positive("bin_width", w)?;
        }
        if cfg.target_points == 0 {
            return Err(ConfigError::NotPositive {
                name: "target_points",
                value: 0.0,
            });
        }
        positive("min_bin_width", cfg.min_bin_width)?;
        if cfg.max_buckets == 0 {
            return Err(ConfigError::NotPositive {
                name: "max_buckets",
                value: 0.0,
            });
        }
        Ok(cfg)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

// --- Rendering ---

/// Immutable parameters handed to the renderer.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub subtitle: Option<String>,
    pub x_chars: usize,
    pub y_chars: usize,
    /// Shared time axis, seconds.
    pub x_range: (f64, f64),
    /// Shared count axis.
    pub y_range: (f64, f64),
    pub palette: Palette,
    /// Emit ANSI colour escapes.
    pub colored: bool,
}

impl Config {
    #[inline]
    #[must_use]
    pub fn builder(x_chars: usize, y_chars: usize) -> ConfigBuilder {
        ConfigBuilder::new(x_chars, y_chars)
    }
}

/// Fluent builder with zero allocation until `build`.
#[derive(Debug)]
pub struct ConfigBuilder {
    x_chars: usize,
    y_chars: usize,
    title: Option<String>,
    subtitle: Option<String>,
    x_range: Option<(f64, f64)>,
    y_range: Option<(f64, f64)>,
    palette: Option<Palette>,
    colored: bool,
}

impl ConfigBuilder {
    pub(crate) fn new(x_chars: usize, y_chars: usize) -> Self {
        Self {
            x_chars,
            y_chars,
            title: None,
            subtitle: None,
            x_range: None,
            y_range: None,
            palette: None,
            colored: true,
        }
    }

    #[inline]
    #[must_use]
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = Some(t.into());
        self
    }
    #[inline]
    #[must_use]
    pub fn subtitle_opt(mut self, s: Option<&str>) -> Self {
        if let Some(t) = s {
            self.subtitle = Some(t.to_owned());
        }
        self
    }
    #[inline]
    #[must_use]
    pub fn x_range(mut self, lo: f64, hi: f64) -> Self {
        self.x_range = Some((lo, hi));
        self
    }
    #[inline]
    #[must_use]
    pub fn y_range(mut self, r: std::ops::RangeInclusive<f64>) -> Self {
        self.y_range = Some((*r.start(), *r.end()));
        self
    }
    #[inline]
    #[must_use]
    pub fn palette(mut self, p: Palette) -> Self {
        self.palette = Some(p);
        self
    }
    #[inline]
    #[must_use]
    pub fn colored(mut self, on: bool) -> Self {
        self.colored = on;
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let x_range = self.x_range.ok_or(ConfigError::MissingField("x_range"))?;
        let y_range = self.y_range.ok_or(ConfigError::MissingField("y_range"))?;
        for (low, high) in [x_range, y_range] {
            if low.partial_cmp(&high) != Some(std::cmp::Ordering::Less) {
                return Err(ConfigError::InvalidRange { low, high });
            }
        }
        Ok(Config {
            title: self.title.unwrap_or_default(),
            subtitle: self.subtitle,
            x_chars: self.x_chars,
            y_chars: self.y_chars,
            x_range,
            y_range,
            palette: self.palette.unwrap_or_default(),
            colored: self.colored,
        })
    }
}
