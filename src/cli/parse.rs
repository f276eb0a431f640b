use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::{
    config::BinConfig,
    constants::{DEFAULT_MAX_BUCKETS, DEFAULT_MIN_BIN_WIDTH, DEFAULT_TARGET_POINTS},
    data::SeriesSource,
    error::ConfigError,
};

/// Top-level CLI structure.
#[derive(Parser)]
#[command(
    name = "prime-timeline",
    version,
    about = "Compare how fast prime-search algorithms find primes, as cumulative braille charts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,

    /// Log debug details and timings (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Plot cumulative primes over time for each algorithm
    Plot(PlotArgs),
    /// Print per-series binning results without drawing
    Summary(SummaryArgs),
    /// Show available color names / hex syntax
    Colors,
    /// Print example invocations
    Examples,
}

/// Bucket width controls shared by `plot` and `summary`.
#[derive(Args, Debug, Clone)]
pub struct BinArgs {
    /// Fixed bucket width in seconds (auto-selected per series if omitted)
    #[arg(short = 'w', long)]
    pub bin_width: Option<f64>,

    /// Points aimed for per series when the width is auto-selected
    #[arg(short = 'p', long, default_value_t = DEFAULT_TARGET_POINTS)]
    pub target_points: usize,

    /// Smallest auto-selected bucket width in seconds
    #[arg(long, default_value_t = DEFAULT_MIN_BIN_WIDTH)]
    pub min_bin_width: f64,

    /// Refuse widths that would need more buckets than this
    #[arg(long, default_value_t = DEFAULT_MAX_BUCKETS)]
    pub max_buckets: usize,
}

impl BinArgs {
    pub fn to_config(&self) -> Result<BinConfig, ConfigError> {
        BinConfig::builder()
            .bin_width_opt(self.bin_width)
            .target_points(self.target_points)
            .min_bin_width(self.min_bin_width)
            .max_buckets(self.max_buckets)
            .build()
    }
}

/// `prime-timeline plot …`
#[derive(Parser, Debug)]
pub struct PlotArgs {
    /// Event files as `LABEL=PATH` or `PATH` (`-` for stdin).
    /// Defaults to the four algorithm CSVs in the working directory
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<SeriesSource>,

    #[command(flatten)]
    pub bin: BinArgs,

    /// Where to draw the chart (`-` for stdout)
    #[arg(short, long, default_value = "-")]
    pub output: String,

    /// Graph title
    #[arg(short, long, default_value = "Number of Primes Found Over Time")]
    pub title: String,

    /// Optional subtitle
    #[arg(short, long)]
    pub subtitle: Option<String>,

    /// Also write the cumulative series as CSV
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Colour override, `LABEL=COLOR` (name or `#RRGGBB`); repeatable
    #[arg(long = "style", value_name = "LABEL=COLOR")]
    pub styles: Vec<String>,

    /// Plain text, no ANSI colour escapes
    #[arg(long)]
    pub no_color: bool,

    /// Chart width in characters (terminal width if omitted)
    #[arg(long)]
    pub width: Option<usize>,

    /// Chart height in characters (terminal height if omitted)
    #[arg(long)]
    pub height: Option<usize>,
}

/// `prime-timeline summary …`
#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Event files as `LABEL=PATH` or `PATH` (`-` for stdin)
    #[arg(value_name = "SOURCE")]
    pub sources: Vec<SeriesSource>,

    #[command(flatten)]
    pub bin: BinArgs,
}

/// Explicit sources, or the default algorithm files when none were given.
#[must_use]
pub fn sources_or_default(sources: &[SeriesSource]) -> Vec<SeriesSource> {
    if sources.is_empty() {
        SeriesSource::defaults()
    } else {
        sources.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_flags() {
        let cli = Cli::try_parse_from([
            "prime-timeline",
            "plot",
            "Atkin=atkin.csv",
            "trial_division.csv",
            "-w",
            "0.5",
            "--style",
            "Atkin=#00ff00",
            "--no-color",
            "--debug",
        ])
        .unwrap();
        assert!(cli.debug);
        let Command::Plot(a) = cli.cmd else {
            panic!("expected plot");
        };
        assert_eq!(a.sources.len(), 2);
        assert_eq!(a.sources[1].label, "Trial Division");
        assert_eq!(a.bin.bin_width, Some(0.5));
        assert_eq!(a.styles, vec!["Atkin=#00ff00".to_owned()]);
        assert!(a.no_color);
        assert_eq!(a.output, "-");

        let cfg = a.bin.to_config().unwrap();
        assert_eq!(cfg.bin_width, Some(0.5));
        assert_eq!(cfg.target_points, DEFAULT_TARGET_POINTS);
    }

    #[test]
    fn summary_defaults_to_algorithm_files() {
        let cli = Cli::try_parse_from(["prime-timeline", "summary"]).unwrap();
        let Command::Summary(a) = cli.cmd else {
            panic!("expected summary");
        };
        let sources = sources_or_default(&a.sources);
        assert_eq!(sources, SeriesSource::defaults());
    }

    #[test]
    fn zero_target_points_is_rejected() {
        let cli = Cli::try_parse_from(["prime-timeline", "summary", "-p", "0"]).unwrap();
        let Command::Summary(a) = cli.cmd else {
            panic!("expected summary");
        };
        assert!(a.bin.to_config().is_err());
    }
}
