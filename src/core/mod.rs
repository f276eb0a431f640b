//! Aggregates the shared plumbing: config, errors, ingest, export, geometry.

pub mod bounds;
pub mod color;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod export;

// re-export frequently-used items for convenience
pub use bounds::Axis;
pub use color::{AnsiCode, ColorError, Palette, colorize};
pub use config::{BinConfig, BinConfigBuilder, Config, ConfigBuilder};
pub use constants::{
    BORDER_WIDTH, BRAILLE_HORIZONTAL_RESOLUTION, DECIMAL_PRECISION, LABEL_GUTTER, MIN_GRAPH_HEIGHT,
    MIN_GRAPH_WIDTH,
};
pub use data::{SeriesSource, read_events, read_events_from_path};
pub use error::{BinError, ConfigError, GraphError};
