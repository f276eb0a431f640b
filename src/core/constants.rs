//! A collection of constants.

/// The left and right border characters
pub const BORDER_WIDTH: usize = 2;
/// One character of space between y axis labels and the plotted data
pub const LABEL_GUTTER: usize = 1;

/// Graph must be at least 7 characters tall
pub const MIN_GRAPH_HEIGHT: usize = 7;
/// Graph must be at least 14 characters wide
pub const MIN_GRAPH_WIDTH: usize = 14;

/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_HORIZONTAL_RESOLUTION: usize = 2;
/// Braille has 2 horizontal dots and four vertical dots that can be either off or on
pub const BRAILLE_VERTICAL_RESOLUTION: usize = 4;

/// Rows used by the frame outside the graph area: top rule, padding row,
/// padding row, bottom rule with the time range.
pub const CHROME_ROWS: usize = 4;

/// Times on the axis footer are rounded to two decimal places.
pub const DECIMAL_PRECISION: usize = 2;

/// Output points aimed for when no explicit bin width is given.
pub const DEFAULT_TARGET_POINTS: usize = 10_000;
/// Smallest auto-selected bin width, in seconds.
pub const DEFAULT_MIN_BIN_WIDTH: f64 = 0.1;
/// Upper bound on materialised buckets per series.
pub const DEFAULT_MAX_BUCKETS: usize = 10_000_000;
