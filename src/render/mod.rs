pub mod braille;
pub mod chart;
pub mod frame;

pub use braille::{BraillePlot, preprocess_to_braille};
pub use chart::{ChartStyle, render_comparison};
pub use frame::{LegendEntry, Renderer};
