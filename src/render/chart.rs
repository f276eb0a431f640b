//! Comparison chart: shared axes from every ready series, then one frame.

use std::io::Write;

use crate::{
    aggregate::Comparison,
    core::{
        bounds::{Axis, graph_dims, y_label_width},
        color::Palette,
        config::Config,
        error::GraphError,
    },
    render::{
        braille::preprocess_to_braille,
        frame::{LegendEntry, Renderer},
    },
};

/// Presentation settings for [`render_comparison`].
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub title: String,
    pub subtitle: Option<String>,
    pub palette: Palette,
    pub colored: bool,
    /// Outer size in characters, chrome and legend included.
    pub size: (usize, usize),
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: "Number of Primes Found Over Time".into(),
            subtitle: None,
            palette: Palette::default(),
            colored: true,
            size: (80, 30),
        }
    }
}

/// Draw every ready series of `cmp` on one time axis.  Empty and failed
/// series are left out; `EmptyData` when none is left.
pub fn render_comparison<W: Write>(
    out: &mut W,
    cmp: &Comparison,
    style: &ChartStyle,
) -> Result<(), GraphError> {
    let ready: Vec<_> = cmp.ready().collect();
    if ready.is_empty() {
        return Err(GraphError::EmptyData);
    }

    let (x_lo, x_hi) = Axis::Time.bounds(ready.iter().map(|(_, c)| *c));
    let (y_lo, y_hi) = Axis::Count.bounds(ready.iter().map(|(_, c)| *c));
    let (x_chars, y_chars) = graph_dims(style.size, y_label_width((y_lo, y_hi)), ready.len());

    let cfg = Config::builder(x_chars, y_chars)
        .title(style.title.as_str())
        .subtitle_opt(style.subtitle.as_deref())
        .x_range(x_lo, x_hi)
        .y_range(y_lo..=y_hi)
        .palette(style.palette.clone())
        .colored(style.colored)
        .build()?;

    let plot = preprocess_to_braille(&ready, &cfg)?;
    let legend: Vec<_> = ready
        .iter()
        .map(|&(label, c)| LegendEntry {
            label,
            total: c.total(),
        })
        .collect();
    Renderer::new().render(out, &cfg, &plot, &legend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aggregate::{Series, compare},
        core::config::BinConfig,
    };

    #[test]
    fn skips_unplottable_series() {
        let cmp = compare(
            vec![
                Series::new("Trial Division", vec![0.2, 0.4, 3.9]),
                Series::new("Empty", vec![]),
                Series::new("Broken", vec![f64::NAN]),
            ],
            &BinConfig::default(),
        );
        let style = ChartStyle {
            colored: false,
            size: (60, 20),
            ..ChartStyle::default()
        };
        let mut out = Vec::new();
        render_comparison(&mut out, &cmp, &style).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Trial Division  (3)"));
        assert!(!text.contains("Empty"));
        assert!(!text.contains("Broken"));
        assert_eq!(text.lines().count(), 20 - 1);
    }

    #[test]
    fn nothing_ready() {
        let cmp = compare(vec![Series::new("Empty", vec![])], &BinConfig::default());
        let err = render_comparison(&mut Vec::new(), &cmp, &ChartStyle::default());
        assert!(matches!(err, Err(GraphError::EmptyData)));
    }
}
