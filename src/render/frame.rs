//! Boxed braille chart writer:
//! - title rule, count labels on the first and last graph rows
//! - time range on the bottom rule
//! - one legend row per series with its colour and final total
//! - any `io::Write` target; colour escapes are optional for plain files

use std::io::Write;

use crate::{
    core::{
        bounds::y_label_width,
        color::{AnsiCode, colorize},
        config::Config,
        constants::{DECIMAL_PRECISION, LABEL_GUTTER, MIN_GRAPH_HEIGHT, MIN_GRAPH_WIDTH},
        error::GraphError,
    },
    render::braille::{BraillePlot, encode_cell},
};

/// Two spaces in front, one space behind
const TITLE_PADDING: usize = 3;

// Box-drawing glyphs
const TL: &str = "┌";
const TR: &str = "┐";
const BL: &str = "└";
const BR: &str = "┘";
const H: &str = "─";
const V: &str = "│";

/// Full braille cell, used as the legend swatch.
const SWATCH: &str = "⣿";

/// One legend row.
#[derive(Clone, Copy, Debug)]
pub struct LegendEntry<'a> {
    pub label: &'a str,
    pub total: u64,
}

// --- Helpers ---

/// Write centred (optionally coloured) text between horizontal rules.
fn push_centered(buf: &mut String, text: &str, width: usize, color: Option<&AnsiCode>) {
    let inner = width.saturating_sub(TITLE_PADDING);
    let len = text.chars().count();
    if len == 0 || len > inner {
        buf.push_str(&H.repeat(width));
        return;
    }
    let pad_left = (inner - len) / 2;
    let pad_right = inner - len - pad_left;

    buf.push_str(&H.repeat(pad_left));
    buf.push_str("  "); // 2-char left padding
    match color {
        Some(c) => buf.push_str(&colorize(c, text)),
        None => buf.push_str(text),
    }
    buf.push(' '); // 1-char right padding
    buf.push_str(&H.repeat(pad_right));
}

/// Count label, right-aligned in the label field.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_label(v: f64, width: usize) -> String {
    format!("{:>width$}", v.max(0.0).round() as u64)
}

/// Chart renderer.  Stateless; each call writes one complete frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer;

impl Renderer {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn top_rule(cfg: &Config, inner: usize) -> String {
        let mut top = String::new();
        top.push_str(TL);
        let accent = AnsiCode::industrial_orange();
        push_centered(&mut top, &cfg.title, inner, cfg.colored.then_some(&accent));
        top.push_str(TR);
        top.push('\n');
        top
    }

    fn bottom_rule(cfg: &Config, inner: usize) -> String {
        let (lo, hi) = cfg.x_range;
        let range = format!(
            "{:.*}s … {:.*}s",
            DECIMAL_PRECISION, lo, DECIMAL_PRECISION, hi
        );
        let caption = match &cfg.subtitle {
            Some(sub) => format!("{sub}  ·  {range}"),
            None => range,
        };
        let mut bot = String::new();
        bot.push_str(BL);
        push_centered(&mut bot, &caption, inner, None);
        bot.push_str(BR);
        bot.push('\n');
        bot
    }

    fn padding_row(inner: usize) -> String {
        format!("{V}{}{V}\n", " ".repeat(inner))
    }

    /// Graph rows: border, label field, gutter, braille cells, border.
    fn graph_rows(cfg: &Config, plot: &BraillePlot, label_width: usize) -> Vec<u8> {
        let cells = plot.raster();
        let high = count_label(cfg.y_range.1, label_width);
        let low = count_label(cfg.y_range.0, label_width);
        let blank = " ".repeat(label_width);

        let mut buf = Vec::with_capacity(plot.y_chars * (plot.x_chars * 3 + label_width + 16));
        for row in 0..plot.y_chars {
            buf.extend_from_slice(V.as_bytes());
            let label = match row {
                0 => &high,
                r if r + 1 == plot.y_chars => &low,
                _ => &blank,
            };
            buf.extend_from_slice(label.as_bytes());
            buf.extend(std::iter::repeat_n(b' ', LABEL_GUTTER));

            let mut current: Option<usize> = None;
            for cell in &cells[row * plot.x_chars..(row + 1) * plot.x_chars] {
                if cfg.colored && cell.owner.is_some() && cell.owner != current {
                    current = cell.owner;
                    if let Some(layer) = cell.owner.and_then(|i| plot.layers.get(i)) {
                        buf.extend_from_slice(layer.color.as_str().as_bytes());
                    }
                }
                encode_cell(&mut buf, cell.mask);
            }
            if current.is_some() {
                buf.extend_from_slice(AnsiCode::reset().as_str().as_bytes());
            }

            buf.extend_from_slice(V.as_bytes());
            buf.push(b'\n');
        }
        buf
    }

    fn legend(cfg: &Config, plot: &BraillePlot, legend: &[LegendEntry<'_>]) -> String {
        let mut out = String::new();
        for (entry, layer) in legend.iter().zip(&plot.layers) {
            let swatch = if cfg.colored {
                colorize(&layer.color, SWATCH)
            } else {
                SWATCH.to_owned()
            };
            out.push_str(&format!("  {swatch} {}  ({})\n", entry.label, entry.total));
        }
        out
    }

    /// Write one frame to `out`.
    ///
    /// `legend` pairs up with `plot.layers` by position.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        config: &Config,
        plot: &BraillePlot,
        legend: &[LegendEntry<'_>],
    ) -> Result<(), GraphError> {
        if config.x_chars < MIN_GRAPH_WIDTH || config.y_chars < MIN_GRAPH_HEIGHT {
            return Err(GraphError::GraphTooSmall {
                want_w: MIN_GRAPH_WIDTH,
                want_h: MIN_GRAPH_HEIGHT,
                got_w: config.x_chars,
                got_h: config.y_chars,
            });
        }

        let label_width = y_label_width(config.y_range);
        let inner = label_width + LABEL_GUTTER + config.x_chars;

        out.write_all(Self::top_rule(config, inner).as_bytes())?;
        out.write_all(Self::padding_row(inner).as_bytes())?;
        out.write_all(&Self::graph_rows(config, plot, label_width))?;
        out.write_all(Self::padding_row(inner).as_bytes())?;
        out.write_all(Self::bottom_rule(config, inner).as_bytes())?;
        out.write_all(Self::legend(config, plot, legend).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aggregate::{Binner, accumulate},
        render::braille::preprocess_to_braille,
    };

    fn frame(colored: bool) -> String {
        let c = accumulate(
            &Binner::new(1.0)
                .unwrap()
                .bin(&[0.05, 0.3, 0.99, 1.5, 1.5, 3.0])
                .unwrap(),
        );
        let cfg = Config::builder(20, 8)
            .title("Primes")
            .x_range(0.0, c.end_time())
            .y_range(0.0..=6.0)
            .colored(colored)
            .build()
            .unwrap();
        let plot = preprocess_to_braille(&[("Sieve of Atkin", &c)], &cfg).unwrap();
        let mut out = Vec::new();
        Renderer::new()
            .render(
                &mut out,
                &cfg,
                &plot,
                &[LegendEntry {
                    label: "Sieve of Atkin",
                    total: c.total(),
                }],
            )
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_frame_layout() {
        let text = frame(false);
        let lines: Vec<&str> = text.lines().collect();
        // top, pad, 8 graph rows, pad, bottom, 1 legend row
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with(TL) && lines[0].contains("Primes"));
        assert!(lines[2].starts_with("│6 "));
        assert!(lines[9].starts_with("│0 "));
        assert!(lines[11].contains("0.00s … 4.00s"));
        assert!(lines[12].contains("Sieve of Atkin  (6)"));
        assert!(!text.contains('\x1b'));

        // every graph row has the same number of glyphs
        let widths: Vec<usize> = lines[2..10].iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(widths[0], 1 + 1 + LABEL_GUTTER + 20 + 1);
    }

    #[test]
    fn colored_frame_uses_palette() {
        let text = frame(true);
        assert!(text.contains(AnsiCode::green().as_str()));
        assert!(text.contains(AnsiCode::reset().as_str()));
    }

    #[test]
    fn too_small() {
        let cfg = Config::builder(3, 3)
            .x_range(0.0, 1.0)
            .y_range(0.0..=1.0)
            .build()
            .unwrap();
        let plot = BraillePlot {
            layers: Vec::new(),
            x_chars: 3,
            y_chars: 3,
        };
        let err = Renderer::new().render(&mut Vec::new(), &cfg, &plot, &[]);
        assert!(matches!(err, Err(GraphError::GraphTooSmall { .. })));
    }
}
