//! Cumulative series to UTF-8 braille cells.
//!
//! ### Workflow
//! 1. `preprocess_to_braille` samples every series once per *half* column on
//!    the shared time axis and maps the running totals into pixel rows
//!    (`GraphTimeStep`).  Adjacent half columns are bridged so a jump in the
//!    count draws as a continuous vertical edge.
//! 2. `BraillePlot::raster` ORs all layers into one mask per character cell
//!    and remembers which layer touched the cell last, for colouring.
//! 3. `encode_cell` writes the three UTF-8 bytes of a cell directly.  Every
//!    braille scalar U+2800..U+28FF encodes to the fixed pattern
//!    `E2 A0+((mask>>6)&3) 80|mask&0x3F`, so no `char::encode_utf8` needed.
//!
//! The intersection of a contiguous vertical range with a 4-pixel braille
//! cell is always one of 11 canonical patterns (10 contiguous runs plus
//! empty), so the masks for both half columns are precomputed.

use crate::{
    aggregate::CumulativeSeries,
    core::{
        color::AnsiCode,
        config::Config,
        constants::{BRAILLE_HORIZONTAL_RESOLUTION as HR, BRAILLE_VERTICAL_RESOLUTION as VR},
        error::GraphError,
    },
};

/// Pixel rows covered inside one half column, `min <= max`, 0 at the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphTimeStep {
    pub min: usize,
    pub max: usize,
}

/// One series in pixel space.  `None` where the series has no data.
#[derive(Clone, Debug)]
pub struct Layer {
    pub color: AnsiCode,
    pub steps: Vec<Option<GraphTimeStep>>,
}

pub struct BraillePlot {
    pub layers: Vec<Layer>,
    pub x_chars: usize,
    pub y_chars: usize,
}

/// One character cell after all layers are merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub mask: u8,
    /// Index of the last layer with a dot in this cell.
    pub owner: Option<usize>,
}

// --- Pre-Computed Masks ---

/// Pattern enumeration (11 entries):
///
/// 0 empty (⠀), 1 full (⡇), 2 top-three (⠇), 3 bottom-three(⡆), 4 top-two (⠃), 5 middle-two (⠆), 6 bottom-two (⡄),
/// 7 dot-zero (⠁), 8 dot-one (⠂), 9 dot-two (⠄), 10 dot-three (⡀)
const LEFT_MASKS: [u8; 11] = [
    0x00, 0x47, 0x07, 0x46, 0x03, 0x06, 0x44, 0x01, 0x02, 0x04, 0x40,
];
/// Pattern enumeration (11 entries):
///
/// 0 empty (⠀), 1 full (⢸), 2 top-three (⠸), 3 bottom-three(⢰), 4 top-two (⠘), 5 middle-two (⠰), 6 bottom-two (⢠),
/// 7 dot-zero (⠈), 8 dot-one (⠐), 9 dot-two (⠠), 10 dot-three (⢀)
const RIGHT_MASKS: [u8; 11] = [
    0x00, 0xB8, 0x38, 0xB0, 0x18, 0x30, 0xA0, 0x08, 0x10, 0x20, 0x80,
];

/// Map `(low, high)` --- pixel offsets inside a 4-row cell --- to the pattern id.
#[inline]
const fn pattern_id(low: usize, high: usize) -> usize {
    match (low, high) {
        (0, 3) => 1,  // full
        (0, 2) => 2,  // top-3
        (1, 3) => 3,  // bottom-3
        (0, 1) => 4,  // top-2
        (1, 2) => 5,  // middle-2
        (2, 3) => 6,  // bottom-2
        (0, 0) => 7,  // single-0
        (1, 1) => 8,  // single-1
        (2, 2) => 9,  // single-2
        (3, 3) => 10, // single-3
        _ => 0,       // empty / no overlap
    }
}

/// Pattern of `step` inside the cell row whose top pixel is `row_top`.
#[inline]
fn pattern_in_row(step: Option<&GraphTimeStep>, row_top: usize) -> usize {
    let row_bottom = row_top + VR - 1;
    match step {
        Some(s) if s.max >= row_top && s.min <= row_bottom => pattern_id(
            s.min.max(row_top) - row_top,
            s.max.min(row_bottom) - row_top,
        ),
        _ => 0,
    }
}

/// Extend `curr` towards `prev` so the two half columns touch.
#[inline]
fn bridge(prev: GraphTimeStep, curr: GraphTimeStep) -> GraphTimeStep {
    let mut out = curr;
    if prev.min > curr.max + 1 {
        // rising: previous column sits lower on screen
        out.max = prev.min - 1;
    } else if curr.min > prev.max + 1 {
        out.min = prev.max + 1;
    }
    out
}

/// Sample every series onto the shared half-column grid of `config`.
///
/// `series` holds `(label, data)` pairs in drawing order; later layers win
/// the colour of shared cells.
#[allow(clippy::cast_precision_loss)]
pub fn preprocess_to_braille(
    series: &[(&str, &CumulativeSeries)],
    config: &Config,
) -> Result<BraillePlot, GraphError> {
    if series.iter().all(|(_, c)| c.is_empty()) {
        return Err(GraphError::EmptyData);
    }

    let horiz_px = config.x_chars * HR;
    let vert_px = config.y_chars * VR;
    let (x_lo, x_hi) = config.x_range;
    let (y_lo, y_hi) = config.y_range;
    let px_time = (x_hi - x_lo) / horiz_px as f64;

    // λ : ℝ → [0,vert_px-1]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let map = |y: f64| -> usize {
        let r = ((y - y_lo) / (y_hi - y_lo)).clamp(0.0, 1.0) * (vert_px - 1) as f64;
        (vert_px - 1) - r.round() as usize
    };

    let layers = series
        .iter()
        .enumerate()
        .map(|(position, (label, data))| {
            let mut steps = Vec::with_capacity(horiz_px);
            let mut prev: Option<GraphTimeStep> = None;
            for px in 0..horiz_px {
                let t0 = x_lo + px as f64 * px_time;
                let step = data.span(t0, t0 + px_time).map(|(lo, hi)| {
                    // higher counts sit higher on screen, i.e. at smaller rows
                    let s = GraphTimeStep {
                        min: map(hi as f64),
                        max: map(lo as f64),
                    };
                    prev.map_or(s, |p| bridge(p, s))
                });
                prev = step;
                steps.push(step);
            }
            Layer {
                color: config.palette.color_for(label, position),
                steps,
            }
        })
        .collect();

    Ok(BraillePlot {
        layers,
        x_chars: config.x_chars,
        y_chars: config.y_chars,
    })
}

impl BraillePlot {
    /// Merge every layer into a row-major grid of `x_chars * y_chars` cells.
    #[must_use]
    pub fn raster(&self) -> Vec<Cell> {
        let mut cells = vec![Cell::default(); self.x_chars * self.y_chars];

        for (owner, layer) in self.layers.iter().enumerate() {
            for row in 0..self.y_chars {
                let row_top = row * VR;
                for col in 0..self.x_chars {
                    let left = pattern_in_row(layer.steps.get(col * HR).and_then(Option::as_ref), row_top);
                    let right =
                        pattern_in_row(layer.steps.get(col * HR + 1).and_then(Option::as_ref), row_top);
                    let mask = LEFT_MASKS[left] | RIGHT_MASKS[right];
                    if mask != 0 {
                        let cell = &mut cells[row * self.x_chars + col];
                        cell.mask |= mask;
                        cell.owner = Some(owner);
                    }
                }
            }
        }
        cells
    }
}

/// Append the three UTF-8 bytes of the braille glyph for `mask`.
///
/// <https://en.wikipedia.org/wiki/Braille_Patterns>
#[inline]
pub fn encode_cell(buf: &mut Vec<u8>, mask: u8) {
    buf.push(0xE2);
    // most significant two bits: the nonstandard bottom left and right dots
    buf.push(0xA0 | ((mask >> 6) & 0x03));
    // least significant six bits: the normal six dots
    buf.push(0x80 | (mask & 0x3F));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{Binner, accumulate};

    fn config(x_chars: usize, y_chars: usize, x_hi: f64, y_hi: f64) -> Config {
        Config::builder(x_chars, y_chars)
            .x_range(0.0, x_hi)
            .y_range(0.0..=y_hi)
            .build()
            .unwrap()
    }

    #[test]
    fn encodes_every_glyph() {
        for mask in 0..=u8::MAX {
            let mut buf = Vec::new();
            encode_cell(&mut buf, mask);
            let ch = std::str::from_utf8(&buf).unwrap().chars().next().unwrap();
            assert_eq!(ch as u32, 0x2800 + u32::from(mask));
        }
    }

    #[test]
    fn bridge_closes_gaps() {
        let rising = bridge(
            GraphTimeStep { min: 10, max: 10 },
            GraphTimeStep { min: 4, max: 4 },
        );
        assert_eq!(rising, GraphTimeStep { min: 4, max: 9 });
        let flat = bridge(
            GraphTimeStep { min: 4, max: 4 },
            GraphTimeStep { min: 4, max: 4 },
        );
        assert_eq!(flat, GraphTimeStep { min: 4, max: 4 });
    }

    #[test]
    fn staircase_rises_left_to_right() {
        // 4 buckets of 1s, counts 3,5,5,6 on an 8-pixel wide, 8-pixel tall grid
        let c = accumulate(
            &Binner::new(1.0)
                .unwrap()
                .bin(&[0.05, 0.3, 0.99, 1.5, 1.5, 3.0])
                .unwrap(),
        );
        let cfg = config(4, 2, 4.0, 6.0);
        let plot = preprocess_to_braille(&[("s", &c)], &cfg).unwrap();
        let steps = &plot.layers[0].steps;
        assert_eq!(steps.len(), 8);
        assert!(steps.iter().all(Option::is_some));

        let tops: Vec<usize> = steps.iter().map(|s| s.unwrap().min).collect();
        assert!(tops.windows(2).all(|w| w[1] <= w[0]), "{tops:?}");
        assert_eq!(tops[7], 0, "final total reaches the top row");
    }

    #[test]
    fn short_series_stops_early() {
        let short = accumulate(&Binner::new(1.0).unwrap().bin(&[0.5]).unwrap());
        let cfg = config(4, 2, 4.0, 1.0);
        let plot = preprocess_to_braille(&[("s", &short)], &cfg).unwrap();
        let drawn = plot.layers[0].steps.iter().filter(|s| s.is_some()).count();
        assert_eq!(drawn, 2);
    }

    #[test]
    fn later_layer_owns_shared_cells() {
        let a = accumulate(&Binner::new(1.0).unwrap().bin(&[0.5]).unwrap());
        let cfg = config(1, 1, 1.0, 1.0);
        let plot = preprocess_to_braille(&[("a", &a), ("b", &a)], &cfg).unwrap();
        let cells = plot.raster();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].owner, Some(1));
        assert_ne!(cells[0].mask, 0);
    }

    #[test]
    fn nothing_to_draw() {
        let empty = accumulate(&crate::aggregate::Histogram::empty(1.0));
        let cfg = config(4, 2, 1.0, 1.0);
        assert!(matches!(
            preprocess_to_braille(&[("e", &empty)], &cfg),
            Err(GraphError::EmptyData)
        ));
    }
}
