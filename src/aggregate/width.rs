//! Bucket-width selection.

use crate::core::{config::BinConfig, error::BinError};

/// Width used to bin a series whose latest event is at `max_t`.
///
/// An explicit `bin_width` is returned verbatim once it is known to be
/// positive.  Otherwise the width is `max_t / target_points`, floored at
/// `min_bin_width`, so the series never produces much more than
/// `target_points` buckets.
pub fn select_width(max_t: f64, cfg: &BinConfig) -> Result<f64, BinError> {
    if let Some(w) = cfg.bin_width {
        return check_positive("bin_width", w);
    }
    if cfg.target_points == 0 {
        return Err(BinError::InvalidParameter {
            name: "target_points",
            value: 0.0,
        });
    }
    let floor = check_positive("min_bin_width", cfg.min_bin_width)?;

    #[allow(clippy::cast_precision_loss)]
    let auto = max_t / cfg.target_points as f64;
    Ok(auto.max(floor))
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<f64, BinError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BinError::InvalidParameter { name, value })
    }
}
