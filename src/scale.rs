//! Scaling of integer samples.
//!
//! Every function here is total: zero-width ranges resolve to a boundary value
//! and never divide by zero, so results are always finite for finite bounds.
//!
//! ## Physical
//! `physical_min + (v - logical_min) * (physical_max - physical_min) / (logical_max - logical_min)`
//! with two special cases, checked in order:
//! 1. No physical range declared (`0..0`): the raw integer is returned.
//! 2. `logical_min == logical_max`: `physical_min` is returned.
//!
//! Out-of-range samples are not clamped and extrapolate past the physical range.
//!
//! ## Calibrated
//! 1. Inside the dead zone (inclusive): exactly `0.0`.
//! 2. At or beyond saturation: exactly `-1.0` / `1.0`.
//! 3. Otherwise linear interpolation: `[sat_min, dz_min] -> [-1, 0]` and
//!    `[dz_max, sat_max] -> [0, 1]` with a dead zone, `[sat_min, sat_max] -> [-1, 1]`
//!    without one.
//! 4. Granularity snaps the result to the nearest step.

use serde::{Deserialize, Serialize};

use crate::bounds::{CalibrationBounds, ElementBounds};

/// Which scaled representation of a value to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    /// Logical bounds mapped onto physical bounds.
    Physical,
    /// Calibrated and normalized to `[-1.0, 1.0]`.
    Calibrated,
    /// Physical value with the unit exponent applied.
    Exponent,
}

/// Map `value` from logical to physical units.
pub fn physical(value: i64, bounds: &ElementBounds) -> f64 {
    if !bounds.has_physical_range() {
        return value as f64;
    }
    if bounds.logical_min == bounds.logical_max {
        return bounds.physical_min;
    }

    let logical_span = bounds.logical_max as f64 - bounds.logical_min as f64;
    let physical_span = bounds.physical_max - bounds.physical_min;
    bounds.physical_min + (value as f64 - bounds.logical_min as f64) * physical_span / logical_span
}

/// Apply a base-10 unit exponent to a physical value.
pub fn exponent(physical: f64, unit_exponent: i8) -> f64 {
    if unit_exponent == 0 {
        return physical;
    }
    physical * 10f64.powi(i32::from(unit_exponent))
}

/// Normalize `value` into `[-1.0, 1.0]` using resolved calibration.
pub fn calibrated(value: i64, cal: &CalibrationBounds) -> f64 {
    if let Some((lo, hi)) = cal.dead_zone {
        if (lo..=hi).contains(&value) {
            return 0.0;
        }
    }
    if value <= cal.saturation_min {
        return -1.0;
    }
    if value >= cal.saturation_max {
        return 1.0;
    }

    let scaled = match cal.dead_zone {
        Some((lo, _)) if value < lo => interpolate(value, cal.saturation_min, lo, -1.0, 0.0),
        Some((_, hi)) => interpolate(value, hi, cal.saturation_max, 0.0, 1.0),
        None => interpolate(value, cal.saturation_min, cal.saturation_max, -1.0, 1.0),
    };

    match cal.granularity {
        Some(step) => quantize(scaled, step),
        None => scaled,
    }
}

/// Linear map of `value` from `[from, to]` onto `[out_from, out_to]`.
///
/// A zero-width input interval yields `out_from`.
fn interpolate(value: i64, from: i64, to: i64, out_from: f64, out_to: f64) -> f64 {
    if from == to {
        return out_from;
    }
    let t = (value as f64 - from as f64) / (to as f64 - from as f64);
    (out_from + t * (out_to - out_from)).clamp(out_from.min(out_to), out_from.max(out_to))
}

fn quantize(value: f64, step: f64) -> f64 {
    ((value / step).round() * step).clamp(-1.0, 1.0)
}
