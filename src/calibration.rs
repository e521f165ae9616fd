//! Per-element calibration settings.
//!
//! [`Calibration`] describes how a raw integer sample is normalized into
//! `[-1.0, 1.0]`. All fields are optional; anything left unset falls back to
//! the element's logical bounds (or is simply not applied).
//!
//! # Conventions
//! - `min`/`max` are the calibrated input bounds, in raw logical units.
//! - `saturation_min`/`saturation_max` clamp the output to `-1.0`/`1.0` once the
//!   sample reaches them. Each end falls back to the calibrated bound.
//! - `dead_zone_min`/`dead_zone_max` map every sample between them (inclusive)
//!   to exactly `0.0`. The dead zone is only applied when both ends are set.
//! - `granularity` quantizes the normalized output to multiples of the step.
//!
//! # Example
//! ```
//! use hidvalue::Calibration;
//!
//! let cal = Calibration::default()
//!     .with_dead_zone(-5, 5)
//!     .with_saturation(-100, 100);
//! assert_eq!(cal.dead_zone(), Some((-5, 5)));
//! ```

use serde::{Deserialize, Serialize};

/// Calibration settings for a single element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Calibrated lower input bound.
    pub min: Option<i64>,

    /// Calibrated upper input bound.
    pub max: Option<i64>,

    /// Samples at or below this value normalize to `-1.0`.
    pub saturation_min: Option<i64>,

    /// Samples at or above this value normalize to `1.0`.
    pub saturation_max: Option<i64>,

    /// Lower end of the dead zone (inclusive).
    pub dead_zone_min: Option<i64>,

    /// Upper end of the dead zone (inclusive).
    pub dead_zone_max: Option<i64>,

    /// Output quantization step, if any.
    ///
    /// Must be positive and finite; see [`Element::validate`](crate::Element::validate).
    pub granularity: Option<f64>,
}

impl Calibration {
    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn with_saturation(mut self, min: i64, max: i64) -> Self {
        self.saturation_min = Some(min);
        self.saturation_max = Some(max);
        self
    }

    pub fn with_dead_zone(mut self, min: i64, max: i64) -> Self {
        self.dead_zone_min = Some(min);
        self.dead_zone_max = Some(max);
        self
    }

    pub fn with_granularity(mut self, step: f64) -> Self {
        self.granularity = Some(step);
        self
    }

    /// The dead zone, when both ends are configured.
    pub fn dead_zone(&self) -> Option<(i64, i64)> {
        self.dead_zone_min.zip(self.dead_zone_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_configured_dead_zone_is_ignored() {
        let cal = Calibration {
            dead_zone_min: Some(-3),
            ..Calibration::default()
        };
        assert_eq!(cal.dead_zone(), None);
    }

    #[test]
    fn builders_set_pairs() {
        let cal = Calibration::default()
            .with_range(0, 1023)
            .with_saturation(10, 1000)
            .with_granularity(0.25);
        assert_eq!((cal.min, cal.max), (Some(0), Some(1023)));
        assert_eq!((cal.saturation_min, cal.saturation_max), (Some(10), Some(1000)));
        assert_eq!(cal.granularity, Some(0.25));
    }

    #[test]
    fn missing_fields_deserialize_as_unset() {
        let cal: Calibration = toml::from_str("dead_zone_min = -2\ndead_zone_max = 2").unwrap();
        assert_eq!(cal.dead_zone(), Some((-2, 2)));
        assert_eq!(cal.min, None);
        assert_eq!(cal.granularity, None);
    }
}
