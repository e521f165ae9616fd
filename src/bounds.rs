//! Owned snapshot of an element's scaling bounds.
//!
//! [`ElementBounds`] is captured once when a [`Value`](crate::value::Value) is
//! built. Later edits to the element in its table do not reach existing values,
//! so their scaled results stay reproducible.
//!
//! # Semantics
//! - Calibration is resolved here: unset calibrated bounds fall back to the
//!   logical bounds, unset saturation ends fall back to the calibrated bounds.
//! - A dead zone is present only when both ends were configured.
//! - A non-positive or non-finite granularity is dropped.

use crate::decode::SampleFormat;
use crate::element::Element;

/// Calibration with every fallback applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationBounds {
    pub min: i64,
    pub max: i64,
    pub saturation_min: i64,
    pub saturation_max: i64,
    pub dead_zone: Option<(i64, i64)>,
    pub granularity: Option<f64>,
}

/// Bounds of an element as they were when a value was captured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementBounds {
    pub format: SampleFormat,
    pub logical_min: i64,
    pub logical_max: i64,
    pub physical_min: f64,
    pub physical_max: f64,
    pub unit_exponent: i8,
    pub calibration: CalibrationBounds,
}

impl ElementBounds {
    /// Whether a physical range was declared.
    #[inline]
    pub fn has_physical_range(&self) -> bool {
        !(self.physical_min == 0.0 && self.physical_max == 0.0)
    }
}

impl From<&Element> for ElementBounds {
    fn from(element: &Element) -> Self {
        let cal = element.calibration.clone().unwrap_or_default();

        let min = cal.min.unwrap_or(element.logical_min);
        let max = cal.max.unwrap_or(element.logical_max);

        Self {
            format: element.sample_format(),
            logical_min: element.logical_min,
            logical_max: element.logical_max,
            physical_min: element.physical_min,
            physical_max: element.physical_max,
            unit_exponent: element.unit_exponent,
            calibration: CalibrationBounds {
                min,
                max,
                saturation_min: cal.saturation_min.unwrap_or(min),
                saturation_max: cal.saturation_max.unwrap_or(max),
                dead_zone: cal.dead_zone(),
                granularity: cal.granularity.filter(|g| g.is_finite() && *g > 0.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Calibration;

    #[test]
    fn uncalibrated_falls_back_to_logical() {
        let b = ElementBounds::from(&Element::axis(8, 0, 255));
        assert_eq!(b.calibration.min, 0);
        assert_eq!(b.calibration.max, 255);
        assert_eq!(b.calibration.saturation_min, 0);
        assert_eq!(b.calibration.saturation_max, 255);
        assert_eq!(b.calibration.dead_zone, None);
        assert!(!b.has_physical_range());
    }

    #[test]
    fn saturation_falls_back_to_calibrated_range() {
        let el = Element::axis(16, -32768, 32767)
            .with_calibration(Calibration::default().with_range(-30000, 30000));
        let b = ElementBounds::from(&el);
        assert_eq!(b.calibration.saturation_min, -30000);
        assert_eq!(b.calibration.saturation_max, 30000);
    }

    #[test]
    fn invalid_granularity_is_dropped() {
        let el = Element::axis(8, 0, 255)
            .with_calibration(Calibration::default().with_granularity(f64::NAN));
        assert_eq!(ElementBounds::from(&el).calibration.granularity, None);
    }

    #[test]
    fn physical_range_detection() {
        let b = ElementBounds::from(&Element::axis(8, 0, 100).with_physical(-50.0, 50.0));
        assert!(b.has_physical_range());
        let b = ElementBounds::from(&Element::axis(8, 0, 100).with_physical(0.0, 10.0));
        assert!(b.has_physical_range());
    }
}
