//! Element descriptions.
//!
//! An [`Element`] is one logical control on a HID device (an axis, a button,
//! a hat switch). Values never own their element; they read its bounds once
//! through an [`ElementBounds`](crate::bounds::ElementBounds) snapshot.
//!
//! ## Sign convention
//! A report field is treated as signed when `signed` is set explicitly, or
//! otherwise when `logical_min < 0`, following the HID descriptor convention.
//!
//! ## Physical bounds
//! `physical_min == physical_max == 0` means no physical range was declared;
//! physical scaling then reports raw logical units.

use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::decode::SampleFormat;
use crate::error::ElementError;

/// Category of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    #[default]
    Axis,
    Button,
    Hat,
    Other,
}

/// Describes a single element and the bounds its values are scaled through.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Optional human-friendly name (e.g. `"X"`, `"Throttle"`).
    #[serde(default)]
    pub name: Option<String>,

    /// Element category.
    #[serde(default)]
    pub kind: ElementKind,

    /// HID usage page, when known.
    #[serde(default)]
    pub usage_page: Option<u16>,

    /// HID usage within `usage_page`, when known.
    #[serde(default)]
    pub usage: Option<u16>,

    /// Report size of the raw sample in bits.
    pub report_size: u8,

    /// Explicit signedness. `None` derives it from `logical_min`.
    #[serde(default)]
    pub signed: Option<bool>,

    /// Descriptor logical minimum.
    pub logical_min: i64,

    /// Descriptor logical maximum.
    pub logical_max: i64,

    /// Physical minimum (`0.0` together with `physical_max` means unset).
    #[serde(default)]
    pub physical_min: f64,

    /// Physical maximum.
    #[serde(default)]
    pub physical_max: f64,

    /// HID unit exponent (base 10), applied by exponent scaling.
    #[serde(default)]
    pub unit_exponent: i8,

    #[serde(default)]
    pub calibration: Option<Calibration>,
}

impl Element {
    /// An element with the given report size and logical range and nothing else configured.
    pub fn new(kind: ElementKind, report_size: u8, logical_min: i64, logical_max: i64) -> Self {
        Self {
            name: None,
            kind,
            usage_page: None,
            usage: None,
            report_size,
            signed: None,
            logical_min,
            logical_max,
            physical_min: 0.0,
            physical_max: 0.0,
            unit_exponent: 0,
            calibration: None,
        }
    }

    /// Shorthand for an axis element.
    pub fn axis(report_size: u8, logical_min: i64, logical_max: i64) -> Self {
        Self::new(ElementKind::Axis, report_size, logical_min, logical_max)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_usage(mut self, usage_page: u16, usage: u16) -> Self {
        self.usage_page = Some(usage_page);
        self.usage = Some(usage);
        self
    }

    pub fn with_signed(mut self, signed: bool) -> Self {
        self.signed = Some(signed);
        self
    }

    pub fn with_physical(mut self, min: f64, max: f64) -> Self {
        self.physical_min = min;
        self.physical_max = max;
        self
    }

    pub fn with_unit_exponent(mut self, exponent: i8) -> Self {
        self.unit_exponent = exponent;
        self
    }

    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = Some(calibration);
        self
    }

    /// Whether raw samples are two's-complement signed.
    pub fn is_signed(&self) -> bool {
        self.signed.unwrap_or(self.logical_min < 0)
    }

    /// Format used to decode raw sample bytes.
    pub fn sample_format(&self) -> SampleFormat {
        SampleFormat::new(self.report_size, self.is_signed())
    }

    /// Name to show in UIs and logs: the configured name, else one derived from the usage.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match (self.usage_page, self.usage) {
            (Some(page), Some(usage)) => usage_name(page, usage),
            _ => format!("{:?}", self.kind),
        }
    }

    /// Check that the description can produce values.
    ///
    /// Equal logical bounds are accepted; scaling has defined fallbacks for them.
    pub fn validate(&self) -> Result<(), ElementError> {
        self.sample_format().validate()?;

        if self.logical_min > self.logical_max {
            return Err(ElementError::InvertedLogicalRange {
                min: self.logical_min,
                max: self.logical_max,
            });
        }

        if let Some(step) = self.calibration.as_ref().and_then(|c| c.granularity) {
            if !(step.is_finite() && step > 0.0) {
                return Err(ElementError::InvalidGranularity(step));
            }
        }

        Ok(())
    }

    /// True when the logical or effective calibrated range has zero width.
    pub fn has_degenerate_bounds(&self) -> bool {
        if self.logical_min == self.logical_max {
            return true;
        }
        let cal = self.calibration.as_ref();
        let min = cal.and_then(|c| c.min).unwrap_or(self.logical_min);
        let max = cal.and_then(|c| c.max).unwrap_or(self.logical_max);
        min == max
    }
}

/// Friendly names for common usages (X/Y/Z/Rx/Ry/Rz, simulation controls, ...).
pub fn usage_name(usage_page: u16, usage: u16) -> String {
    // Generic Desktop
    if usage_page == 0x01 {
        let s = match usage {
            0x30 => "X",
            0x31 => "Y",
            0x32 => "Z",
            0x33 => "Rx",
            0x34 => "Ry",
            0x35 => "Rz",
            0x36 => "Slider",
            0x37 => "Dial",
            0x38 => "Wheel",
            0x39 => "Hat",
            _ => return format!("GD_{usage:#04x}"),
        };
        return s.to_string();
    }

    // Simulation Controls
    if usage_page == 0x02 {
        let s = match usage {
            0xB0 => "Accelerator",
            0xB1 => "Brake",
            0xB2 => "Clutch",
            0xBA => "Rudder",
            0xBB => "Throttle",
            _ => "Sim",
        };
        return s.to_string();
    }

    // Button page: usages are 1-based button numbers.
    if usage_page == 0x09 {
        return format!("Button{usage}");
    }

    if (usage_page & 0xFF00) == 0xFF00 {
        return "Vendor".into();
    }

    format!("UP_{usage_page:04x}_U_{usage:04x}")
}
