//! hidvalue: timestamped values of HID elements.
//!
//! Wraps raw samples read from a HID element (axis, button, dial) in an
//! immutable [`Value`], decodes them to integers and scales them through the
//! element's physical bounds and calibration.
//!
//! Device discovery and report capture live elsewhere; this crate starts at
//! "here are the bytes for this element".

pub mod bounds;
pub mod calibration;
pub mod clock;
pub mod decode;
pub mod element;
pub mod error;
pub mod scale;
pub mod table;
pub mod value;

pub use bounds::*;
pub use calibration::*;
pub use clock::*;
pub use decode::*;
pub use element::*;
pub use error::*;
pub use scale::ScaleType;
pub use table::*;
pub use value::*;
