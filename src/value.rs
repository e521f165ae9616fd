//! Timestamped element values.
//!
//! A [`Value`] is an immutable snapshot of one raw sample from an element. It
//! owns its sample bytes, the decoded integer, a capture [`TimeStamp`], and the
//! scaled representations computed from the element's bounds at creation.
//!
//! ## Constructors
//! | Constructor | Buffer |
//! |---|---|
//! | [`Value::with_data`] | copied from any byte container |
//! | [`Value::with_bytes`] | copied from an optional slice and an explicit length |
//! | [`Value::with_bytes_no_copy`] | moved in; the allocation is kept as-is |
//! | [`Value::with_integer`] | synthesized with [`encode_minimal`] |
//!
//! Every constructor either returns a complete value or an error. The element
//! bounds are read exactly once and the timestamp is taken last, after all
//! fallible steps.
//!
//! # Example
//! ```
//! use hidvalue::{Calibration, Element, ElementTable, ManualClock, Value, ValueContext};
//!
//! let mut table = ElementTable::new();
//! let x = table.insert(
//!     Element::axis(8, 0, 100)
//!         .with_physical(-50.0, 50.0)
//!         .with_calibration(Calibration::default().with_dead_zone(45, 55)),
//! );
//! let clock = ManualClock::default();
//! let ctx = ValueContext::new(&table, &clock);
//!
//! let value = Value::with_bytes(&ctx, x, Some(&[50][..]), 1).unwrap();
//! assert_eq!(value.integer_value(), 50);
//! assert_eq!(value.scaled_physical_value(), 0.0);
//! assert_eq!(value.scaled_calibrated_value(), 0.0);
//! ```

use crate::bounds::ElementBounds;
use crate::clock::{Clock, TimeStamp};
use crate::decode::encode_minimal;
use crate::element::Element;
use crate::error::ValueError;
use crate::scale::{self, ScaleType};
use crate::table::{ElementHandle, ElementTable};

/// What values are built against: the element table and the timestamp source.
#[derive(Clone, Copy)]
pub struct ValueContext<'a> {
    elements: &'a ElementTable,
    clock: &'a dyn Clock,
}

impl<'a> ValueContext<'a> {
    pub fn new(elements: &'a ElementTable, clock: &'a dyn Clock) -> Self {
        Self { elements, clock }
    }

    pub fn elements(&self) -> &'a ElementTable {
        self.elements
    }

    fn resolve(&self, handle: ElementHandle) -> Result<&'a Element, ValueError> {
        self.elements
            .get(handle)
            .ok_or(ValueError::UnknownElement(handle))
    }
}

/// Immutable sample of an element at a point in time.
#[derive(Clone, Debug)]
pub struct Value {
    element: ElementHandle,
    bytes: Vec<u8>,
    integer: i64,
    time_stamp: TimeStamp,
    bounds: ElementBounds,
    scaled_physical: f64,
    scaled_calibrated: f64,
    scaled_exponent: f64,
}

impl Value {
    /// Copy the sample out of any byte container.
    pub fn with_data(
        ctx: &ValueContext<'_>,
        element: ElementHandle,
        data: impl AsRef<[u8]>,
    ) -> Result<Self, ValueError> {
        let data = data.as_ref();
        Self::with_bytes(ctx, element, Some(data), data.len())
    }

    /// Copy the first `length` bytes of `bytes`.
    ///
    /// `None` is accepted only with a zero `length`; the result then has an
    /// empty buffer and an integer value of `0`.
    pub fn with_bytes(
        ctx: &ValueContext<'_>,
        element: ElementHandle,
        bytes: Option<&[u8]>,
        length: usize,
    ) -> Result<Self, ValueError> {
        let result = ctx.resolve(element).and_then(|el| {
            let source: &[u8] = match bytes {
                Some(b) => b.get(..length).ok_or(ValueError::LengthOutOfBounds {
                    length,
                    available: b.len(),
                })?,
                None if length == 0 => &[],
                None => return Err(ValueError::NullBuffer { length }),
            };
            let mut owned = Vec::new();
            owned
                .try_reserve_exact(length)
                .map_err(|source| ValueError::Allocation { length, source })?;
            owned.extend_from_slice(source);
            Self::build(ctx, element, el, owned, None)
        });
        log_failure(element, &result);
        result
    }

    /// Take ownership of `buffer` without copying it.
    ///
    /// The vector's allocation becomes the value's storage, so
    /// `value.bytes().as_ptr()` equals the vector's pointer before the call.
    /// Any spare capacity is kept, not shrunk.
    pub fn with_bytes_no_copy(
        ctx: &ValueContext<'_>,
        element: ElementHandle,
        buffer: Vec<u8>,
    ) -> Result<Self, ValueError> {
        let result = ctx
            .resolve(element)
            .and_then(|el| Self::build(ctx, element, el, buffer, None));
        log_failure(element, &result);
        result
    }

    /// Build a value from an integer.
    ///
    /// The integer is stored as given, even if it does not fit the element's
    /// report size. `bytes()` holds its minimal little-endian two's-complement
    /// encoding (one to eight bytes).
    pub fn with_integer(
        ctx: &ValueContext<'_>,
        element: ElementHandle,
        value: i64,
    ) -> Result<Self, ValueError> {
        let result = ctx
            .resolve(element)
            .and_then(|el| Self::build(ctx, element, el, encode_minimal(value), Some(value)));
        log_failure(element, &result);
        result
    }

    fn build(
        ctx: &ValueContext<'_>,
        handle: ElementHandle,
        element: &Element,
        bytes: Vec<u8>,
        integer: Option<i64>,
    ) -> Result<Self, ValueError> {
        let bounds = ElementBounds::from(element);
        let integer = match integer {
            Some(v) => v,
            None => bounds.format.decode(&bytes)?,
        };

        let scaled_physical = scale::physical(integer, &bounds);
        let scaled_calibrated = scale::calibrated(integer, &bounds.calibration);
        let scaled_exponent = scale::exponent(scaled_physical, bounds.unit_exponent);

        let time_stamp = ctx.clock.now();
        tracing::trace!(
            element = %handle,
            len = bytes.len(),
            integer,
            %time_stamp,
            "captured value"
        );

        Ok(Self {
            element: handle,
            bytes,
            integer,
            time_stamp,
            bounds,
            scaled_physical,
            scaled_calibrated,
            scaled_exponent,
        })
    }

    /// Handle of the element that produced this value.
    #[inline]
    pub fn element_handle(&self) -> ElementHandle {
        self.element
    }

    /// Look the producing element up in `table`.
    ///
    /// Fails with [`ValueError::UnknownElement`] once the element was removed.
    pub fn element<'t>(&self, table: &'t ElementTable) -> Result<&'t Element, ValueError> {
        table
            .get(self.element)
            .ok_or(ValueError::UnknownElement(self.element))
    }

    /// Raw sample bytes.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn time_stamp(&self) -> TimeStamp {
        self.time_stamp
    }

    #[inline]
    pub fn integer_value(&self) -> i64 {
        self.integer
    }

    /// Element bounds this value was scaled with.
    #[inline]
    pub fn bounds(&self) -> &ElementBounds {
        &self.bounds
    }

    #[inline]
    pub fn scaled_physical_value(&self) -> f64 {
        self.scaled_physical
    }

    #[inline]
    pub fn scaled_calibrated_value(&self) -> f64 {
        self.scaled_calibrated
    }

    #[inline]
    pub fn scaled_exponent_value(&self) -> f64 {
        self.scaled_exponent
    }

    pub fn scaled_value(&self, kind: ScaleType) -> f64 {
        match kind {
            ScaleType::Physical => self.scaled_physical,
            ScaleType::Calibrated => self.scaled_calibrated,
            ScaleType::Exponent => self.scaled_exponent,
        }
    }
}

fn log_failure(element: ElementHandle, result: &Result<Value, ValueError>) {
    if let Err(err) = result {
        tracing::debug!(element = %element, error = %err, "value construction failed");
    }
}
