//! Property-based tests for decoding and scaling: totality, bounds and dead-zone behaviour.

use hidvalue::{
    Calibration, Element, ElementTable, ManualClock, SampleFormat, Value, ValueContext,
};
use proptest::prelude::*;

fn value_for(element: Element, raw: i64) -> Value {
    let mut table = ElementTable::new();
    let h = table.insert(element);
    let clock = ManualClock::default();
    let ctx = ValueContext::new(&table, &clock);
    match Value::with_integer(&ctx, h, raw) {
        Ok(v) => v,
        Err(e) => panic!("with_integer failed: {e}"),
    }
}

/// Ordered pair `lo <= hi` inside a 16-bit signed range.
fn ordered_pair() -> impl Strategy<Value = (i64, i64)> {
    (-32768i64..=32767, -32768i64..=32767).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn calibrated_is_always_bounded_and_finite(
        (lmin, lmax) in ordered_pair(),
        sat in proptest::option::of(ordered_pair()),
        dz in proptest::option::of(ordered_pair()),
        step in proptest::option::of(0.001f64..0.5),
        raw in -70_000i64..70_000,
    ) {
        let mut cal = Calibration::default();
        if let Some((lo, hi)) = sat {
            cal = cal.with_saturation(lo, hi);
        }
        if let Some((lo, hi)) = dz {
            cal = cal.with_dead_zone(lo, hi);
        }
        cal.granularity = step;

        let v = value_for(Element::axis(16, lmin, lmax).with_calibration(cal), raw);
        let out = v.scaled_calibrated_value();
        prop_assert!(out.is_finite(), "output must be finite, got {}", out);
        prop_assert!((-1.0..=1.0).contains(&out), "output {} out of [-1, 1]", out);
    }

    #[test]
    fn dead_zone_is_exact_zero(
        (dz_lo, dz_hi) in ordered_pair(),
        offset in 0i64..=1000,
    ) {
        let raw = dz_lo + offset.min(dz_hi - dz_lo);
        let el = Element::axis(16, -32768, 32767)
            .with_calibration(Calibration::default().with_dead_zone(dz_lo, dz_hi));
        let out = value_for(el, raw).scaled_calibrated_value();
        prop_assert_eq!(out.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn saturation_is_exact(
        (sat_lo, sat_hi) in ordered_pair(),
        beyond in 0i64..10_000,
    ) {
        let el = Element::axis(16, -32768, 32767)
            .with_calibration(Calibration::default().with_saturation(sat_lo, sat_hi));
        prop_assert_eq!(value_for(el.clone(), sat_lo - beyond).scaled_calibrated_value(), -1.0);
        if sat_lo != sat_hi {
            prop_assert_eq!(value_for(el, sat_hi + beyond).scaled_calibrated_value(), 1.0);
        }
    }

    #[test]
    fn calibrated_is_monotonic_without_dead_zone(
        (lmin, lmax) in ordered_pair(),
        a in -40_000i64..40_000,
        b in -40_000i64..40_000,
    ) {
        let (lo, hi) = (a.min(b), a.max(b));
        let el = Element::axis(16, lmin, lmax);
        let out_lo = value_for(el.clone(), lo).scaled_calibrated_value();
        let out_hi = value_for(el, hi).scaled_calibrated_value();
        prop_assert!(out_lo <= out_hi, "{} -> {}, {} -> {}", lo, out_lo, hi, out_hi);
    }

    #[test]
    fn physical_is_finite_and_hits_endpoints(
        (lmin, lmax) in ordered_pair(),
        pmin in -1000.0f64..1000.0,
        pspan in 0.5f64..1000.0,
    ) {
        let pmax = pmin + pspan;
        let el = Element::axis(16, lmin, lmax).with_physical(pmin, pmax);
        let at_min = value_for(el.clone(), lmin).scaled_physical_value();
        let at_max = value_for(el, lmax).scaled_physical_value();
        prop_assert!(at_min.is_finite() && at_max.is_finite());
        prop_assert!((at_min - pmin).abs() < 1e-9, "min {} vs {}", at_min, pmin);
        if lmin != lmax {
            prop_assert!((at_max - pmax).abs() < 1e-6, "max {} vs {}", at_max, pmax);
        }
    }

    #[test]
    fn physical_unset_passes_raw_through(raw in any::<i32>()) {
        let el = Element::axis(32, i64::from(i32::MIN), i64::from(i32::MAX));
        prop_assert_eq!(value_for(el, i64::from(raw)).scaled_physical_value(), f64::from(raw));
    }

    #[test]
    fn signed_decode_matches_native(raw in any::<i16>()) {
        prop_assert_eq!(SampleFormat::signed(16).decode(&raw.to_le_bytes()), Ok(i64::from(raw)));
    }

    #[test]
    fn unsigned_decode_matches_native(raw in any::<u32>(), tail in any::<u8>()) {
        let mut bytes = raw.to_le_bytes().to_vec();
        bytes.push(tail);
        prop_assert_eq!(SampleFormat::unsigned(32).decode(&bytes), Ok(i64::from(raw)));
    }
}
