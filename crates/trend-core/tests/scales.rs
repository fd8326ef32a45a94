// File: crates/trend-core/tests/scales.rs
// Purpose: Scale builder domains/ranges, degenerate input, idempotency and round-trip.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use trend_core::{
    build_scales, ChartError, Date, LinearScale, ScaleTransform, Series, TimeScale, Viewport, DEFAULT_MARGINS,
};

fn scenario_series() -> Series {
    Series::from_pairs([(2000.0, 1.0), (2010.0, 2.0), (2020.0, 3.0)])
}

#[test]
fn domains_are_niced_and_ranges_follow_margins() {
    let scales = build_scales(&scenario_series(), Viewport::new(500.0, 300.0), &DEFAULT_MARGINS, 10).expect("scales");
    assert_eq!(scales.x.as_linear().domain(), (2000.0, 2020.0));
    assert_eq!(scales.x.range(), (40.0, 450.0));
    assert_eq!(scales.y.domain(), (1.0, 3.0));
    // inverted: larger values sit higher on screen
    assert_eq!(scales.y.range(), (270.0, 10.0));

    assert_eq!(scales.x.apply(Date::from(2000.0)), 40.0);
    assert_eq!(scales.x.apply(Date::from(2020.0)), 450.0);
    assert_eq!(scales.y.apply(1.0), 270.0);
    assert_eq!(scales.y.apply(3.0), 10.0);
}

#[test]
fn ragged_extent_is_extended_outward() {
    let s = Series::from_pairs([(1951.0, -0.13), (1987.0, 0.2), (2019.0, 0.97)]);
    let scales = build_scales(&s, Viewport::new(400.0, 300.0), &DEFAULT_MARGINS, 10).expect("scales");
    assert_eq!(scales.x.as_linear().domain(), (1950.0, 2020.0));
    let (y0, y1) = scales.y.domain();
    assert!(y0 <= -0.13 && y1 >= 0.97);
}

#[test]
fn building_twice_is_identical() {
    let s = scenario_series();
    let vp = Viewport::new(640.0, 480.0);
    let a = build_scales(&s, vp, &DEFAULT_MARGINS, 10).expect("a");
    let b = build_scales(&s, vp, &DEFAULT_MARGINS, 10).expect("b");
    assert_eq!(a, b);
}

#[test]
fn single_point_gets_a_nonzero_domain_containing_it() {
    let s = Series::from_pairs([(2000.0, 1.5)]);
    let scales = build_scales(&s, Viewport::new(400.0, 300.0), &DEFAULT_MARGINS, 10).expect("scales");
    let (x0, x1) = scales.x.as_linear().domain();
    let (y0, y1) = scales.y.domain();
    assert!(x0 < 2000.0 && 2000.0 < x1);
    assert!(y0 < 1.5 && 1.5 < y1);

    let px = scales.x.apply(Date::from(2000.0));
    let py = scales.y.apply(1.5);
    assert!(px.is_finite() && py.is_finite());
    // centred in the plot
    assert_abs_diff_eq!(px, (40.0 + 350.0) / 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(py, (270.0 + 10.0) / 2.0, epsilon = 1e-9);
}

#[test]
fn single_huge_value_still_maps_inside_the_plot() {
    let s = Series::from_pairs([(2000.0, 1.0e17)]);
    let scales = build_scales(&s, Viewport::new(400.0, 300.0), &DEFAULT_MARGINS, 10).expect("scales");
    let (y0, y1) = scales.y.domain();
    assert!(y0 < 1.0e17 && 1.0e17 < y1, "domain {:?}", (y0, y1));

    let py = scales.y.apply(1.0e17);
    assert!(py.is_finite());
    assert!((10.0..=270.0).contains(&py), "py {py}");
}

#[test]
fn zero_width_domain_at_float_edge_maps_finitely() {
    let scale = LinearScale::new((f64::MAX, f64::MAX), (40.0, 350.0));
    let px = scale.apply(f64::MAX);
    assert!(px.is_finite(), "px {px}");
}

#[test]
fn empty_series_is_degenerate() {
    let err = build_scales(&Series::default(), Viewport::new(400.0, 300.0), &DEFAULT_MARGINS, 10).unwrap_err();
    assert!(matches!(err, ChartError::DegenerateData(_)), "got {err:?}");
}

#[test]
fn non_positive_viewport_is_rejected() {
    for vp in [Viewport::new(0.0, 300.0), Viewport::new(400.0, -1.0), Viewport::new(f64::NAN, 10.0)] {
        let err = build_scales(&scenario_series(), vp, &DEFAULT_MARGINS, 10).unwrap_err();
        assert!(matches!(err, ChartError::InvalidViewport { .. }), "got {err:?}");
    }
}

#[test]
fn resize_changes_ranges_only() {
    let s = scenario_series();
    let small = build_scales(&s, Viewport::new(400.0, 300.0), &DEFAULT_MARGINS, 10).expect("small");
    let large = build_scales(&s, Viewport::new(800.0, 600.0), &DEFAULT_MARGINS, 10).expect("large");
    assert_eq!(small.x.domain(), large.x.domain());
    assert_eq!(small.y.domain(), large.y.domain());
    assert_eq!(large.x.range(), (40.0, 750.0));
    assert_eq!(large.y.range(), (570.0, 10.0));
}

#[test]
fn inverted_range_maps_back() {
    let y = LinearScale::new((0.0, 10.0), (300.0, 0.0));
    assert_eq!(y.apply(0.0), 300.0);
    assert_eq!(y.invert(150.0), 5.0);
}

proptest! {
    #[test]
    fn time_scale_round_trips(
        start in 1800.0f64..2100.0,
        span in 0.01f64..500.0,
        t in 0.0f64..1.0,
        width in 100.0f64..4000.0,
    ) {
        let scale = TimeScale::niced((Date::from(start), Date::from(start + span)), (40.0, width - 50.0), 10);
        let (d0, d1) = scale.domain();
        let d = d0.as_f64() + t * (d1.as_f64() - d0.as_f64());
        let back = scale.invert(scale.apply(Date::from(d))).as_f64();
        prop_assert!((back - d).abs() <= 1e-9 * d.abs().max(1.0), "{back} vs {d}");
    }

    #[test]
    fn niced_domain_contains_extent(lo in -1.0e6f64..1.0e6, span in 0.001f64..1.0e4) {
        let scale = LinearScale::niced((lo, lo + span), (0.0, 100.0), 10);
        let (d0, d1) = scale.domain();
        prop_assert!(d0 <= lo && d1 >= lo + span);
        prop_assert!(d1 > d0);
    }
}
