// File: crates/trend-core/src/scale.rs
// Summary: Time (X) and value (Y) scales derived from series extent and viewport.

use serde::Serialize;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::series::{Date, Series};
use crate::ticks;
use crate::types::{Margins, Viewport};

/// Default tick count requested from each axis.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Half-width used to open up a zero-width domain around its single value.
const DEGENERATE_HALF_SPAN: f64 = 0.5;
/// Relative half-width for values whose float spacing exceeds the absolute one.
const DEGENERATE_RELATIVE_SPAN: f64 = 1e-9;

/// Mapping between a domain and pixel coordinates.
pub trait ScaleTransform {
    type Domain;
    fn apply(&self, v: Self::Domain) -> f64;
    fn invert(&self, px: f64) -> Self::Domain;
}

/// Continuous linear mapping `domain -> range`.
/// Invariant: `domain.0 != domain.1` (degenerate domains are widened on construction).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain: widen(domain), range }
    }

    /// Like `new`, with the domain extended to round tick boundaries.
    pub fn niced(domain: (f64, f64), range: (f64, f64), count: usize) -> Self {
        let (d0, d1) = widen(domain);
        Self { domain: ticks::nice(d0, d1, count), range }
    }

    pub fn domain(&self) -> (f64, f64) { self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks::ticks(self.domain.0, self.domain.1, count)
    }

    /// Tick step for `count` ticks; used to pick label precision.
    pub fn tick_step(&self, count: usize) -> Option<f64> {
        let (lo, hi) = ordered(self.domain);
        ticks::tick_increment(lo, hi, count).map(ticks::Increment::size)
    }
}

impl ScaleTransform for LinearScale {
    type Domain = f64;

    #[inline]
    fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }

    #[inline]
    fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        d0 + (px - r0) / (r1 - r0) * (d1 - d0)
    }
}

/// Horizontal scale over dates (decimal years).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn niced(domain: (Date, Date), range: (f64, f64), count: usize) -> Self {
        Self { linear: LinearScale::niced((domain.0.as_f64(), domain.1.as_f64()), range, count) }
    }

    pub fn domain(&self) -> (Date, Date) {
        let (a, b) = self.linear.domain();
        (Date::from_decimal_year(a), Date::from_decimal_year(b))
    }

    pub fn range(&self) -> (f64, f64) { self.linear.range() }

    pub fn ticks(&self, count: usize) -> Vec<Date> {
        self.linear.ticks(count).into_iter().map(Date::from_decimal_year).collect()
    }

    pub fn as_linear(&self) -> &LinearScale { &self.linear }
}

impl ScaleTransform for TimeScale {
    type Domain = Date;

    #[inline]
    fn apply(&self, d: Date) -> f64 {
        self.linear.apply(d.as_f64())
    }

    #[inline]
    fn invert(&self, px: f64) -> Date {
        Date::from_decimal_year(self.linear.invert(px))
    }
}

/// The scale pair one render pass uses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LinearScale,
}

/// Derive both scales from the series extent and the layout dimensions.
///
/// x: niced date extent onto `[left, width - right]`.
/// y: niced value extent onto `[height - bottom, top]` (pixel y grows downward).
pub fn build_scales(series: &Series, viewport: Viewport, margins: &Margins, tick_count: usize) -> ChartResult<Scales> {
    let viewport = viewport.validate()?;
    let (Some((x0, x1)), Some((y0, y1))) = (series.date_extent(), series.value_extent()) else {
        return Err(ChartError::DegenerateData("series has no finite points to scale".to_owned()));
    };

    let x = TimeScale::niced(
        (Date::from_decimal_year(x0), Date::from_decimal_year(x1)),
        (margins.left, viewport.width - margins.right),
        tick_count,
    );
    let y = LinearScale::niced((y0, y1), (viewport.height - margins.bottom, margins.top), tick_count);
    debug!(x_domain = ?x.as_linear().domain(), y_domain = ?y.domain(), "built scales");
    Ok(Scales { x, y })
}

fn widen(domain: (f64, f64)) -> (f64, f64) {
    let (a, b) = domain;
    if a == b {
        let h = DEGENERATE_HALF_SPAN.max(a.abs() * DEGENERATE_RELATIVE_SPAN);
        (a - h, b + h)
    } else {
        domain
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
