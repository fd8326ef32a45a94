// File: crates/trend-core/src/series.rs
// Summary: Series model: ordered (date, value) points and their extents.
// Notes:
// - Order is insertion order, which the loader takes to be chronological.
//   No dedup and no monotonicity check happen here.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A position on the time axis, stored as a decimal year (`2000.0` is the
/// first instant of 2000). This is also the numeric form regression runs on.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(f64);

impl Date {
    pub const fn from_decimal_year(year: f64) -> Self {
        Self(year)
    }

    pub fn from_naive_date(date: NaiveDate) -> Self {
        Self::from_naive_datetime(date.and_hms_opt(0, 0, 0).unwrap_or_default())
    }

    pub fn from_naive_datetime(dt: NaiveDateTime) -> Self {
        let year = dt.year();
        let days = days_in_year(year) as f64;
        let elapsed_days = dt.ordinal0() as f64 + dt.num_seconds_from_midnight() as f64 / 86_400.0;
        Self(year as f64 + elapsed_days / days)
    }

    /// Auto-typing coercion for a raw `year` cell: bare numbers are years,
    /// otherwise RFC 3339, `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM` are tried.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(year) = s.parse::<f64>() {
            return year.is_finite().then_some(Self(year));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self::from_naive_datetime(dt.naive_utc()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Some(Self::from_naive_datetime(dt));
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(Self::from_naive_date(d));
        }
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .ok()
            .map(Self::from_naive_date)
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl From<f64> for Date {
    fn from(year: f64) -> Self {
        Self(year)
    }
}

fn days_in_year(year: i32) -> i64 {
    match (NaiveDate::from_ymd_opt(year, 1, 1), NaiveDate::from_ymd_opt(year + 1, 1, 1)) {
        (Some(a), Some(b)) => (b - a).num_days(),
        _ => 365,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub date: Date,
    pub value: f64,
}

impl Point {
    pub fn new(date: impl Into<Date>, value: f64) -> Self {
        Self { date: date.into(), value }
    }

    pub fn is_finite(&self) -> bool {
        self.date.is_finite() && self.value.is_finite()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    points: Vec<Point>,
}

impl Series {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build from `(decimal_year, value)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self { points: pairs.into_iter().map(|(d, v)| Point::new(d, v)).collect() }
    }

    pub fn points(&self) -> &[Point] { &self.points }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn first(&self) -> Option<&Point> { self.points.first() }
    pub fn last(&self) -> Option<&Point> { self.points.last() }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// (min, max) over finite dates; `None` when there are none.
    pub fn date_extent(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().map(|p| p.date.as_f64()))
    }

    /// (min, max) over finite values; `None` when there are none.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        extent(self.points.iter().map(|p| p.value))
    }
}

impl FromIterator<Point> for Series {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self { points: iter.into_iter().collect() }
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
