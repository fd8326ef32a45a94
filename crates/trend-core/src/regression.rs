// File: crates/trend-core/src/regression.rs
// Summary: Ordinary least-squares trend of value on date, and its two render endpoints.

use serde::Serialize;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::series::{Point, Series};

/// Fitted line `value = slope * (date - x_mean) + y_mean`.
///
/// Kept in mean-centred form: evaluating near the data does not lose
/// precision to a large intercept when dates are years around 2000.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RegressionLine {
    slope: f64,
    x_mean: f64,
    y_mean: f64,
    r_squared: f64,
}

impl RegressionLine {
    /// Fit over the finite points. Needs at least two distinct dates.
    pub fn fit(points: &[Point]) -> ChartResult<Self> {
        let finite: Vec<(f64, f64)> = points
            .iter()
            .filter(|p| p.is_finite())
            .map(|p| (p.date.as_f64(), p.value))
            .collect();
        if finite.len() < 2 {
            return Err(ChartError::DegenerateData(format!(
                "regression needs at least 2 points, got {}",
                finite.len()
            )));
        }

        let n = finite.len() as f64;
        let x_mean = finite.iter().map(|p| p.0).sum::<f64>() / n;
        let y_mean = finite.iter().map(|p| p.1).sum::<f64>() / n;
        let (mut sxx, mut sxy, mut syy) = (0.0f64, 0.0f64, 0.0f64);
        for &(x, y) in &finite {
            let dx = x - x_mean;
            let dy = y - y_mean;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }
        if sxx == 0.0 {
            return Err(ChartError::DegenerateData("all dates coincide; slope is undefined".to_owned()));
        }

        let slope = sxy / sxx;
        // A flat series is fitted perfectly by a flat line.
        let r_squared = if syy == 0.0 { 1.0 } else { sxy * sxy / (sxx * syy) };
        Ok(Self { slope, x_mean, y_mean, r_squared })
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.y_mean + self.slope * (x - self.x_mean)
    }

    pub fn slope(&self) -> f64 { self.slope }
    pub fn intercept(&self) -> f64 { self.y_mean - self.slope * self.x_mean }
    pub fn r_squared(&self) -> f64 { self.r_squared }
}

/// The fitted line evaluated at the first and last finite dates of the series
/// (series order, not the domain extremes). `None` when no line can be fitted.
pub fn endpoints(series: &Series) -> Option<[Point; 2]> {
    let points = series.points();
    let first = points.iter().find(|p| p.is_finite())?;
    let last = points.iter().rfind(|p| p.is_finite())?;
    match RegressionLine::fit(series.points()) {
        Ok(line) => {
            debug!(slope = line.slope(), r2 = line.r_squared(), "fitted trend line");
            Some([
                Point { date: first.date, value: line.evaluate(first.date.as_f64()) },
                Point { date: last.date, value: line.evaluate(last.date.as_f64()) },
            ])
        }
        Err(err) => {
            debug!(%err, "no trend line");
            None
        }
    }
}
