// File: crates/trend-core/src/ticks.rs
// Summary: Tick step selection, tick generation and "nice" domain rounding.
// Notes:
// - Steps come from {1, 2, 5, 10} x 10^k. Sub-unit steps are kept as an
//   inverse (ticks = i / inverse) so labels like 0.3 stay exact.

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Spacing between adjacent ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Increment {
    /// Ticks are `i * step`.
    Step(f64),
    /// Ticks are `i / inverse`.
    Inverse(f64),
}

impl Increment {
    /// Step size as a plain number.
    pub fn size(self) -> f64 {
        match self {
            Increment::Step(s) => s,
            Increment::Inverse(inv) => 1.0 / inv,
        }
    }

    fn at(self, i: f64) -> f64 {
        match self {
            Increment::Step(s) => i * s,
            Increment::Inverse(inv) => i / inv,
        }
    }
}

struct TickRange {
    i1: f64,
    i2: f64,
    inc: Increment,
}

fn tick_range(start: f64, stop: f64, count: f64) -> Option<TickRange> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 { 10.0 } else if error >= E5 { 5.0 } else if error >= E2 { 2.0 } else { 1.0 };

    let (i1, i2, inc) = if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        let mut i1 = (start * inv).round();
        let mut i2 = (stop * inv).round();
        if i1 / inv < start { i1 += 1.0; }
        if i2 / inv > stop { i2 -= 1.0; }
        (i1, i2, Increment::Inverse(inv))
    } else {
        let s = 10f64.powf(power) * factor;
        let mut i1 = (start / s).round();
        let mut i2 = (stop / s).round();
        if i1 * s < start { i1 += 1.0; }
        if i2 * s > stop { i2 -= 1.0; }
        (i1, i2, Increment::Step(s))
    };

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_range(start, stop, count * 2.0);
    }
    Some(TickRange { i1, i2, inc })
}

/// Tick spacing for roughly `count` ticks over `[start, stop]` (start <= stop).
pub fn tick_increment(start: f64, stop: f64, count: usize) -> Option<Increment> {
    tick_range(start, stop, count as f64).map(|s| s.inc)
}

/// Tick values inside `[start, stop]`, ascending.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let Some(range) = tick_range(lo, hi, count as f64) else { return Vec::new() };
    if range.i2 < range.i1 {
        return Vec::new();
    }
    let n = (range.i2 - range.i1) as usize + 1;
    (0..n).map(|k| range.inc.at(range.i1 + k as f64)).collect()
}

/// Extend `[start, stop]` outward to multiples of the tick step.
/// Repeats until the step stops changing, at most ten rounds.
pub fn nice(start: f64, stop: f64, count: usize) -> (f64, f64) {
    let (mut lo, mut hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let mut prestep: Option<Increment> = None;
    for _ in 0..10 {
        let Some(step) = tick_increment(lo, hi, count) else { break };
        if prestep == Some(step) {
            break;
        }
        match step {
            Increment::Step(s) => {
                lo = (lo / s).floor() * s;
                hi = (hi / s).ceil() * s;
            }
            Increment::Inverse(inv) => {
                lo = (lo * inv).floor() / inv;
                hi = (hi * inv).ceil() / inv;
            }
        }
        prestep = Some(step);
    }
    if start <= stop { (lo, hi) } else { (hi, lo) }
}
