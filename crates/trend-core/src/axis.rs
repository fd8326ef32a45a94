// File: crates/trend-core/src/axis.rs
// Summary: Axis model: tick label formats and tick/label element layout.

use crate::scale::{LinearScale, ScaleTransform, TimeScale};
use crate::scene::{Anchor, Role, Scene, Shape, Style};
use crate::theme::Theme;

/// Length of tick marks, outward from the plot.
pub const TICK_SIZE: f64 = 6.0;
/// Gap between tick mark and its label.
pub const TICK_PADDING: f64 = 3.0;
pub const TICK_FONT_SIZE: f64 = 10.0;

/// Tick label formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickFormat {
    /// Fixed-point with the given number of decimals (`.0f` for years).
    Fixed(usize),
    /// Always signed, precision taken from the tick step.
    Signed,
}

impl TickFormat {
    pub fn format(self, v: f64, step: Option<f64>) -> String {
        match self {
            TickFormat::Fixed(decimals) => format!("{:.*}", decimals, v),
            TickFormat::Signed => {
                let decimals = step.map(step_decimals).unwrap_or(0);
                let body = trim_zeros(format!("{:.*}", decimals, v.abs()));
                if v < 0.0 && body != "0" {
                    format!("\u{2212}{body}")
                } else {
                    format!("+{body}")
                }
            }
        }
    }
}

fn step_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

fn trim_zeros(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: Option<String>,
    pub format: TickFormat,
    pub tick_count: usize,
}

impl Axis {
    pub fn new(label: Option<String>, format: TickFormat, tick_count: usize) -> Self {
        Self { label, format, tick_count }
    }

    /// Bottom time axis: year labels, no title.
    pub fn time(tick_count: usize) -> Self {
        Self::new(None, TickFormat::Fixed(0), tick_count)
    }

    /// Left value axis: signed labels under a bold title.
    pub fn value(label: impl Into<String>, tick_count: usize) -> Self {
        Self::new(Some(label.into()), TickFormat::Signed, tick_count)
    }

    /// Ticks and labels along `y = baseline`. The domain line is not drawn.
    pub fn draw_bottom(&self, scene: &mut Scene, scale: &TimeScale, baseline: f64, theme: &Theme) {
        let step = scale.as_linear().tick_step(self.tick_count);
        for tick in scale.ticks(self.tick_count) {
            let x = scale.apply(tick);
            scene.push(
                Role::XTick,
                Shape::Line { x1: x, y1: baseline, x2: x, y2: baseline + TICK_SIZE },
                Style::stroke(theme.tick, 1.0),
            );
            scene.push(
                Role::XTickLabel,
                Shape::Text { x, y: baseline + TICK_SIZE + TICK_PADDING, text: self.format.format(tick.as_f64(), step) },
                Style::text(theme.text, TICK_FONT_SIZE, Anchor::Middle, 0.71),
            );
        }
    }

    /// Ticks and labels along `x = left`, plus the zero line across `plot_width`
    /// when 0 is one of the ticks, plus the bold title at `(left + 5, top)`.
    pub fn draw_left(&self, scene: &mut Scene, scale: &LinearScale, left: f64, top: f64, plot_width: f64, theme: &Theme) {
        let step = scale.tick_step(self.tick_count);
        for tick in scale.ticks(self.tick_count) {
            let y = scale.apply(tick);
            scene.push(
                Role::YTick,
                Shape::Line { x1: left - TICK_SIZE, y1: y, x2: left, y2: y },
                Style::stroke(theme.tick, 1.0),
            );
            if tick == 0.0 {
                scene.push(
                    Role::ZeroLine,
                    Shape::Line { x1: left, y1: y, x2: left + plot_width, y2: y },
                    Style::stroke(theme.zero_line, 1.0),
                );
            }
            scene.push(
                Role::YTickLabel,
                Shape::Text { x: left - TICK_SIZE - TICK_PADDING, y, text: self.format.format(tick, step) },
                Style::text(theme.text, TICK_FONT_SIZE, Anchor::End, 0.32),
            );
        }
        if let Some(label) = &self.label {
            scene.push(
                Role::AxisLabel,
                Shape::Text { x: left + 5.0, y: top, text: label.clone() },
                Style::text(theme.text, TICK_FONT_SIZE, Anchor::Start, 0.32).bold(),
            );
        }
    }
}
