// File: crates/trend-core/src/scene.rs
// Summary: Backend-agnostic scene description produced by one render pass.
// Notes:
// - Coordinates are absolute scene units; backends apply no transforms
//   besides an optional uniform scale.

use serde::Serialize;

use crate::theme::Color;
use crate::types::Fit;

/// What an element represents in the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    XTick,
    XTickLabel,
    YTick,
    YTickLabel,
    ZeroLine,
    AxisLabel,
    TrendLine,
    Marker,
    Placeholder,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Polyline { points: Vec<(f64, f64)> },
    Circle { cx: f64, cy: f64, r: f64 },
    Text { x: f64, y: f64, text: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    Butt,
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    Miter,
    Round,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Style {
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
    /// On/off dash lengths; empty for a solid stroke.
    pub dash: Vec<f64>,
    pub cap: LineCap,
    pub join: LineJoin,
    pub fill: Option<Color>,
    pub font_size: f64,
    pub font_weight: FontWeight,
    pub anchor: Anchor,
    /// Baseline shift in ems (0.32 centers digits vertically, 0.71 hangs them).
    pub dy_em: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: None,
            stroke_width: 1.0,
            stroke_opacity: 1.0,
            dash: Vec::new(),
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            fill: None,
            font_size: 10.0,
            font_weight: FontWeight::Normal,
            anchor: Anchor::Start,
            dy_em: 0.0,
        }
    }
}

impl Style {
    pub fn stroke(color: Color, width: f64) -> Self {
        Self { stroke: Some(color), stroke_width: width, ..Self::default() }
    }

    pub fn text(color: Color, size: f64, anchor: Anchor, dy_em: f64) -> Self {
        Self { fill: Some(color), font_size: size, anchor, dy_em, ..Self::default() }
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::Bold;
        self
    }

    pub fn dashed(mut self, on: f64, off: f64) -> Self {
        self.dash = vec![on, off];
        self
    }

    pub fn rounded(mut self) -> Self {
        self.cap = LineCap::Round;
        self.join = LineJoin::Round;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Element {
    pub role: Role,
    pub shape: Shape,
    pub style: Style,
}

/// Complete set of visual elements for one render pass, in paint order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub fit: Fit,
    pub background: Color,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(width: f64, height: f64, fit: Fit, background: Color) -> Self {
        Self { width, height, fit, background, elements: Vec::new() }
    }

    pub fn push(&mut self, role: Role, shape: Shape, style: Style) {
        self.elements.push(Element { role, shape, style });
    }

    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &Element> + '_ {
        self.elements.iter().filter(move |e| e.role == role)
    }

    pub fn count(&self, role: Role) -> usize {
        self.by_role(role).count()
    }

    /// True when the scene only carries the no-data / failure placeholder.
    pub fn is_placeholder(&self) -> bool {
        !self.elements.is_empty() && self.elements.iter().all(|e| e.role == Role::Placeholder)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
