// File: crates/trend-core/src/theme.rs
// Summary: Color type and named theme presets for scene styling.

use serde::{Deserialize, Serialize};

/// 8-bit RGBA color, backend-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const STEELBLUE: Color = Color::rgb(70, 130, 180);
    pub const DEEPPINK: Color = Color::rgb(255, 20, 147);
    pub const LIGHT_GRAY: Color = Color::rgb(0xcc, 0xcc, 0xcc);

    /// `#rrggbb`, alpha is expressed separately through opacity.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0..=1 opacity.
    pub fn opacity(self) -> f64 {
        self.a as f64 / 255.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub text: Color,
    pub tick: Color,
    pub zero_line: Color,
    pub trend: Color,
    pub marker_fill: Color,
    pub marker_stroke: Color,
    /// Opacity applied to marker outlines.
    pub marker_stroke_opacity: f64,
}

impl Theme {
    /// Steelblue markers and a deeppink trend on white.
    pub fn classic() -> Self {
        Self {
            name: "classic",
            background: Color::WHITE,
            text: Color::BLACK,
            tick: Color::BLACK,
            zero_line: Color::LIGHT_GRAY,
            trend: Color::DEEPPINK,
            marker_fill: Color::STEELBLUE,
            marker_stroke: Color::BLACK,
            marker_stroke_opacity: 0.2,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            text: Color::rgb(235, 235, 245),
            tick: Color::rgb(150, 150, 160),
            zero_line: Color::rgb(60, 60, 68),
            trend: Color::rgb(255, 92, 170),
            marker_fill: Color::rgb(64, 160, 255),
            marker_stroke: Color::WHITE,
            marker_stroke_opacity: 0.25,
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast",
            background: Color::BLACK,
            text: Color::WHITE,
            tick: Color::WHITE,
            zero_line: Color::rgb(0x88, 0x88, 0x88),
            trend: Color::rgb(0xff, 0xff, 0x00),
            marker_fill: Color::rgb(0x00, 0xff, 0xff),
            marker_stroke: Color::WHITE,
            marker_stroke_opacity: 0.6,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::classic()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::classic(), Theme::dark(), Theme::high_contrast()]
}

/// Find a theme by its `name`, falling back to classic.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::classic)
}
