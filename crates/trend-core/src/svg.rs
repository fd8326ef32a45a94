// File: crates/trend-core/src/svg.rs
// Summary: Serializes a Scene to standalone SVG markup.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::scene::{Anchor, Element, FontWeight, LineCap, LineJoin, Scene, Shape, Style};
use crate::types::Fit;

const FONT_FAMILY: &str = "sans-serif";

pub fn to_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let (w, h) = (scene.width, scene.height);
    match scene.fit {
        Fit::None => {
            let _ = writeln!(
                svg,
                "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>"
            );
        }
        Fit::Contain => {
            let _ = writeln!(
                svg,
                "<svg xmlns='http://www.w3.org/2000/svg' width='100%' height='100%' viewBox='0 0 {w} {h}' preserveAspectRatio='xMidYMid meet'>"
            );
        }
    }
    let _ = writeln!(svg, "  <rect width='{w}' height='{h}' fill='{}'/>", scene.background.to_hex());
    for el in &scene.elements {
        write_element(&mut svg, el);
    }
    svg.push_str("</svg>\n");
    svg
}

pub fn write_svg(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_svg(scene)).with_context(|| format!("writing {}", path.display()))
}

fn write_element(svg: &mut String, el: &Element) {
    let paint = paint_attrs(&el.style);
    match &el.shape {
        Shape::Line { x1, y1, x2, y2 } => {
            let _ = writeln!(svg, "  <line x1='{}' y1='{}' x2='{}' y2='{}'{paint}/>", num(*x1), num(*y1), num(*x2), num(*y2));
        }
        Shape::Polyline { points } => {
            let mut d = String::new();
            for (i, (x, y)) in points.iter().enumerate() {
                let _ = write!(d, "{}{},{}", if i == 0 { "M" } else { "L" }, num(*x), num(*y));
            }
            let _ = writeln!(svg, "  <path d='{d}'{paint}/>");
        }
        Shape::Circle { cx, cy, r } => {
            let _ = writeln!(svg, "  <circle cx='{}' cy='{}' r='{}'{paint}/>", num(*cx), num(*cy), num(*r));
        }
        Shape::Text { x, y, text } => {
            let s = &el.style;
            let anchor = match s.anchor {
                Anchor::Start => "start",
                Anchor::Middle => "middle",
                Anchor::End => "end",
            };
            let weight = match s.font_weight {
                FontWeight::Normal => "",
                FontWeight::Bold => " font-weight='bold'",
            };
            let _ = writeln!(
                svg,
                "  <text x='{}' y='{}' dy='{}em' text-anchor='{anchor}' font-family='{FONT_FAMILY}' font-size='{}'{weight}{paint}>{}</text>",
                num(*x),
                num(*y),
                s.dy_em,
                s.font_size,
                escape_text(text)
            );
        }
    }
}

fn paint_attrs(style: &Style) -> String {
    let mut out = String::new();
    match style.fill {
        Some(c) => {
            let _ = write!(out, " fill='{}'", c.to_hex());
            if c.a < 255 {
                let _ = write!(out, " fill-opacity='{}'", num(c.opacity()));
            }
        }
        None => out.push_str(" fill='none'"),
    }
    if let Some(c) = style.stroke {
        let _ = write!(out, " stroke='{}' stroke-width='{}'", c.to_hex(), num(style.stroke_width));
        let opacity = style.stroke_opacity * c.opacity();
        if opacity < 1.0 {
            let _ = write!(out, " stroke-opacity='{}'", num(opacity));
        }
        if !style.dash.is_empty() {
            let dash = style.dash.iter().map(|d| num(*d)).collect::<Vec<_>>().join(" ");
            let _ = write!(out, " stroke-dasharray='{dash}'");
        }
        if style.cap == LineCap::Round {
            out.push_str(" stroke-linecap='round'");
        }
        if style.join == LineJoin::Round {
            out.push_str(" stroke-linejoin='round'");
        }
    }
    out
}

/// Short, stable number formatting (at most 3 decimals, no trailing zeros).
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_owned() } else { s.to_owned() }
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
