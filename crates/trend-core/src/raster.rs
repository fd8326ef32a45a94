// File: crates/trend-core/src/raster.rs
// Summary: Headless Scene rasterization using Skia CPU raster surfaces (PNG / RGBA8 output).

use anyhow::{Context, Result};
use skia_safe as skia;

use crate::scene::{Anchor, Element, FontWeight, LineCap, LineJoin, Scene, Shape, Style};
use crate::theme::Color;

pub struct RasterOptions {
    /// Device pixels per scene unit.
    pub scale: f32,
    /// Skip text; keeps pixel snapshots independent of installed fonts.
    pub draw_labels: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { scale: 1.0, draw_labels: true }
    }
}

/// Render the scene to a PNG at `output_png_path` using a CPU raster surface.
pub fn render_to_png(scene: &Scene, opts: &RasterOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
    let data = render_to_png_bytes(scene, opts)?;
    let path = output_png_path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn render_to_png_bytes(scene: &Scene, opts: &RasterOptions) -> Result<Vec<u8>> {
    let mut surface = draw(scene, opts)?;
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// Unpremultiplied RGBA8 pixels as `(pixels, width, height, row_bytes)`.
pub fn render_to_rgba8(scene: &Scene, opts: &RasterOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
    let mut surface = draw(scene, opts)?;
    let (w, h) = (surface.width(), surface.height());
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        anyhow::bail!("reading back {w}x{h} surface failed");
    }
    Ok((pixels, w, h, row_bytes))
}

fn draw(scene: &Scene, opts: &RasterOptions) -> Result<skia::Surface> {
    let scale = opts.scale.max(0.01);
    let w = ((scene.width as f32) * scale).ceil().max(1.0) as i32;
    let h = ((scene.height as f32) * scale).ceil().max(1.0) as i32;
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(to_skia(scene.background, 1.0));
    canvas.scale((scale, scale));

    for el in &scene.elements {
        if matches!(el.shape, Shape::Text { .. }) && !opts.draw_labels {
            continue;
        }
        draw_element(canvas, el);
    }
    Ok(surface)
}

// ---- helpers ----------------------------------------------------------------

fn draw_element(canvas: &skia::Canvas, el: &Element) {
    let style = &el.style;
    match &el.shape {
        Shape::Line { x1, y1, x2, y2 } => {
            if let Some(stroke) = stroke_paint(style) {
                canvas.draw_line((*x1 as f32, *y1 as f32), (*x2 as f32, *y2 as f32), &stroke);
            }
        }
        Shape::Polyline { points } => {
            let Some((first, rest)) = points.split_first() else { return };
            let mut path = skia::Path::new();
            path.move_to((first.0 as f32, first.1 as f32));
            for &(x, y) in rest {
                path.line_to((x as f32, y as f32));
            }
            if let Some(stroke) = stroke_paint(style) {
                canvas.draw_path(&path, &stroke);
            }
        }
        Shape::Circle { cx, cy, r } => {
            let center = (*cx as f32, *cy as f32);
            if let Some(fill) = style.fill {
                let mut paint = skia::Paint::default();
                paint.set_anti_alias(true);
                paint.set_style(skia::paint::Style::Fill);
                paint.set_color(to_skia(fill, 1.0));
                canvas.draw_circle(center, *r as f32, &paint);
            }
            if let Some(stroke) = stroke_paint(style) {
                canvas.draw_circle(center, *r as f32, &stroke);
            }
        }
        Shape::Text { x, y, text } => {
            let Some(fill) = style.fill else { return };
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_color(to_skia(fill, 1.0));
            let mut font = skia::Font::default();
            font.set_size(style.font_size as f32);
            if style.font_weight == FontWeight::Bold {
                font.set_embolden(true);
            }
            let (advance, _) = font.measure_str(text, Some(&paint));
            let left = match style.anchor {
                Anchor::Start => *x as f32,
                Anchor::Middle => *x as f32 - advance / 2.0,
                Anchor::End => *x as f32 - advance,
            };
            let baseline = (*y + style.dy_em * style.font_size) as f32;
            canvas.draw_str(text, (left, baseline), &font, &paint);
        }
    }
}

fn stroke_paint(style: &Style) -> Option<skia::Paint> {
    let color = style.stroke?;
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(style.stroke_width as f32);
    paint.set_color(to_skia(color, style.stroke_opacity));
    paint.set_stroke_cap(match style.cap {
        LineCap::Butt => skia::paint::Cap::Butt,
        LineCap::Round => skia::paint::Cap::Round,
    });
    paint.set_stroke_join(match style.join {
        LineJoin::Miter => skia::paint::Join::Miter,
        LineJoin::Round => skia::paint::Join::Round,
    });
    if !style.dash.is_empty() {
        let intervals = style.dash.iter().map(|d| *d as f32).collect::<Vec<_>>();
        paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
    }
    Some(paint)
}

fn to_skia(c: Color, opacity: f64) -> skia::Color {
    let a = (c.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
    skia::Color::from_argb(a, c.r, c.g, c.b)
}
