// File: crates/trend-core/src/render.rs
// Summary: Pure renderer from (series, scales, trend endpoints) to a Scene, plus the full pipeline.

use tracing::debug;

use crate::axis::Axis;
use crate::config::ChartConfig;
use crate::error::ChartResult;
use crate::regression;
use crate::scale::{build_scales, ScaleTransform, Scales};
use crate::scene::{Anchor, Role, Scene, Shape, Style};
use crate::series::{Point, Series};
use crate::theme::Theme;
use crate::types::{Fit, Margins, Viewport};

pub const TREND_STROKE_WIDTH: f64 = 1.5;
pub const TREND_DASH: (f64, f64) = (10.0, 10.0);
pub const PLACEHOLDER_FONT_SIZE: f64 = 12.0;
pub const NO_DATA_MESSAGE: &str = "No data";

/// Everything about a render pass that is not data.
#[derive(Clone, Debug)]
pub struct RenderContext {
    pub width: f64,
    pub height: f64,
    pub fit: Fit,
    pub margins: Margins,
    pub theme: Theme,
    pub y_label: String,
    pub tick_count: usize,
    pub marker_radius: f64,
}

impl RenderContext {
    /// Context for laying out `config` inside `viewport`.
    pub fn from_config(config: &ChartConfig, viewport: Viewport) -> Self {
        let layout = config.sizing.layout(viewport);
        Self {
            width: layout.width,
            height: layout.height,
            fit: config.sizing.fit(),
            margins: config.margins,
            theme: config.theme(),
            y_label: config.y_label.clone(),
            tick_count: config.tick_count,
            marker_radius: config.marker_radius,
        }
    }

    pub fn layout(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

/// Draw axes, zero line, trend line and markers, in that paint order.
pub fn render(series: &Series, scales: &Scales, endpoints: Option<&[Point; 2]>, ctx: &RenderContext) -> Scene {
    let mut scene = Scene::new(ctx.width, ctx.height, ctx.fit, ctx.theme.background);
    let m = &ctx.margins;

    Axis::time(ctx.tick_count).draw_bottom(&mut scene, &scales.x, ctx.height - m.bottom, &ctx.theme);
    Axis::value(ctx.y_label.clone(), ctx.tick_count).draw_left(
        &mut scene,
        &scales.y,
        m.left,
        m.top,
        ctx.width - m.right - m.left,
        &ctx.theme,
    );

    if let Some(ends) = endpoints {
        let points = ends.iter().map(|p| (scales.x.apply(p.date), scales.y.apply(p.value))).collect();
        scene.push(
            Role::TrendLine,
            Shape::Polyline { points },
            Style::stroke(ctx.theme.trend, TREND_STROKE_WIDTH)
                .dashed(TREND_DASH.0, TREND_DASH.1)
                .rounded(),
        );
    }

    let marker_style = Style {
        stroke: Some(ctx.theme.marker_stroke),
        stroke_opacity: ctx.theme.marker_stroke_opacity,
        fill: Some(ctx.theme.marker_fill),
        ..Style::default()
    };
    for p in series.points().iter().filter(|p| p.is_finite()) {
        scene.push(
            Role::Marker,
            Shape::Circle { cx: scales.x.apply(p.date), cy: scales.y.apply(p.value), r: ctx.marker_radius },
            marker_style.clone(),
        );
    }
    scene
}

/// Surface shown while there is nothing to plot; `message` names the reason.
pub fn placeholder(ctx: &RenderContext, message: &str) -> Scene {
    let mut scene = Scene::new(ctx.width, ctx.height, ctx.fit, ctx.theme.background);
    scene.push(
        Role::Placeholder,
        Shape::Text { x: ctx.width / 2.0, y: ctx.height / 2.0, text: message.to_owned() },
        Style::text(ctx.theme.text, PLACEHOLDER_FONT_SIZE, Anchor::Middle, 0.32),
    );
    scene
}

/// Full pipeline: scale, regress, draw. An empty series yields the no-data placeholder.
pub fn compose_scene(series: &Series, viewport: Viewport, config: &ChartConfig) -> ChartResult<Scene> {
    let viewport = viewport.validate()?;
    let ctx = RenderContext::from_config(config, viewport);
    if series.is_empty() {
        debug!("empty series; rendering placeholder");
        return Ok(placeholder(&ctx, NO_DATA_MESSAGE));
    }
    let scales = build_scales(series, ctx.layout(), &ctx.margins, ctx.tick_count)?;
    let endpoints = regression::endpoints(series);
    let scene = render(series, &scales, endpoints.as_ref(), &ctx);
    debug!(elements = scene.elements.len(), width = ctx.width, height = ctx.height, "rendered scene");
    Ok(scene)
}
