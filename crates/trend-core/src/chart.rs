// File: crates/trend-core/src/chart.rs
// Summary: Chart struct bundling a series with its configuration; scene, SVG and PNG output.

use anyhow::Result;

use crate::config::ChartConfig;
use crate::error::ChartResult;
use crate::raster::{self, RasterOptions};
use crate::render::compose_scene;
use crate::scene::Scene;
use crate::series::Series;
use crate::svg;
use crate::types::Viewport;

#[derive(Clone, Debug, Default)]
pub struct Chart {
    pub series: Series,
    pub config: ChartConfig,
}

impl Chart {
    pub fn new(config: ChartConfig) -> Self {
        Self { series: Series::default(), config }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series = series;
        self
    }

    /// Run the pipeline for `viewport`. Recomputed on every call.
    pub fn scene(&self, viewport: Viewport) -> ChartResult<Scene> {
        compose_scene(&self.series, viewport, &self.config)
    }

    pub fn render_to_svg(&self, viewport: Viewport, output_svg_path: impl AsRef<std::path::Path>) -> Result<()> {
        let scene = self.scene(viewport)?;
        svg::write_svg(&scene, output_svg_path)
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        viewport: Viewport,
        opts: &RasterOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let scene = self.scene(viewport)?;
        raster::render_to_png(&scene, opts, output_png_path)
    }

    pub fn render_to_png_bytes(&self, viewport: Viewport, opts: &RasterOptions) -> Result<Vec<u8>> {
        let scene = self.scene(viewport)?;
        raster::render_to_png_bytes(&scene, opts)
    }
}
