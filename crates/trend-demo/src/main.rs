// File: crates/trend-demo/src/main.rs
// Summary: Demo mounts the trend chart, loads a CSV (URL or local path) and writes SVG, PNG and scene JSON.
// Usage: trend-demo [--config FILE] [--size WxH] [--fit] [SOURCE]

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use trend_component::{ChartHandle, CsvSource};
use trend_core::raster::{self, RasterOptions};
use trend_core::{svg, telemetry, ChartConfig, SizingMode, Viewport};

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    size: Option<Viewport>,
    fit: bool,
    source: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = telemetry::init_default_tracing();
    let args = parse_args(std::env::args().skip(1))?;

    let mut config = match &args.config {
        Some(path) => ChartConfig::from_json_file(path)
            .with_context(|| format!("failed to load config '{}'", path.display()))?,
        None => ChartConfig::default(),
    };
    if args.fit {
        config.sizing = SizingMode::FitToViewport;
    }
    let viewport = args.size.unwrap_or_default();
    let location = args.source.clone().unwrap_or_else(|| config.source_url.clone());
    println!("Using source: {location}");

    let chart = ChartHandle::mount(config, viewport)?;
    chart.subscribe(|scene| {
        info!(elements = scene.elements.len(), placeholder = scene.is_placeholder(), "scene updated");
    });

    let load = chart.load(&CsvSource::from_location(&location)).await;
    if let Err(err) = &load {
        warn!(%err, "load failed; writing placeholder scene");
    }
    let state = chart.state();
    if let Some(series) = state.series() {
        println!("Loaded {} points", series.len());
    }

    let scene = chart.scene();
    let base = out_base(&location);

    let out_svg = base.with_extension("svg");
    svg::write_svg(&scene, &out_svg)?;
    println!("Wrote {}", out_svg.display());

    let out_png = base.with_extension("png");
    raster::render_to_png(&scene, &RasterOptions { scale: 2.0, ..RasterOptions::default() }, &out_png)?;
    println!("Wrote {}", out_png.display());

    let out_json = base.with_extension("json");
    let json = serde_json::to_string_pretty(&scene).context("serializing scene")?;
    std::fs::write(&out_json, json).with_context(|| format!("writing {}", out_json.display()))?;
    println!("Wrote {}", out_json.display());

    chart.unmount();
    load.map(|_| ()).with_context(|| format!("failed to load '{location}'"))
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                let path = it.next().context("--config needs a file")?;
                args.config = Some(PathBuf::from(path));
            }
            "--size" => {
                let raw = it.next().context("--size needs WxH")?;
                args.size = Some(parse_size(&raw)?);
            }
            "--fit" => args.fit = true,
            flag if flag.starts_with("--") => anyhow::bail!("unknown flag: {flag}"),
            _ => {
                if args.source.replace(arg).is_some() {
                    anyhow::bail!("only one SOURCE may be given");
                }
            }
        }
    }
    Ok(args)
}

fn parse_size(raw: &str) -> Result<Viewport> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .with_context(|| format!("size '{raw}' is not WxH"))?;
    let w: f64 = w.trim().parse().with_context(|| format!("bad width in '{raw}'"))?;
    let h: f64 = h.trim().parse().with_context(|| format!("bad height in '{raw}'"))?;
    Ok(Viewport::new(w, h).validate()?)
}

/// Output base like target/out/trend_<stem>, extension added per format.
fn out_base(location: &str) -> PathBuf {
    let stem = location
        .rsplit(['/', '\\'])
        .next()
        .map(Path::new)
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("chart");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("trend_{stem}"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_all_flags() {
        let a = args(&["--config", "c.json", "--size", "800x600", "--fit", "data.csv"]).expect("args");
        assert_eq!(a.config, Some(PathBuf::from("c.json")));
        assert_eq!(a.size, Some(Viewport::new(800.0, 600.0)));
        assert!(a.fit);
        assert_eq!(a.source.as_deref(), Some("data.csv"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(args(&["--size", "800"]).is_err());
        assert!(args(&["--size", "0x600"]).is_err());
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["a.csv", "b.csv"]).is_err());
        assert!(args(&["--config"]).is_err());
    }

    #[test]
    fn output_names_follow_source_stem() {
        assert!(out_base("https://host/raw/abc/data700.csv").ends_with("trend_data700"));
        assert!(out_base("local/series.csv").ends_with("trend_series"));
    }
}
