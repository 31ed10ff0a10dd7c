// File: crates/capture-demo/src/main.rs
// Summary: Demo CLI: capture a line chart to a PNG file, or print it as an inline <img> tag.

use anyhow::{Context, Result};
use capture_core::{capture, plot_tag, Axis, CaptureOptions, Chart, Html, PlotExpr, Series, SuppressSize, TagOptions};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::{Path, PathBuf};

/// capture-demo - render plots to files or embeddable markup
#[derive(Parser)]
#[command(name = "capture-demo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a chart into a PNG file and print its path
    Png {
        /// Output file
        out: PathBuf,

        /// Device name (skia, tiny-skia, resvg, png); defaults to the best available
        #[arg(long, value_name = "NAME")]
        device: Option<String>,

        #[arg(long, default_value_t = 400)]
        width: u32,

        #[arg(long, default_value_t = 400)]
        height: u32,

        /// Nominal resolution in pixels per inch
        #[arg(long, default_value_t = 72.0)]
        res: f32,

        /// Two-column x,y CSV with a header row
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Theme preset name
        #[arg(long, value_name = "NAME", default_value = "light")]
        theme: String,
    },
    /// Print an <img> tag with the chart embedded as a data URI
    Tag {
        #[arg(long, default_value = "")]
        alt: String,

        /// Display width in CSS pixels
        #[arg(long, default_value_t = 400.0)]
        width: f64,

        /// Display height in CSS pixels
        #[arg(long, default_value_t = 400.0)]
        height: f64,

        #[arg(long, default_value_t = 2.0)]
        pixel_ratio: f64,

        /// none, x, y or xy
        #[arg(long, default_value = "none")]
        suppress_size: SuppressSize,

        #[arg(long, value_name = "NAME")]
        device: Option<String>,

        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Png { out, device, width, height, res, csv, theme } => {
            let mut chart = build_chart(csv.as_deref())?;
            chart.theme = capture_core::theme::find(&theme);

            let mut opts = CaptureOptions::default().with_output(&out).with_size(width, height).with_res(res);
            if let Some(name) = device {
                opts = opts.with_device(name);
            }
            let path = capture(PlotExpr::value(&chart), &opts)
                .with_context(|| format!("failed to capture chart to '{}'", out.display()))?;
            println!("{}", path.display());
        }
        Commands::Tag { alt, width, height, pixel_ratio, suppress_size, device, csv } => {
            let chart = build_chart(csv.as_deref())?;

            let mut opts = TagOptions::default()
                .with_size(width, height)
                .with_pixel_ratio(pixel_ratio)
                .with_suppress_size(suppress_size);
            if let Some(name) = device {
                opts = opts.with_device(name);
            }
            let tag = plot_tag(PlotExpr::value(&chart), &alt, &opts).context("failed to build <img> tag")?;
            println!("{}", Html::from(tag));
        }
    }
    Ok(())
}

fn build_chart(csv: Option<&Path>) -> Result<Chart> {
    let (labels, data) = match csv {
        Some(path) => load_xy_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?,
        None => (("x".to_string(), "y".to_string()), sample_wave(200)),
    };
    if data.is_empty() {
        anyhow::bail!("no points loaded; expected numeric x,y columns");
    }
    log::info!("plotting {} points", data.len());

    let mut chart = Chart::new();
    chart.add_series(Series::line(data));
    chart.autoscale_axes(0.05);
    chart.x_axis = Axis::new(labels.0, chart.x_axis.min, chart.x_axis.max);
    chart.y_axis = Axis::new(labels.1, chart.y_axis.min, chart.y_axis.max);
    Ok(chart)
}

fn sample_wave(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let x = i as f64 / 10.0;
            (x, x.sin() * 40.0 + 50.0)
        })
        .collect()
}

/// Load the first two numeric columns of a headed CSV; the header names become axis labels.
/// Rows that do not parse are skipped.
fn load_xy_csv(path: &Path) -> Result<((String, String), Vec<(f64, f64)>)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.clone();
    log::debug!("headers: {:?}", headers.iter().collect::<Vec<_>>());
    let label = |i: usize, fallback: &str| {
        headers.get(i).filter(|h| !h.is_empty()).map(str::to_string).unwrap_or_else(|| fallback.to_string())
    };
    let labels = (label(0, "x"), label(1, "y"));

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let parse = |i: usize| rec.get(i).and_then(|s| s.parse::<f64>().ok());
        match (parse(0), parse(1)) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => out.push((x, y)),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("skipped {} rows without numeric x,y", skipped);
    }
    Ok((labels, out))
}

/// Stderr logger; level and per-module filters come from CAPTURE_LOG (default `warn`).
fn logger_builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(Env::new().filter_or("CAPTURE_LOG", "warn"));
    builder.format_timestamp(None);
    builder
}

fn init_logging() {
    logger_builder().init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_defaults_to_warn() {
        if std::env::var_os("CAPTURE_LOG").is_some() {
            return;
        }
        assert_eq!(logger_builder().build().filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn tag_subcommand_parses_suppress_size() {
        let cli = Cli::try_parse_from(["capture-demo", "tag", "--suppress-size", "xy", "--alt", "wave"]).unwrap();
        match cli.command {
            Commands::Tag { suppress_size, alt, .. } => {
                assert_eq!(suppress_size, SuppressSize::XY);
                assert_eq!(alt, "wave");
            }
            _ => panic!("expected tag subcommand"),
        }
        assert!(Cli::try_parse_from(["capture-demo", "tag", "--suppress-size", "both"]).is_err());
    }

    #[test]
    fn csv_headers_become_axis_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xy.csv");
        std::fs::write(&path, "time,temp\n0,1.5\n1,oops\n2,3.0\n").unwrap();
        let chart = build_chart(Some(path.as_path())).unwrap();
        assert_eq!(chart.x_axis.label, "time");
        assert_eq!(chart.y_axis.label, "temp");
        assert_eq!(chart.series[0].data_xy, vec![(0.0, 1.5), (2.0, 3.0)]);
    }
}
