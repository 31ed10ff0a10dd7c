// File: crates/capture-core/tests/capture.rs
// Purpose: Device validation, parameter filtering, display semantics, and cleanup on error.

use std::path::Path;

use capture_core::backend::raster::RasterSurface;
use capture_core::{
    capture, CaptureError, CaptureOptions, Chart, Device, DeviceArgs, Outcome, ParamSpec, PlotExpr, Series,
    Surface,
};

fn dir_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).expect("read dir").count()
}

fn line_chart() -> Chart {
    let mut chart = Chart::new();
    chart.add_series(Series::line(vec![(0.0, 10.0), (5.0, 80.0), (10.0, 40.0)]));
    chart.autoscale_axes(0.02);
    chart.draw_labels = false;
    chart
}

#[test]
fn unknown_device_fails_before_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let opts = CaptureOptions::default().with_device("quartz").with_temp_dir(dir.path());
    let err = capture(PlotExpr::draw(|_| Ok(())), &opts).unwrap_err();
    assert!(matches!(err, CaptureError::InvalidDevice(_)), "{err}");
    assert_eq!(dir_entries(dir.path()), 0);
}

#[test]
fn undeclared_device_arg_fails_before_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let opts = CaptureOptions::default()
        .with_device("png")
        .with_device_args(DeviceArgs::new().with("quality", 90))
        .with_temp_dir(dir.path());
    let err = capture(PlotExpr::draw(|_| Ok(())), &opts).unwrap_err();
    match err {
        CaptureError::UnsupportedParameter { device, param } => {
            assert_eq!(device, "png");
            assert_eq!(param, "quality");
        }
        other => panic!("expected UnsupportedParameter, got {other}"),
    }
    assert_eq!(dir_entries(dir.path()), 0);
}

#[test]
fn device_args_reach_the_device() {
    let dir = tempfile::tempdir().unwrap();
    let opts = CaptureOptions::default()
        .with_device("png")
        .with_size(8, 8)
        .with_device_args(DeviceArgs::new().with("bg", "#ff0000"))
        .with_temp_dir(dir.path());
    let path = capture(PlotExpr::draw(|_| Ok(())), &opts).unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(4, 4).0, [255, 0, 0, 255]);
}

#[test]
fn filename_only_device_never_sees_size_params() {
    let dir = tempfile::tempdir().unwrap();
    let narrow = Device::new("narrow", ParamSpec::fixed(&["filename"]), |path, args| {
        assert!(args.is_empty(), "unexpected args: {args:?}");
        Ok(Box::new(RasterSurface::open(path, args)?) as Box<dyn Surface>)
    });
    let opts = CaptureOptions::default()
        .with_device(narrow)
        .with_size(1000, 1000)
        .with_res(300.0)
        .with_temp_dir(dir.path());

    let path = capture(PlotExpr::draw(|_| Ok(())), &opts).expect("narrow device capture");
    // The device falls back to its own default size.
    let img = image::open(&path).unwrap();
    assert_eq!((img.width(), img.height()), (480, 480));
}

#[test]
fn expression_error_removes_generated_file() {
    let dir = tempfile::tempdir().unwrap();
    let opts = CaptureOptions::default().with_device("png").with_temp_dir(dir.path());
    let err = capture(PlotExpr::draw(|_| anyhow::bail!("plot exploded")), &opts).unwrap_err();
    assert!(matches!(err, CaptureError::Render(_)));
    assert!(err.to_string().contains("plot exploded"));
    assert_eq!(dir_entries(dir.path()), 0);
}

#[test]
fn expression_error_leaves_caller_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("keep.png");
    std::fs::write(&out, b"original").unwrap();

    let opts = CaptureOptions::default().with_device("png").with_output(&out);
    let err = capture(PlotExpr::draw(|_| anyhow::bail!("plot exploded")), &opts).unwrap_err();
    assert!(matches!(err, CaptureError::Render(_)));
    assert_eq!(std::fs::read(&out).unwrap(), b"original");
}

#[test]
fn visible_value_is_printed_hidden_value_is_not() {
    let dir = tempfile::tempdir().unwrap();
    let opts = CaptureOptions::default().with_device("png").with_temp_dir(dir.path());
    let bg = line_chart().theme.background;

    let shown = capture(PlotExpr::value(line_chart()), &opts).unwrap();
    let px = image::open(&shown).unwrap().to_rgba8().get_pixel(1, 1).0;
    assert_eq!(px, [bg.r, bg.g, bg.b, 255]);

    let hidden = capture(PlotExpr::new(|_| Ok(Outcome::hidden(line_chart()))), &opts).unwrap();
    let px = image::open(&hidden).unwrap().to_rgba8().get_pixel(1, 1).0;
    assert_eq!(px, [255, 255, 255, 255]);
}

#[test]
fn chart_drawn_inside_expression_renders_without_display() {
    let dir = tempfile::tempdir().unwrap();
    let opts = CaptureOptions::default().with_device("png").with_temp_dir(dir.path());
    let chart = line_chart();
    let path = capture(PlotExpr::draw(|s| chart.draw(s)), &opts).unwrap();
    assert!(std::fs::metadata(path).unwrap().len() > 0);
}

#[test]
fn small_canvas_gets_blank_page_but_chart_margins_do_not_fit() {
    let dir = tempfile::tempdir().unwrap();
    let opts = CaptureOptions::default().with_device("png").with_size(200, 50).with_temp_dir(dir.path());

    let blank = capture(PlotExpr::draw(|_| Ok(())), &opts).expect("blank page fits with zero margins");
    std::fs::remove_file(blank).unwrap();

    let err = capture(PlotExpr::value(line_chart()), &opts).unwrap_err();
    assert!(err.to_string().contains("figure margins too large"), "{err}");
    assert_eq!(dir_entries(dir.path()), 0);
}

#[test]
fn huge_resolution_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    let opts = CaptureOptions::default().with_device("png").with_size(10, 10).with_res(1e10).with_temp_dir(dir.path());
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| capture(PlotExpr::value(line_chart()), &opts)));
    let err = result.expect("capture must not panic").unwrap_err();
    assert!(matches!(err, CaptureError::Render(_)), "{err}");
    assert!(err.to_string().contains("figure margins too large"), "{err}");
    assert_eq!(dir_entries(dir.path()), 0);
}
