// File: crates/capture-core/tests/tag.rs
// Purpose: <img> tag emission: data URI, sizing style, attributes, temp cleanup.

use std::path::Path;

use base64::Engine as _;
use capture_core::{plot_tag, Axis, CaptureError, Chart, Html, PlotExpr, Series, SuppressSize, TagOptions};

fn chart() -> Chart {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("X", 0.0, 4.0);
    chart.y_axis = Axis::new("Y", 0.0, 4.0);
    chart.add_series(Series::line(vec![(0.0, 0.0), (4.0, 4.0)]));
    chart.draw_labels = false;
    chart
}

fn opts(dir: &Path) -> TagOptions {
    TagOptions::default().with_device("png").with_temp_dir(dir)
}

fn payload(src: &str) -> Vec<u8> {
    let b64 = src.strip_prefix("data:image/png;base64,").expect("png data uri");
    base64::engine::general_purpose::STANDARD.decode(b64).expect("valid base64")
}

#[test]
fn tag_embeds_ratio_scaled_png_with_display_size() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path()).with_size(375.0, 275.0).with_pixel_ratio(2.0);
    let tag = plot_tag(PlotExpr::value(chart()), "desc", &o).expect("tag");

    assert_eq!(tag.name(), "img");
    let src = tag.get_attr("src").unwrap();
    assert!(src.starts_with("data:image/png;base64,"));
    assert_eq!(tag.get_attr("style"), Some("width:375px;height:275px;"));
    assert_eq!(tag.get_attr("alt"), Some("desc"));

    let img = image::load_from_memory(&payload(src)).expect("decode embedded png");
    assert_eq!((img.width(), img.height()), (750, 550));
}

#[test]
fn suppress_size_controls_style() {
    let dir = tempfile::tempdir().unwrap();
    let style_for = |s: SuppressSize| {
        let tag = plot_tag(PlotExpr::draw(|_| Ok(())), "x", &opts(dir.path()).with_size(50.0, 40.0).with_suppress_size(s))
            .expect("tag");
        tag.get_attr("style").map(str::to_string)
    };

    assert_eq!(style_for(SuppressSize::None).as_deref(), Some("width:50px;height:40px;"));
    assert_eq!(style_for(SuppressSize::X).as_deref(), Some("height:40px;"));
    assert_eq!(style_for(SuppressSize::Y).as_deref(), Some("width:50px;"));
    assert_eq!(style_for(SuppressSize::XY), None);
}

#[test]
fn invalid_suppress_size_string_is_rejected() {
    let err = "horizontal".parse::<SuppressSize>().unwrap_err();
    assert!(matches!(err, CaptureError::InvalidSuppressSize(ref v) if v == "horizontal"));
}

#[test]
fn temp_file_is_removed_on_success_and_failure() {
    let dir = tempfile::tempdir().unwrap();
    plot_tag(PlotExpr::value(chart()), "ok", &opts(dir.path())).unwrap();
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    let err = plot_tag(PlotExpr::draw(|_| anyhow::bail!("no data")), "fail", &opts(dir.path())).unwrap_err();
    assert!(matches!(err, CaptureError::Render(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn extra_attributes_are_appended_and_escaped_once() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path())
        .with_size(20.0, 20.0)
        .with_attr("id", "plot-1")
        .with_attr("class", "figure")
        .with_attr("class", "wide");
    let tag = plot_tag(PlotExpr::draw(|_| Ok(())), "a \"quoted\" <plot>", &o).unwrap();

    let names: Vec<&str> = tag.attrs().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["src", "style", "alt", "id", "class"]);
    assert_eq!(tag.get_attr("class"), Some("figure wide"));

    let html: Html = tag.into();
    assert!(html.as_str().starts_with("<img src=\"data:image/png;base64,"));
    assert!(html.as_str().contains("alt=\"a &quot;quoted&quot; &lt;plot&gt;\""));
    assert!(!html.as_str().contains("&amp;quot;"));
}

#[test]
fn mime_type_is_carried_into_the_uri() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path()).with_size(10.0, 10.0).with_mime_type("image/x-test");
    let tag = plot_tag(PlotExpr::draw(|_| Ok(())), "m", &o).unwrap();
    assert!(tag.get_attr("src").unwrap().starts_with("data:image/x-test;base64,"));
}

#[test]
fn invalid_width_fails_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path()).with_size(f64::NAN, 10.0);
    let err = plot_tag(PlotExpr::draw(|_| panic!("must not render")), "n", &o).unwrap_err();
    assert!(matches!(err, CaptureError::InvalidCssUnit(_)), "{err}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn unknown_device_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let o = opts(dir.path()).with_device("cairo");
    let err = plot_tag(PlotExpr::draw(|_| Ok(())), "d", &o).unwrap_err();
    assert!(matches!(err, CaptureError::InvalidDevice(_)));
}

#[test]
fn huge_pixel_ratio_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    // 1e-7 css px at ratio 1e8 is a 10x10 render whose scaled margins saturate.
    let o = opts(dir.path()).with_size(1e-7, 1e-7).with_pixel_ratio(1e8);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| plot_tag(PlotExpr::value(chart()), "big", &o)));
    let err = result.expect("plot_tag must not panic").unwrap_err();
    assert!(matches!(err, CaptureError::Render(_)), "{err}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
