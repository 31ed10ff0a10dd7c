// File: crates/capture-core/src/backend/svg.rs
// Summary: Device that records drawing as an SVG document and rasterizes it with resvg on finish.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;

use crate::device::Device;
use crate::geometry::RectF;
use crate::params::{DeviceArgs, ParamSpec};
use crate::surface::{Page, Stroke, Surface};
use crate::types::Rgba;

pub const NAME: &str = "resvg";

pub fn device() -> Device {
    Device::new(
        NAME,
        ParamSpec::open_ended(&["filename", "width", "height", "res", "bg"]),
        |path, args| Ok(Box::new(SvgSurface::open(path, args)?) as Box<dyn Surface>),
    )
}

pub struct SvgSurface {
    path: PathBuf,
    page: Page,
    body: String,
    has_text: bool,
}

impl SvgSurface {
    pub fn open(path: &Path, args: &DeviceArgs) -> Result<Self> {
        for (name, value) in args.iter() {
            if !matches!(name, "width" | "height" | "res" | "bg") {
                log::debug!("resvg device ignores parameter {name}={value}");
            }
        }
        let page = Page::from_args(args)?;
        let mut s = Self { path: path.to_path_buf(), page, body: String::new(), has_text: false };
        let bg = s.page.background;
        s.clear(bg);
        Ok(s)
    }

    /// The SVG document drawn so far.
    pub fn document(&self) -> String {
        let (w, h) = (self.page.width, self.page.height);
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">{}</svg>",
            self.body
        )
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}

impl Surface for SvgSurface {
    fn page(&self) -> &Page { &self.page }
    fn page_mut(&mut self) -> &mut Page { &mut self.page }

    fn clear(&mut self, c: Rgba) {
        // Everything drawn earlier is hidden by an opaque clear; drop it.
        self.body.clear();
        self.has_text = false;
        let (w, h) = (self.page.width, self.page.height);
        let _ = write!(
            self.body,
            "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{}\" fill-opacity=\"{}\"/>",
            c.to_hex_rgb(),
            c.opacity()
        );
    }

    fn stroke_polyline(&mut self, points: &[(f32, f32)], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        let pts = points.iter().map(|(x, y)| format!("{x},{y}")).collect::<Vec<_>>().join(" ");
        let _ = write!(
            self.body,
            "<polyline points=\"{pts}\" fill=\"none\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"/>",
            stroke.color.to_hex_rgb(),
            stroke.color.opacity(),
            stroke.width
        );
    }

    fn fill_rect(&mut self, rect: RectF, c: Rgba) {
        if rect.is_empty() {
            return;
        }
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" fill-opacity=\"{}\"/>",
            rect.left,
            rect.top,
            rect.width(),
            rect.height(),
            c.to_hex_rgb(),
            c.opacity()
        );
    }

    fn draw_text(&mut self, text: &str, at: (f32, f32), size: f32, c: Rgba) {
        self.has_text = true;
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-size=\"{size}\" font-family=\"sans-serif\" fill=\"{}\" fill-opacity=\"{}\">{}</text>",
            at.0,
            at.1,
            c.to_hex_rgb(),
            c.opacity(),
            escape_text(text)
        );
    }

    fn finish(self: Box<Self>) -> Result<()> {
        let mut options = usvg::Options::default();
        if self.has_text {
            options.fontdb_mut().load_system_fonts();
        }
        let svg = self.document();
        let tree = usvg::Tree::from_str(&svg, &options).context("SVG parse failed")?;

        let mut pixmap = Pixmap::new(self.page.width, self.page.height).context("Pixmap allocation failed")?;
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
        pixmap
            .save_png(&self.path)
            .with_context(|| format!("write PNG {}", self.path.display()))?;
        log::debug!("resvg device wrote {}", self.path.display());
        Ok(())
    }
}
