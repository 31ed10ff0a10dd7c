// File: crates/capture-core/src/backend/tiny.rs
// Summary: tiny-skia raster device (anti-aliased, pure Rust).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tiny_skia::{Paint, PathBuilder, Pixmap, Transform};

use crate::device::Device;
use crate::geometry::RectF;
use crate::params::{DeviceArgs, ParamSpec};
use crate::surface::{Page, Stroke, Surface};
use crate::types::Rgba;

pub const NAME: &str = "tiny-skia";

pub fn device() -> Device {
    Device::new(
        NAME,
        ParamSpec::fixed(&["filename", "width", "height", "res", "bg"]),
        |path, args| Ok(Box::new(TinySurface::open(path, args)?) as Box<dyn Surface>),
    )
}

pub struct TinySurface {
    path: PathBuf,
    page: Page,
    pixmap: Pixmap,
}

impl TinySurface {
    pub fn open(path: &Path, args: &DeviceArgs) -> Result<Self> {
        let page = Page::from_args(args)?;
        let mut pixmap = Pixmap::new(page.width, page.height).context("Pixmap allocation failed")?;
        pixmap.fill(color(page.background));
        Ok(Self { path: path.to_path_buf(), page, pixmap })
    }
}

fn color(c: Rgba) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn paint(c: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(c.r, c.g, c.b, c.a);
    paint.anti_alias = true;
    paint
}

impl Surface for TinySurface {
    fn page(&self) -> &Page { &self.page }
    fn page_mut(&mut self) -> &mut Page { &mut self.page }

    fn clear(&mut self, c: Rgba) {
        self.pixmap.fill(color(c));
    }

    fn stroke_polyline(&mut self, points: &[(f32, f32)], stroke: &Stroke) {
        let Some((&(x0, y0), rest)) = points.split_first() else { return };
        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        for &(x, y) in rest {
            pb.line_to(x, y);
        }
        // A single point or zero-length path yields None.
        let Some(path) = pb.finish() else { return };
        let style = tiny_skia::Stroke { width: stroke.width, ..Default::default() };
        self.pixmap.stroke_path(&path, &paint(stroke.color), &style, Transform::identity(), None);
    }

    fn fill_rect(&mut self, rect: RectF, c: Rgba) {
        if let Some(r) = tiny_skia::Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom) {
            self.pixmap.fill_rect(r, &paint(c), Transform::identity(), None);
        }
    }

    fn draw_text(&mut self, text: &str, _at: (f32, f32), _size: f32, _color: Rgba) {
        log::trace!("tiny-skia device has no font engine; skipping text {text:?}");
    }

    fn finish(self: Box<Self>) -> Result<()> {
        self.pixmap
            .save_png(&self.path)
            .with_context(|| format!("write PNG {}", self.path.display()))?;
        log::debug!("tiny-skia device wrote {}", self.path.display());
        Ok(())
    }
}
