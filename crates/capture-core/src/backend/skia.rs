// File: crates/capture-core/src/backend/skia.rs
// Summary: Skia CPU raster device; encodes the surface snapshot to PNG on finish.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use skia_safe as skia;

use crate::device::Device;
use crate::geometry::RectF;
use crate::params::{DeviceArgs, ParamSpec};
use crate::surface::{Page, Stroke, Surface};
use crate::types::Rgba;

pub const NAME: &str = "skia";

pub fn device() -> Device {
    Device::new(
        NAME,
        ParamSpec::open_ended(&["filename", "width", "height", "res", "bg"]),
        |path, args| Ok(Box::new(SkiaSurface::open(path, args)?) as Box<dyn Surface>),
    )
}

pub struct SkiaSurface {
    path: PathBuf,
    page: Page,
    surface: skia::Surface,
}

impl SkiaSurface {
    pub fn open(path: &Path, args: &DeviceArgs) -> Result<Self> {
        for (name, value) in args.iter() {
            if !matches!(name, "width" | "height" | "res" | "bg") {
                log::debug!("skia device ignores parameter {name}={value}");
            }
        }
        let page = Page::from_args(args)?;
        let mut surface = skia::surfaces::raster_n32_premul((page.width as i32, page.height as i32))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        surface.canvas().clear(color(page.background));
        Ok(Self { path: path.to_path_buf(), page, surface })
    }
}

fn color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

impl Surface for SkiaSurface {
    fn page(&self) -> &Page { &self.page }
    fn page_mut(&mut self) -> &mut Page { &mut self.page }

    fn clear(&mut self, c: Rgba) {
        self.surface.canvas().clear(color(c));
    }

    fn stroke_polyline(&mut self, points: &[(f32, f32)], stroke: &Stroke) {
        let Some((&first, rest)) = points.split_first() else { return };
        if rest.is_empty() {
            return;
        }
        let mut path = skia::Path::new();
        path.move_to(first);
        for &p in rest {
            path.line_to(p);
        }

        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(stroke.width);
        paint.set_color(color(stroke.color));

        self.surface.canvas().draw_path(&path, &paint);
    }

    fn fill_rect(&mut self, rect: RectF, c: Rgba) {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(color(c));
        let r = skia::Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom);
        self.surface.canvas().draw_rect(r, &paint);
    }

    fn draw_text(&mut self, text: &str, at: (f32, f32), size: f32, c: Rgba) {
        let mut paint = skia::Paint::default();
        paint.set_color(color(c));
        let mut font = skia::Font::default();
        font.set_size(size);
        self.surface.canvas().draw_str(text, at, &font, &paint);
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        // Snapshot and write PNG
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        std::fs::write(&self.path, data.as_bytes())
            .with_context(|| format!("write PNG {}", self.path.display()))?;
        log::debug!("skia device wrote {}", self.path.display());
        Ok(())
    }
}
