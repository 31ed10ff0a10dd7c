// File: crates/capture-core/src/backend/raster.rs
// Summary: Baseline PNG device on an `image::RgbaImage`; always compiled in.
// Notes:
// - No font engine: `draw_text` is a no-op here.
// - Lines are stamped as square brushes along the segment, no anti-aliasing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, Rgba as Px, RgbaImage};

use crate::device::Device;
use crate::geometry::RectF;
use crate::params::{DeviceArgs, ParamSpec};
use crate::surface::{Page, Stroke, Surface};
use crate::types::Rgba;

pub const NAME: &str = "png";

pub fn device() -> Device {
    Device::new(
        NAME,
        ParamSpec::fixed(&["filename", "width", "height", "res", "bg"]),
        |path, args| Ok(Box::new(RasterSurface::open(path, args)?) as Box<dyn Surface>),
    )
}

pub struct RasterSurface {
    path: PathBuf,
    page: Page,
    img: RgbaImage,
}

impl RasterSurface {
    pub fn open(path: &Path, args: &DeviceArgs) -> Result<Self> {
        let page = Page::from_args(args)?;
        let img = RgbaImage::from_pixel(page.width, page.height, px(page.background));
        Ok(Self { path: path.to_path_buf(), page, img })
    }

    fn blend(&mut self, x: u32, y: u32, c: Rgba) {
        if c.a == 0 {
            return;
        }
        let dst = self.img.get_pixel_mut(x, y);
        if c.a == 255 {
            *dst = px(c);
            return;
        }
        let a = c.a as u32;
        let inv = 255 - a;
        let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv) / 255) as u8;
        let out_a = (a + dst[3] as u32 * inv / 255).min(255) as u8;
        *dst = Px([mix(c.r, dst[0]), mix(c.g, dst[1]), mix(c.b, dst[2]), out_a]);
    }

    fn stamp(&mut self, cx: f32, cy: f32, half: f32, c: Rgba) {
        let rect = RectF::from_ltrb(cx - half, cy - half, cx + half, cy + half);
        if let Some((l, t, r, b)) = rect.clip_to(self.page.width, self.page.height) {
            for y in t..b {
                for x in l..r {
                    self.blend(x, y, c);
                }
            }
        }
    }
}

fn px(c: Rgba) -> Px<u8> {
    Px([c.r, c.g, c.b, c.a])
}

impl Surface for RasterSurface {
    fn page(&self) -> &Page { &self.page }
    fn page_mut(&mut self) -> &mut Page { &mut self.page }

    fn clear(&mut self, color: Rgba) {
        for p in self.img.pixels_mut() {
            *p = px(color);
        }
    }

    fn stroke_polyline(&mut self, points: &[(f32, f32)], stroke: &Stroke) {
        let half = (stroke.width * 0.5).max(0.5);
        for seg in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (seg[0], seg[1]);
            let len = (x1 - x0).hypot(y1 - y0);
            let steps = (len * 2.0).ceil().max(1.0) as usize;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                // Stamps overlap along the segment; only opaque strokes look clean.
                self.stamp(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, half, stroke.color);
            }
        }
    }

    fn fill_rect(&mut self, rect: RectF, color: Rgba) {
        if let Some((l, t, r, b)) = rect.clip_to(self.page.width, self.page.height) {
            for y in t..b {
                for x in l..r {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, _at: (f32, f32), _size: f32, _color: Rgba) {
        log::trace!("png device has no font engine; skipping text {text:?}");
    }

    fn finish(self: Box<Self>) -> Result<()> {
        self.img
            .save_with_format(&self.path, ImageFormat::Png)
            .with_context(|| format!("write PNG {}", self.path.display()))?;
        log::debug!("png device wrote {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_stroke_touch_expected_pixels() {
        let args = DeviceArgs::new().with("width", 20).with("height", 10);
        let mut s = RasterSurface::open(Path::new("unused.png"), &args).unwrap();
        s.fill_rect(RectF::from_ltwh(0.0, 0.0, 5.0, 5.0), Rgba::BLACK);
        assert_eq!(s.img.get_pixel(2, 2), &Px([0, 0, 0, 255]));
        assert_eq!(s.img.get_pixel(7, 2), &Px([255, 255, 255, 255]));

        s.line((10.0, 8.0), (19.0, 8.0), &Stroke::new(Rgba::rgb(255, 0, 0), 2.0));
        assert_eq!(s.img.get_pixel(15, 8), &Px([255, 0, 0, 255]));
    }
}
