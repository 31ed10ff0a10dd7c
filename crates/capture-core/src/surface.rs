// File: crates/capture-core/src/surface.rs
// Summary: Drawing surface trait shared by every backend, plus common page state.
//
// A surface is what a device returns when opened: a writable canvas bound to an
// output file. It only touches the file system in `finish`.

use anyhow::Result;

use crate::geometry::RectF;
use crate::params::DeviceArgs;
use crate::types::{Insets, Rgba, DEVICE_FALLBACK_SIZE, RES};

/// Stroke style for lines and polylines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f32) -> Self {
        Self { color, width }
    }
}

/// Page bookkeeping every backend carries: size, resolution, margins, background.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub width: u32,
    pub height: u32,
    pub res: f32,
    pub margins: Insets,
    pub background: Rgba,
    /// Pages started so far; 0 until the first `new_page`.
    pub number: u32,
}

impl Page {
    /// Read `width`, `height`, `res`, and `bg` from device arguments.
    pub fn from_args(args: &DeviceArgs) -> Result<Self> {
        let width = args.pixels("width", DEVICE_FALLBACK_SIZE)?;
        let height = args.pixels("height", DEVICE_FALLBACK_SIZE)?;
        let res = match args.f64("res")? {
            None => RES,
            Some(r) if r.is_finite() && r > 0.0 => r as f32,
            Some(r) => anyhow::bail!("parameter `res` must be positive, got {r}"),
        };
        let background = match args.get("bg") {
            None => Rgba::WHITE,
            Some(v) => {
                let spec = v
                    .as_str()
                    .ok_or_else(|| anyhow::anyhow!("parameter `bg` must be a color string"))?;
                Rgba::parse(spec).ok_or_else(|| anyhow::anyhow!("unrecognised color `{spec}`"))?
            }
        };
        Ok(Self::new(width, height, res, background))
    }

    pub fn new(width: u32, height: u32, res: f32, background: Rgba) -> Self {
        let scale = res / RES;
        Self { width, height, res, margins: Insets::default().scaled(scale), background, number: 0 }
    }

    /// Pixels per point (1.0 at 72 dpi).
    pub fn scale(&self) -> f32 {
        self.res / RES
    }

    /// Area inside the margins; errors when the margins leave nothing to draw on.
    pub fn plot_region(&self) -> Result<RectF> {
        let m = self.margins;
        if m.hsum() >= self.width || m.vsum() >= self.height {
            anyhow::bail!(
                "figure margins too large ({}x{} page, margins {:?})",
                self.width,
                self.height,
                m
            );
        }
        Ok(RectF::from_ltrb(
            m.left as f32,
            m.top as f32,
            (self.width - m.right) as f32,
            (self.height - m.bottom) as f32,
        ))
    }

    /// Validate margins against the page and advance the page counter.
    pub fn advance(&mut self) -> Result<()> {
        self.plot_region()?;
        self.number += 1;
        Ok(())
    }
}

/// An open drawing surface bound to an output file.
///
/// Coordinates are surface pixels, origin top-left, y growing downward.
pub trait Surface {
    fn page(&self) -> &Page;
    fn page_mut(&mut self) -> &mut Page;

    /// Fill the entire surface with `color`.
    fn clear(&mut self, color: Rgba);

    fn stroke_polyline(&mut self, points: &[(f32, f32)], stroke: &Stroke);

    fn fill_rect(&mut self, rect: RectF, color: Rgba);

    /// Draw `text` with its baseline starting at `at`. Backends without a font
    /// engine may skip text.
    fn draw_text(&mut self, text: &str, at: (f32, f32), size: f32, color: Rgba);

    /// Encode the page and write the output file. Consumes the surface.
    fn finish(self: Box<Self>) -> Result<()>;

    /// Release the surface without writing anything.
    fn discard(self: Box<Self>) {}

    // ---- provided ----------------------------------------------------------

    fn size(&self) -> (u32, u32) {
        (self.page().width, self.page().height)
    }

    fn resolution(&self) -> f32 {
        self.page().res
    }

    /// Pixels per point; line widths and margins are multiplied by this.
    fn scale(&self) -> f32 {
        self.page().scale()
    }

    fn margins(&self) -> Insets {
        self.page().margins
    }

    fn set_margins(&mut self, margins: Insets) {
        self.page_mut().margins = margins;
    }

    fn plot_region(&self) -> Result<RectF> {
        self.page().plot_region()
    }

    /// Start a fresh page: check the margins fit, then paint the background.
    fn new_page(&mut self) -> Result<()> {
        self.page_mut().advance()?;
        let bg = self.page().background;
        self.clear(bg);
        Ok(())
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: &Stroke) {
        self.stroke_polyline(&[from, to], stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_reads_device_args() {
        let args = DeviceArgs::new().with("width", 800).with("height", 600).with("res", 144.0).with("bg", "#000000");
        let page = Page::from_args(&args).unwrap();
        assert_eq!((page.width, page.height), (800, 600));
        assert_eq!(page.scale(), 2.0);
        assert_eq!(page.background, Rgba::BLACK);
        assert_eq!(page.margins, Insets::default().scaled(2.0));
    }

    #[test]
    fn page_defaults_without_args() {
        let page = Page::from_args(&DeviceArgs::new()).unwrap();
        assert_eq!((page.width, page.height, page.res), (480, 480, 72.0));
        assert_eq!(page.background, Rgba::WHITE);
    }

    #[test]
    fn small_page_rejects_default_margins() {
        let mut page = Page::new(200, 50, 72.0, Rgba::WHITE);
        let err = page.advance().unwrap_err();
        assert!(err.to_string().contains("figure margins too large"));
        page.margins = Insets::ZERO;
        page.advance().unwrap();
        assert_eq!(page.number, 1);
    }
}
