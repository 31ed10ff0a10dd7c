// File: crates/capture-core/src/tag.rs
// Summary: Render an expression at a pixel ratio and embed the image as an <img> data URI.

use std::path::PathBuf;
use std::str::FromStr;

use crate::capture::{capture_artifact, CaptureOptions};
use crate::css;
use crate::device::DeviceChoice;
use crate::encoding;
use crate::error::{CaptureError, Result};
use crate::expr::PlotExpr;
use crate::html::Tag;
use crate::params::DeviceArgs;
use crate::types::RES;

/// Which declared sizes to leave out of the `<img>` style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SuppressSize {
    #[default]
    None,
    X,
    Y,
    XY,
}

impl SuppressSize {
    pub fn suppresses_width(self) -> bool {
        matches!(self, SuppressSize::X | SuppressSize::XY)
    }

    pub fn suppresses_height(self) -> bool {
        matches!(self, SuppressSize::Y | SuppressSize::XY)
    }
}

impl FromStr for SuppressSize {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(SuppressSize::None),
            "x" => Ok(SuppressSize::X),
            "y" => Ok(SuppressSize::Y),
            "xy" => Ok(SuppressSize::XY),
            other => Err(CaptureError::InvalidSuppressSize(other.to_string())),
        }
    }
}

/// Options for [`plot_tag`]. `width`/`height` are display pixels; the image is
/// rendered at `pixel_ratio` times that.
#[derive(Clone, Debug)]
pub struct TagOptions {
    pub device: DeviceChoice,
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
    pub mime_type: String,
    pub device_args: DeviceArgs,
    /// Extra attributes appended after `src`, `style`, `alt`.
    pub attribs: Vec<(String, String)>,
    pub suppress_size: SuppressSize,
    pub temp_dir: Option<PathBuf>,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            device: DeviceChoice::Default,
            width: 400.0,
            height: 400.0,
            pixel_ratio: 2.0,
            mime_type: "image/png".to_string(),
            device_args: DeviceArgs::new(),
            attribs: Vec::new(),
            suppress_size: SuppressSize::None,
            temp_dir: None,
        }
    }
}

impl TagOptions {
    pub fn with_device(mut self, device: impl Into<DeviceChoice>) -> Self {
        self.device = device.into();
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = ratio;
        self
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = mime.into();
        self
    }

    pub fn with_device_args(mut self, args: DeviceArgs) -> Self {
        self.device_args = args;
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribs.push((name.into(), value.into()));
        self
    }

    pub fn with_suppress_size(mut self, suppress: SuppressSize) -> Self {
        self.suppress_size = suppress;
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Capture options for the physical (ratio-scaled) render.
    fn capture_options(&self) -> Result<CaptureOptions> {
        let ratio = self.pixel_ratio;
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(CaptureError::render(anyhow::anyhow!("pixel ratio must be positive, got {ratio}")));
        }
        let physical = |v: f64, axis: &str| -> Result<u32> {
            let px = (v * ratio).round();
            if px.is_finite() && px >= 1.0 && px <= u32::MAX as f64 {
                Ok(px as u32)
            } else {
                Err(CaptureError::render(anyhow::anyhow!("{axis} {v} x ratio {ratio} is not a pixel size")))
            }
        };
        Ok(CaptureOptions {
            output: None,
            device: self.device.clone(),
            width: physical(self.width, "width")?,
            height: physical(self.height, "height")?,
            res: RES * ratio as f32,
            device_args: self.device_args.clone(),
            temp_dir: self.temp_dir.clone(),
        })
    }
}

/// Render `expr` and return an `<img>` tag whose `src` is a base64 data URI.
///
/// The style carries `width`/`height` in CSS pixels unless suppressed. The
/// intermediate temp file is removed before this returns, on every path.
pub fn plot_tag(expr: PlotExpr<'_>, alt: &str, opts: &TagOptions) -> Result<Tag> {
    let width = (!opts.suppress_size.suppresses_width())
        .then(|| css::validate_css_unit(opts.width))
        .transpose()?;
    let height = (!opts.suppress_size.suppresses_height())
        .then(|| css::validate_css_unit(opts.height))
        .transpose()?;

    let capture_opts = opts.capture_options()?;
    let (artifact, device) = capture_artifact(expr, &capture_opts)?;
    // Dropping `artifact` removes the temp file, whether or not encoding succeeds.
    let src = encoding::data_uri_file(artifact.path(), &opts.mime_type)?;
    drop(artifact);
    log::debug!(
        "embedded {}x{} capture from `{}` as {}",
        capture_opts.width,
        capture_opts.height,
        device.name(),
        opts.mime_type
    );

    let mut tag = Tag::new("img").attr("src", src);
    if let Some(style) = css::style([("width", width), ("height", height)]) {
        tag.push_attr("style", style);
    }
    tag.push_attr("alt", alt);
    for (name, value) in &opts.attribs {
        tag.push_attr(name.as_str(), value.as_str());
    }
    Ok(tag)
}
