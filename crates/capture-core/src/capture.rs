// File: crates/capture-core/src/capture.rs
// Summary: Capture a plotting expression to an image file with scoped device release.
//
// Each call owns its surface for its duration. Surfaces are not shared across
// threads; callers that want parallel captures run independent calls.

use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::device::{Device, DeviceChoice};
use crate::error::{CaptureError, Result};
use crate::expr::PlotExpr;
use crate::params::DeviceArgs;
use crate::surface::Surface;
use crate::types::{Insets, HEIGHT, RES, WIDTH};

/// Options for [`capture`]. Defaults: 400x400 px at 72 dpi, default device,
/// temp-file output.
#[derive(Clone, Debug)]
pub struct CaptureOptions {
    /// Output file; `None` writes to a fresh `.png` temp file.
    pub output: Option<PathBuf>,
    pub device: DeviceChoice,
    pub width: u32,
    pub height: u32,
    pub res: f32,
    /// Extra arguments passed through to the device.
    pub device_args: DeviceArgs,
    /// Directory for generated temp files; `None` uses the system temp dir.
    pub temp_dir: Option<PathBuf>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            output: None,
            device: DeviceChoice::Default,
            width: WIDTH,
            height: HEIGHT,
            res: RES,
            device_args: DeviceArgs::new(),
            temp_dir: None,
        }
    }
}

impl CaptureOptions {
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn with_device(mut self, device: impl Into<DeviceChoice>) -> Self {
        self.device = device.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_res(mut self, res: f32) -> Self {
        self.res = res;
        self
    }

    pub fn with_device_args(mut self, args: DeviceArgs) -> Self {
        self.device_args = args;
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }
}

/// Output target of a capture. Temp files are deleted on drop unless kept;
/// caller paths are never deleted.
pub(crate) enum Artifact {
    Temp(TempPath),
    Caller(PathBuf),
}

impl Artifact {
    fn temp(dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("plot").suffix(".png");
        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(Artifact::Temp(file.into_temp_path()))
    }

    pub(crate) fn path(&self) -> &Path {
        match self {
            Artifact::Temp(p) => p,
            Artifact::Caller(p) => p,
        }
    }

    fn into_path_buf(self) -> Result<PathBuf> {
        match self {
            Artifact::Temp(p) => Ok(p.keep().map_err(|e| CaptureError::Io(e.error))?),
            Artifact::Caller(p) => Ok(p),
        }
    }
}

/// Owns an open surface; releases it exactly once.
struct DeviceGuard {
    device: String,
    surface: Option<Box<dyn Surface>>,
}

impl DeviceGuard {
    fn new(device: &Device, surface: Box<dyn Surface>) -> Self {
        Self { device: device.name().to_string(), surface: Some(surface) }
    }

    fn surface(&mut self) -> Result<&mut dyn Surface> {
        match self.surface.as_deref_mut() {
            Some(s) => Ok(s),
            None => Err(CaptureError::render(anyhow::anyhow!("device `{}` already closed", self.device))),
        }
    }

    /// Write the output and release the surface.
    fn finish(mut self) -> anyhow::Result<()> {
        match self.surface.take() {
            Some(s) => s.finish(),
            None => Ok(()),
        }
    }
}

impl Drop for DeviceGuard {
    fn drop(&mut self) {
        if let Some(s) = self.surface.take() {
            log::debug!("releasing device `{}` without output", self.device);
            s.discard();
        }
    }
}

/// Start a blank page with zero margins, restoring the previous margins
/// whether or not the page could be started.
fn blank_page(surface: &mut dyn Surface) -> anyhow::Result<()> {
    let saved = surface.margins();
    surface.set_margins(Insets::ZERO);
    let started = surface.new_page();
    surface.set_margins(saved);
    started
}

/// Open the device on `artifact`, evaluate `expr` against it, and finish the
/// file. The device is released on every path out of this function.
fn render(expr: PlotExpr<'_>, device: &Device, args: &DeviceArgs, artifact: &Artifact) -> Result<()> {
    let surface = device.open(artifact.path(), args).map_err(CaptureError::Render)?;
    log::debug!("opened device `{}` on {}", device.name(), artifact.path().display());
    let mut guard = DeviceGuard::new(device, surface);

    {
        let surface = guard.surface()?;
        blank_page(surface).map_err(CaptureError::Render)?;
        let outcome = expr.evaluate(surface).map_err(CaptureError::Render)?;
        outcome.display(surface).map_err(CaptureError::Render)?;
    }

    guard.finish().map_err(CaptureError::Render)
}

/// Capture `expr` to an image file and return its path.
///
/// The device is resolved and its arguments validated before anything touches
/// the file system. On error, a system-generated output file is deleted after
/// the device has been released; a caller-supplied path is left as it was.
pub fn capture(expr: PlotExpr<'_>, opts: &CaptureOptions) -> Result<PathBuf> {
    let (artifact, device) = capture_artifact(expr, opts)?;
    let path = artifact.into_path_buf()?;
    log::debug!("captured {} with `{}`", path.display(), device.name());
    Ok(path)
}

/// Like [`capture`], but hands back the artifact so the caller decides when a
/// temp file goes away.
pub(crate) fn capture_artifact(expr: PlotExpr<'_>, opts: &CaptureOptions) -> Result<(Artifact, Device)> {
    let device = opts.device.resolve()?;
    let args = device.call_args(opts.width, opts.height, opts.res, &opts.device_args)?;

    let artifact = match &opts.output {
        Some(path) => Artifact::Caller(path.clone()),
        None => Artifact::temp(opts.temp_dir.as_deref())?,
    };

    match render(expr, &device, &args, &artifact) {
        Ok(()) => Ok((artifact, device)),
        Err(err) => {
            if let Artifact::Temp(temp) = artifact {
                let path = temp.to_path_buf();
                if let Err(e) = temp.close() {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        log::warn!("failed to remove {} after capture error: {e}", path.display());
                    }
                }
            }
            Err(err)
        }
    }
}
