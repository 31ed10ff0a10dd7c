// File: crates/capture-core/src/device.rs
// Summary: Device descriptors (name, declared parameters, opener) and device resolution.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CaptureError, Result};
use crate::params::{DeviceArgs, ParamSpec};
use crate::select::{select_default_device, Backend};
use crate::surface::Surface;

type OpenFn = dyn Fn(&Path, &DeviceArgs) -> anyhow::Result<Box<dyn Surface>> + Send + Sync;

/// A rendering backend entry point: opens a [`Surface`] bound to an output file.
#[derive(Clone)]
pub struct Device {
    name: String,
    params: ParamSpec,
    open: Arc<OpenFn>,
}

impl Device {
    pub fn new<F>(name: impl Into<String>, params: ParamSpec, open: F) -> Self
    where
        F: Fn(&Path, &DeviceArgs) -> anyhow::Result<Box<dyn Surface>> + Send + Sync + 'static,
    {
        Self { name: name.into(), params, open: Arc::new(open) }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn params(&self) -> &ParamSpec { &self.params }

    /// Open the device against `filename`. Callers are expected to have filtered
    /// `args` with [`Device::call_args`].
    pub fn open(&self, filename: &Path, args: &DeviceArgs) -> anyhow::Result<Box<dyn Surface>> {
        (self.open)(filename, args)
    }

    /// Build the argument map for opening this device.
    ///
    /// `width`/`height`/`res` are only passed when the device accepts arbitrary
    /// extras or declares them by name. Every caller-supplied `extra` is passed
    /// through, and one the device cannot take is an error.
    pub fn call_args(&self, width: u32, height: u32, res: f32, extra: &DeviceArgs) -> Result<DeviceArgs> {
        if let Some(param) = extra.names().find(|name| !self.params.accepts(name)) {
            return Err(CaptureError::UnsupportedParameter {
                device: self.name.clone(),
                param: param.to_string(),
            });
        }
        let mut args = DeviceArgs::new();
        if self.params.accepts("width") { args.set("width", width); }
        if self.params.accepts("height") { args.set("height", height); }
        if self.params.accepts("res") { args.set("res", res); }
        for (name, value) in extra.iter() {
            args.set(name, value.clone());
        }
        Ok(args)
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device").field("name", &self.name).field("params", &self.params).finish()
    }
}

/// How a caller picks the device for a capture.
#[derive(Clone, Debug, Default)]
pub enum DeviceChoice {
    /// Whatever [`select_default_device`] picks.
    #[default]
    Default,
    /// A built-in backend by name (`"skia"`, `"tiny-skia"`, `"resvg"`, `"png"`).
    Named(String),
    Device(Device),
}

impl DeviceChoice {
    /// Resolve to an openable device. Touches nothing on disk.
    pub fn resolve(&self) -> Result<Device> {
        match self {
            DeviceChoice::Default => Ok(select_default_device()),
            DeviceChoice::Named(name) => lookup(name),
            DeviceChoice::Device(device) => Ok(device.clone()),
        }
    }
}

impl From<Device> for DeviceChoice {
    fn from(d: Device) -> Self { DeviceChoice::Device(d) }
}

impl From<&str> for DeviceChoice {
    fn from(name: &str) -> Self { DeviceChoice::Named(name.to_string()) }
}

impl From<String> for DeviceChoice {
    fn from(name: String) -> Self { DeviceChoice::Named(name) }
}

/// Look up a built-in device by name. Names of backends not compiled into this
/// build are rejected the same way as unknown names.
pub fn lookup(name: &str) -> Result<Device> {
    let backend = Backend::from_name(name)
        .ok_or_else(|| CaptureError::InvalidDevice(format!("no device named `{name}`")))?;
    backend.device().ok_or_else(|| {
        CaptureError::InvalidDevice(format!(
            "device `{name}` is not available in this build (enable the `{}` feature)",
            backend.name()
        ))
    })
}
