// File: crates/capture-core/src/lib.rs
// Summary: Core library entry point; exports the capture, tag, and chart APIs.

pub mod axis;
pub mod backend;
pub mod capture;
pub mod chart;
pub mod css;
pub mod device;
pub mod encoding;
pub mod error;
pub mod expr;
pub mod geometry;
pub mod grid;
pub mod html;
pub mod params;
pub mod select;
pub mod series;
pub mod surface;
pub mod tag;
pub mod theme;
pub mod types;

pub use axis::Axis;
pub use capture::{capture, CaptureOptions};
pub use chart::Chart;
pub use device::{Device, DeviceChoice};
pub use error::{CaptureError, Result};
pub use expr::{Outcome, PlotExpr, Plottable};
pub use html::{Html, Tag};
pub use params::{DeviceArgs, ParamSpec, ParamValue};
pub use select::{select_default_device, Backend};
pub use series::{Series, SeriesType};
pub use surface::{Stroke, Surface};
pub use tag::{plot_tag, SuppressSize, TagOptions};
pub use theme::Theme;
