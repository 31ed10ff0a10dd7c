// File: crates/capture-core/src/backend/mod.rs
// Summary: Built-in devices. Only `raster` is unconditional; the rest are feature-gated.

pub mod raster;

#[cfg(feature = "skia")]
pub mod skia;

#[cfg(feature = "tiny-skia")]
pub mod tiny;

#[cfg(feature = "resvg")]
pub mod svg;
