// File: crates/capture-core/src/select.rs
// Summary: Default device selection over the backends compiled into this build.

use crate::backend;
use crate::device::Device;

/// Built-in rendering backends, in default-selection priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Skia CPU raster surfaces.
    Skia,
    /// tiny-skia anti-aliased rasterizer.
    TinySkia,
    /// SVG document rasterized by resvg.
    Resvg,
    /// `image`-crate raster; always compiled in.
    Png,
}

impl Backend {
    pub const PRIORITY: [Backend; 4] = [Backend::Skia, Backend::TinySkia, Backend::Resvg, Backend::Png];

    pub fn name(self) -> &'static str {
        match self {
            Backend::Skia => "skia",
            Backend::TinySkia => "tiny-skia",
            Backend::Resvg => "resvg",
            Backend::Png => "png",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|b| b.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Whether this backend is compiled into the current build.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Skia => cfg!(feature = "skia"),
            Backend::TinySkia => cfg!(feature = "tiny-skia"),
            Backend::Resvg => cfg!(feature = "resvg"),
            Backend::Png => true,
        }
    }

    /// The device for this backend, or `None` when it is not compiled in.
    pub fn device(self) -> Option<Device> {
        match self {
            #[cfg(feature = "skia")]
            Backend::Skia => Some(backend::skia::device()),
            #[cfg(feature = "tiny-skia")]
            Backend::TinySkia => Some(backend::tiny::device()),
            #[cfg(feature = "resvg")]
            Backend::Resvg => Some(backend::svg::device()),
            Backend::Png => Some(backend::raster::device()),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

/// Apply the selection policy to an availability probe: first available
/// backend in [`Backend::PRIORITY`] wins, falling back to [`Backend::Png`].
pub fn select_backend_with(available: impl Fn(Backend) -> bool) -> Backend {
    Backend::PRIORITY
        .into_iter()
        .find(|b| *b == Backend::Png || available(*b))
        .unwrap_or(Backend::Png)
}

/// Backend the current build would use by default.
pub fn default_backend() -> Backend {
    select_backend_with(Backend::is_available)
}

/// Pick the default device: Skia, then tiny-skia, then resvg, then the
/// always-present PNG raster. Never fails.
pub fn select_default_device() -> Device {
    let chosen = default_backend();
    log::debug!("default device: {}", chosen.name());
    chosen.device().unwrap_or_else(backend::raster::device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_availability_combination_selects_first_present() {
        for mask in 0u8..8 {
            let avail = |b: Backend| match b {
                Backend::Skia => mask & 1 != 0,
                Backend::TinySkia => mask & 2 != 0,
                Backend::Resvg => mask & 4 != 0,
                Backend::Png => true,
            };
            let want = if mask & 1 != 0 {
                Backend::Skia
            } else if mask & 2 != 0 {
                Backend::TinySkia
            } else if mask & 4 != 0 {
                Backend::Resvg
            } else {
                Backend::Png
            };
            assert_eq!(select_backend_with(avail), want, "mask {mask:03b}");
        }
    }

    #[test]
    fn baseline_wins_even_if_probe_denies_it() {
        assert_eq!(select_backend_with(|_| false), Backend::Png);
    }

    #[test]
    fn default_device_is_openable_backend() {
        let backend = default_backend();
        assert!(backend.is_available());
        assert_eq!(select_default_device().name(), backend.name());
    }

    #[test]
    fn names_round_trip() {
        for b in Backend::PRIORITY {
            assert_eq!(Backend::from_name(b.name()), Some(b));
        }
        assert_eq!(Backend::from_name("cairo"), None);
    }
}
