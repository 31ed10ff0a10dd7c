// File: crates/capture-core/src/error.rs
// Summary: Error taxonomy for capture and tag emission.

use thiserror::Error;

/// Result type alias for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors surfaced by [`crate::capture`] and [`crate::plot_tag`].
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The device argument does not resolve to something that can be opened.
    /// Raised before any resource or file is created.
    #[error("invalid device: {0}")]
    InvalidDevice(String),

    /// A caller-supplied device argument the device neither declares nor accepts as an extra.
    #[error("device `{device}` does not accept parameter `{param}`")]
    UnsupportedParameter { device: String, param: String },

    /// `suppress_size` outside `none`, `x`, `y`, `xy`.
    #[error("invalid suppress_size `{0}`: expected one of \"none\", \"x\", \"y\", \"xy\"")]
    InvalidSuppressSize(String),

    /// A width/height that is not a valid CSS length.
    #[error("invalid CSS unit `{0}`")]
    InvalidCssUnit(String),

    /// Failure while opening the device, establishing the page, evaluating the
    /// expression, or finishing the output file.
    #[error("render failed: {0}")]
    Render(#[source] anyhow::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CaptureError {
    pub(crate) fn render(err: impl Into<anyhow::Error>) -> Self {
        CaptureError::Render(err.into())
    }
}
