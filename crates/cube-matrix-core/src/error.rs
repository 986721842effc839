//! Error types for the cube matrix core library.

use std::path::PathBuf;
use thiserror::Error;

use crate::module::ModuleKind;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or populating a layout.
#[derive(Error, Debug)]
pub enum Error {
    /// Color string could not be parsed as #rrggbb.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Module kind tag not recognized.
    #[error("invalid module kind: {0:?}")]
    InvalidModuleKind(String),

    /// Orientation name not recognized.
    #[error("invalid orientation: {0:?}")]
    InvalidOrientation(String),

    /// Anchor name not recognized.
    #[error("invalid anchor: {0:?}")]
    InvalidAnchor(String),

    /// Anchor does not belong to the layout orientation.
    #[error("anchor {anchor} is not valid for a {orientation} layout")]
    AnchorMismatch {
        orientation: crate::layout::Orientation,
        anchor: crate::layout::Anchor,
    },

    /// Pixel data length does not match the module kind.
    #[error("{kind} module requires {expected} colors, but received {actual}")]
    PixelCount {
        kind: ModuleKind,
        expected: usize,
        actual: usize,
    },

    /// Color list does not fill the requested canvas.
    #[error("{width}x{height} canvas requires {} colors, but received {actual}", width * height)]
    CanvasSize {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// Module index outside the layout.
    #[error("module index {index} out of range for layout of {len} modules")]
    IndexOutOfRange { index: usize, len: usize },

    /// No unused clear grid module available for an image placement.
    #[error("no unused clear 5x5 module at or after index {start}")]
    NoTargetModule { start: usize },

    /// Image splitting produced fewer tiles than targeted modules.
    #[error("image produced {actual} tiles but {expected} modules were targeted")]
    TileShortfall { expected: usize, actual: usize },

    /// Image asset does not exist.
    #[error("image file not found: {}", path.display())]
    ImageNotFound { path: PathBuf },

    /// Image decoding or processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
