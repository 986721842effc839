//! Cube Matrix Core Library
//!
//! Models a chain of physical LED tile modules (single pixels and 5x5
//! grids), maps colors and images onto them, and serializes the result
//! into the wire payload understood by the fixture.

pub mod color;
pub mod error;
pub mod imaging;
pub mod layout;
pub mod module;

pub use color::Color;
pub use error::{Error, Result};
pub use imaging::Rotation;
pub use layout::{Anchor, Layout, Orientation};
pub use module::{Module, ModuleKind};

/// Side length of a 5x5 grid module in pixels.
pub const GRID_SIDE: u32 = 5;

/// Pixel count of a 5x5 grid module.
pub const GRID_PIXELS: usize = (GRID_SIDE * GRID_SIDE) as usize;
