//! A single physical LED tile.

use crate::{Color, Error, Result, GRID_PIXELS};
use std::fmt;
use std::str::FromStr;

/// Kind of a physical tile module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// One-pixel tile.
    Single,
    /// 5x5 grid tile with a clear finish.
    Grid5x5Clear,
    /// 5x5 grid tile with a blur (diffused) finish.
    Grid5x5Blur,
}

impl ModuleKind {
    /// Number of pixels on a tile of this kind.
    pub fn pixel_count(&self) -> usize {
        match self {
            ModuleKind::Single => 1,
            ModuleKind::Grid5x5Clear | ModuleKind::Grid5x5Blur => GRID_PIXELS,
        }
    }

    /// Side length of the tile's square pixel grid.
    pub fn side(&self) -> u32 {
        match self {
            ModuleKind::Single => 1,
            ModuleKind::Grid5x5Clear | ModuleKind::Grid5x5Blur => crate::GRID_SIDE,
        }
    }

    /// Returns true for the clear 5x5 grid, the only kind images target.
    pub fn is_clear_grid(&self) -> bool {
        matches!(self, ModuleKind::Grid5x5Clear)
    }
}

impl FromStr for ModuleKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "1x1" => Ok(ModuleKind::Single),
            "5x5_clear" => Ok(ModuleKind::Grid5x5Clear),
            "5x5_blur" => Ok(ModuleKind::Grid5x5Blur),
            _ => Err(Error::InvalidModuleKind(s.to_string())),
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleKind::Single => write!(f, "1x1"),
            ModuleKind::Grid5x5Clear => write!(f, "5x5_clear"),
            ModuleKind::Grid5x5Blur => write!(f, "5x5_blur"),
        }
    }
}

/// One physical tile: kind, pixel data, and whether it has been assigned.
///
/// Pixels default to black. The `used` flag distinguishes "default black"
/// from "intentionally set to black", which matters for image placement.
#[derive(Debug, Clone)]
pub struct Module {
    kind: ModuleKind,
    pixels: Vec<Color>,
    used: bool,
}

impl Module {
    /// Creates an unused module with all pixels black.
    pub fn new(kind: ModuleKind) -> Self {
        Self {
            kind,
            pixels: vec![Color::BLACK; kind.pixel_count()],
            used: false,
        }
    }

    /// Returns the module kind.
    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    /// Assigns a flat color list and marks the module used.
    ///
    /// Fails without touching the stored pixels if the length does not
    /// match the kind's pixel count.
    pub fn set_colors(&mut self, colors: &[Color]) -> Result<()> {
        let expected = self.kind.pixel_count();
        if colors.len() != expected {
            return Err(Error::PixelCount {
                kind: self.kind,
                expected,
                actual: colors.len(),
            });
        }
        self.pixels.clear();
        self.pixels.extend_from_slice(colors);
        self.used = true;
        Ok(())
    }

    /// Assigns image-derived pixel data. Same contract as [`set_colors`];
    /// both entry points converge on the same stored representation.
    ///
    /// [`set_colors`]: Module::set_colors
    pub fn set_data(&mut self, colors: Vec<Color>) -> Result<()> {
        let expected = self.kind.pixel_count();
        if colors.len() != expected {
            return Err(Error::PixelCount {
                kind: self.kind,
                expected,
                actual: colors.len(),
            });
        }
        self.pixels = colors;
        self.used = true;
        Ok(())
    }

    /// Returns the current pixel list in raster order.
    pub fn colors(&self) -> &[Color] {
        &self.pixels
    }

    /// Produces the wire-ready payload fragment for this module: each
    /// pixel base64-encoded individually, concatenated with no separator.
    pub fn rgb_data(&self) -> String {
        self.pixels.iter().map(Color::wire_encode).collect()
    }

    /// Returns true once pixel data has been explicitly assigned.
    pub fn is_used(&self) -> bool {
        self.used
    }
}
