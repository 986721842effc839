//! Ordered chain of modules representing one wired fixture assembly.
//!
//! Callers address modules anchor-relative: index 0 is always the module
//! at the anchored end of the chain. Depending on `(orientation, anchor)`
//! the internal storage order (which is also the wire payload order) is
//! the reverse of the caller-visible order, and canvases are rotated so
//! that fills and photographs come out physically upright.

use crate::imaging::{self, Rotation};
use crate::{Color, Error, Module, ModuleKind, Result, GRID_SIDE};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Physical run direction of the module chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Modules stack top to bottom.
    Vertical,
    /// Modules run left to right.
    Horizontal,
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            _ => Err(Error::InvalidOrientation(s.to_string())),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Vertical => write!(f, "vertical"),
            Orientation::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// Physical end of the chain addressed as index 0 by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Anchor::Top),
            "bottom" => Ok(Anchor::Bottom),
            "left" => Ok(Anchor::Left),
            "right" => Ok(Anchor::Right),
            _ => Err(Error::InvalidAnchor(s.to_string())),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Top => write!(f, "top"),
            Anchor::Bottom => write!(f, "bottom"),
            Anchor::Left => write!(f, "left"),
            Anchor::Right => write!(f, "right"),
        }
    }
}

/// An ordered chain of modules with an orientation and anchor.
pub struct Layout {
    orientation: Orientation,
    anchor: Anchor,
    rotation: Rotation,
    flipped: bool,
    /// Modules in internal wiring order. When `flipped`, this is the
    /// reverse of the caller-visible order.
    modules: Vec<Module>,
}

impl Layout {
    /// Creates an empty layout.
    ///
    /// The rotation and flip are derived once from the fixed table:
    /// vertical/top 0, vertical/bottom 180 flipped, horizontal/left 270,
    /// horizontal/right 90 flipped. Rotations are counterclockwise.
    /// Fails if the anchor does not belong to the orientation.
    pub fn new(orientation: Orientation, anchor: Anchor) -> Result<Self> {
        let (rotation, flipped) = match (orientation, anchor) {
            (Orientation::Vertical, Anchor::Top) => (Rotation::None, false),
            (Orientation::Vertical, Anchor::Bottom) => (Rotation::Half, true),
            (Orientation::Horizontal, Anchor::Left) => (Rotation::Ccw270, false),
            (Orientation::Horizontal, Anchor::Right) => (Rotation::Ccw90, true),
            _ => {
                return Err(Error::AnchorMismatch {
                    orientation,
                    anchor,
                })
            }
        };
        Ok(Self {
            orientation,
            anchor,
            rotation,
            flipped,
            modules: Vec::new(),
        })
    }

    /// Returns the layout orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the layout anchor.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Returns the derived canvas rotation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Returns true when internal storage order is the reverse of the
    /// caller-visible order.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Number of modules in the chain.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if the chain holds no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Translates a caller-visible index to internal storage order.
    /// Only valid for indexes within the current length.
    fn storage_index(&self, index: usize) -> usize {
        if self.flipped {
            self.modules.len() - 1 - index
        } else {
            index
        }
    }

    /// Replaces (or, with `clear = false`, extends) the chain with fresh
    /// modules of the given kinds, in caller-visible order.
    ///
    /// Recreating discards all pixel data but preserves nothing else;
    /// every module starts out unused and black.
    pub fn add_modules_list(&mut self, kinds: &[ModuleKind], clear: bool) {
        if clear {
            self.modules = Vec::with_capacity(kinds.len());
        }
        if self.flipped {
            self.modules.extend(kinds.iter().rev().map(|&k| Module::new(k)));
        } else {
            self.modules.extend(kinds.iter().map(|&k| Module::new(k)));
        }
    }

    /// Inserts one module at a caller-visible index (default: end of the
    /// chain), translated to internal storage order via the flip rule.
    pub fn add_module(&mut self, kind: ModuleKind, index: Option<usize>) -> Result<()> {
        let len = self.modules.len();
        let index = index.unwrap_or(len);
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        let at = if self.flipped { len - index } else { index };
        self.modules.insert(at, Module::new(kind));
        Ok(())
    }

    /// Returns the module at a caller-visible index.
    pub fn module(&self, index: usize) -> Option<&Module> {
        if index >= self.modules.len() {
            return None;
        }
        self.modules.get(self.storage_index(index))
    }

    /// Returns the modules in caller-visible order.
    pub fn modules(&self) -> Vec<&Module> {
        if self.flipped {
            self.modules.iter().rev().collect()
        } else {
            self.modules.iter().collect()
        }
    }

    /// Fills the addressed module with the given colors.
    ///
    /// The colors are routed through the same canvas rotation used for
    /// photographs, so fills and photos share identical
    /// physical-orientation semantics.
    pub fn set_module_colors(&mut self, index: usize, colors: &[Color]) -> Result<()> {
        debug!("setting {} colors on module {index}", colors.len());
        let len = self.modules.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        let storage = self.storage_index(index);
        let kind = self.modules[storage].kind();
        if colors.len() != kind.pixel_count() {
            return Err(Error::PixelCount {
                kind,
                expected: kind.pixel_count(),
                actual: colors.len(),
            });
        }
        let side = kind.side();
        let canvas = imaging::canvas_from_colors(colors, side, side)?;
        let rotated = imaging::rotate(&canvas, self.rotation);
        self.modules[storage].set_colors(&imaging::canvas_colors(&rotated))
    }

    /// Draws an image file across a run of unused clear 5x5 modules.
    ///
    /// Scans caller-visible order from `start` for the first unused clear
    /// grid, then accumulates up to `max_span` contiguous such modules
    /// (the run stops at the first used or non-clear module). The image
    /// is resampled to 5 px per module along the chain's dominant axis,
    /// rotated, split into 5x5 tiles, and assigned in physical chain
    /// order.
    pub fn set_image(&mut self, path: &Path, start: usize, max_span: usize) -> Result<()> {
        debug!(
            "drawing {} from module {start} over at most {max_span} modules",
            path.display()
        );
        let len = self.modules.len();
        let first = (start..len)
            .find(|&i| {
                let module = &self.modules[self.storage_index(i)];
                module.kind().is_clear_grid() && !module.is_used()
            })
            .ok_or(Error::NoTargetModule { start })?;

        let max_span = max_span.max(1);
        let mut span = 0;
        for i in first..len {
            if span >= max_span {
                break;
            }
            let module = &self.modules[self.storage_index(i)];
            if module.kind().is_clear_grid() && !module.is_used() {
                span += 1;
            } else {
                break;
            }
        }

        let (width, height) = match self.orientation {
            Orientation::Vertical => (GRID_SIDE, GRID_SIDE * span as u32),
            Orientation::Horizontal => (GRID_SIDE * span as u32, GRID_SIDE),
        };

        let canvas = imaging::open_scaled(path, width, height)?;
        let rotated = imaging::rotate(&canvas, self.rotation);
        let tiles = imaging::split_grids(&rotated);
        if tiles.len() < span {
            return Err(Error::TileShortfall {
                expected: span,
                actual: tiles.len(),
            });
        }

        // Tiles come out of the rotated canvas in physical chain order;
        // map each back to its caller-visible module.
        for (offset, tile) in tiles.into_iter().take(span).enumerate() {
            let caller = if self.flipped {
                first + span - 1 - offset
            } else {
                first + offset
            };
            let storage = self.storage_index(caller);
            self.modules[storage].set_data(imaging::canvas_colors(&tile))?;
        }
        Ok(())
    }

    /// Concatenates every module's wire encoding in physical (internal
    /// storage) order. This exact byte sequence is the `update_leds`
    /// payload.
    pub fn raw_rgb_data(&self) -> String {
        self.modules.iter().map(Module::rgb_data).collect()
    }
}
