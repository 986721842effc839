//! Pure image transforms.
//!
//! Both color fills and photographs pass through the same canvas
//! pipeline (synthesize or decode, rotate, serialize, split), so they
//! share identical physical-orientation semantics.

use crate::{Color, Error, Result, GRID_SIDE};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::path::Path;

/// Canvas rotation in multiples of 90 degrees, counterclockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// Quarter turn counterclockwise.
    Ccw90,
    /// Half turn.
    Half,
    /// Three-quarter turn counterclockwise.
    Ccw270,
}

impl Rotation {
    /// Returns the rotation angle in degrees.
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Ccw90 => 90,
            Rotation::Half => 180,
            Rotation::Ccw270 => 270,
        }
    }
}

/// Decodes an image file and resamples it to exactly `width` x `height`
/// with a high-quality filter.
pub fn open_scaled(path: &Path, width: u32, height: u32) -> Result<RgbImage> {
    if !path.exists() {
        return Err(Error::ImageNotFound {
            path: path.to_path_buf(),
        });
    }
    let img = image::open(path)?;
    Ok(img.resize_exact(width, height, FilterType::Lanczos3).to_rgb8())
}

/// Synthesizes a canvas from a flat color list, one color per pixel,
/// row-major.
pub fn canvas_from_colors(colors: &[Color], width: u32, height: u32) -> Result<RgbImage> {
    if colors.len() != (width * height) as usize {
        return Err(Error::CanvasSize {
            width,
            height,
            actual: colors.len(),
        });
    }
    let mut img = RgbImage::new(width, height);
    for (pixel, color) in img.pixels_mut().zip(colors) {
        *pixel = Rgb([color.r, color.g, color.b]);
    }
    Ok(img)
}

/// Rotates a canvas counterclockwise. Quarter turns swap the canvas
/// dimensions.
pub fn rotate(img: &RgbImage, rotation: Rotation) -> RgbImage {
    match rotation {
        Rotation::None => img.clone(),
        // imageops rotations are clockwise.
        Rotation::Ccw90 => imageops::rotate270(img),
        Rotation::Half => imageops::rotate180(img),
        Rotation::Ccw270 => imageops::rotate90(img),
    }
}

/// Serializes a canvas to an ordered color sequence, row-major.
pub fn canvas_colors(img: &RgbImage) -> Vec<Color> {
    img.pixels()
        .map(|Rgb([r, g, b])| Color::new(*r, *g, *b))
        .collect()
}

/// Splits a canvas into 5x5 tiles along its dominant axis, in chain
/// order. A square canvas yields a single tile.
pub fn split_grids(img: &RgbImage) -> Vec<RgbImage> {
    let (width, height) = img.dimensions();
    if width > height {
        (0..width / GRID_SIDE)
            .map(|i| imageops::crop_imm(img, i * GRID_SIDE, 0, GRID_SIDE, GRID_SIDE).to_image())
            .collect()
    } else if height > width {
        (0..height / GRID_SIDE)
            .map(|i| imageops::crop_imm(img, 0, i * GRID_SIDE, GRID_SIDE, GRID_SIDE).to_image())
            .collect()
    } else {
        vec![img.clone()]
    }
}
