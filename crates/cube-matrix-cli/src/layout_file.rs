//! TOML layout descriptions for the `draw` command.
//!
//! A layout file names the fixture assembly (orientation, anchor, module
//! kind tags in caller-visible order) and the content to place on it:
//! per-module color fills and image spans.

use anyhow::{Context, Result};
use cube_matrix_core::{Color, Layout, ModuleKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn default_span() -> usize {
    usize::MAX
}

/// Top-level layout description.
#[derive(Debug, Deserialize)]
pub struct LayoutFile {
    /// "vertical" or "horizontal".
    pub orientation: String,
    /// "top", "bottom", "left", or "right".
    pub anchor: String,
    /// Module kind tags ("1x1", "5x5_clear", "5x5_blur") in
    /// caller-visible order.
    pub modules: Vec<String>,
    /// Color fills, applied in file order.
    #[serde(default)]
    pub fill: Vec<Fill>,
    /// Image placements, applied after the fills.
    #[serde(default)]
    pub image: Vec<Image>,
}

/// A color fill for one module.
#[derive(Debug, Deserialize)]
pub struct Fill {
    /// Caller-visible module index.
    pub index: usize,
    /// Single color applied to every pixel of the module.
    #[serde(default)]
    pub color: Option<String>,
    /// Full per-pixel color list, row-major. Ignored when `color` is set.
    #[serde(default)]
    pub colors: Vec<String>,
}

/// An image placement across a run of clear 5x5 modules.
#[derive(Debug, Deserialize)]
pub struct Image {
    pub path: PathBuf,
    /// First caller-visible module index to consider.
    #[serde(default)]
    pub start: usize,
    /// Most modules the image may span. Defaults to the whole chain.
    #[serde(default = "default_span")]
    pub max_span: usize,
}

impl LayoutFile {
    /// Reads and parses a layout description.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read layout file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse layout file {}", path.display()))
    }

    /// Builds and populates a layout through the core's public operations.
    pub fn build(&self) -> Result<Layout> {
        let orientation = self.orientation.parse()?;
        let anchor = self.anchor.parse()?;
        let mut layout = Layout::new(orientation, anchor)?;

        let kinds = self
            .modules
            .iter()
            .map(|tag| tag.parse::<ModuleKind>())
            .collect::<cube_matrix_core::Result<Vec<_>>>()?;
        layout.add_modules_list(&kinds, true);

        for fill in &self.fill {
            let colors: Vec<Color> = if let Some(color) = &fill.color {
                let color: Color = color.parse()?;
                let count = layout
                    .module(fill.index)
                    .map(|module| module.kind().pixel_count())
                    .with_context(|| format!("no module at index {}", fill.index))?;
                vec![color; count]
            } else {
                fill.colors
                    .iter()
                    .map(|c| c.parse())
                    .collect::<cube_matrix_core::Result<Vec<_>>>()?
            };
            layout
                .set_module_colors(fill.index, &colors)
                .with_context(|| format!("failed to fill module {}", fill.index))?;
        }

        for image in &self.image {
            layout
                .set_image(&image.path, image.start, image.max_span)
                .with_context(|| format!("failed to place image {}", image.path.display()))?;
        }

        Ok(layout)
    }
}
