//! Screen layout table: where each basis glyph sits, its color, and where the
//! corner ket labels go.
//!
//! Every field can be overridden from TOML; missing fields keep the defaults.
//!
//! ```toml
//! palette = ["#0000FF", "#00FF00", "#FF0000", "#FFFF00"]
//!
//! [corners]
//! top_left = 1
//! bottom_right = 2
//! ```

use crate::core::DIM;
use crate::core::errors::ConfigError;
use crate::render::color::Rgb;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which basis index is printed at each plot corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CornerLabels {
    pub bottom_left: usize,
    pub top_left: usize,
    pub bottom_right: usize,
    pub top_right: usize,
}

impl Default for CornerLabels {
    fn default() -> Self {
        Self {
            bottom_left: 0,
            bottom_right: 1,
            top_left: 2,
            top_right: 3,
        }
    }
}

impl CornerLabels {
    fn as_array(&self) -> [usize; DIM] {
        [
            self.bottom_left,
            self.top_left,
            self.bottom_right,
            self.top_right,
        ]
    }
}

/// Aggregate color swatch geometry, anchored to the bottom-right corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwatchLayout {
    /// Side of the square, in pixels.
    pub size: i32,
    /// Distance of the top-left swatch corner from the right and bottom canvas edges.
    pub inset: i32,
}

impl Default for SwatchLayout {
    fn default() -> Self {
        Self {
            size: 100,
            inset: 150,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Normalized `[u, v]` glyph centers per basis index. `u` runs left to
    /// right and `v` bottom to top across the plot area.
    pub positions: [[f64; 2]; DIM],
    /// Glyph fill per basis index, also the base of the channel swatches.
    pub palette: [Rgb; DIM],
    /// Pixel offset of each glyph caption from its center.
    pub label_offsets: [[i32; 2]; DIM],
    /// Point size of the corner ket labels.
    pub label_font_size: u32,
    /// Radius cap for glyphs.
    pub max_radius: f64,
    /// Radius of a glyph at probability 1 before capping.
    pub radius_scale: f64,
    pub corners: CornerLabels,
    pub swatch: SwatchLayout,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            positions: [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]],
            palette: [Rgb::BLUE, Rgb::GREEN, Rgb::RED, Rgb::YELLOW],
            label_offsets: [[10, 20], [-100, 20], [10, -10], [-100, -10]],
            label_font_size: 8,
            max_radius: 50.0,
            radius_scale: 100.0,
            corners: CornerLabels::default(),
            swatch: SwatchLayout::default(),
        }
    }
}

impl Layout {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let layout: Layout = toml::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Reads and validates a layout file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let layout = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "layout loaded");
        Ok(layout)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Checks positions lie in the unit square and that the corner labels name
    /// each basis state exactly once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, &[u, v]) in self.positions.iter().enumerate() {
            if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
                return Err(ConfigError::PositionOutOfRange { index, u, v });
            }
        }

        let mut seen = [false; DIM];
        for ket in self.corners.as_array() {
            let slot = seen.get_mut(ket).ok_or(ConfigError::UnknownKet(ket))?;
            if *slot {
                return Err(ConfigError::DuplicateKet(ket));
            }
            *slot = true;
        }
        Ok(())
    }

    /// Glyph radius for a probability: `min(max_radius, radius_scale · √p)`,
    /// truncated to whole pixels.
    pub fn radius(&self, probability: f64) -> i32 {
        (self.radius_scale * probability.max(0.0).sqrt()).min(self.max_radius) as i32
    }
}
