//! Deck configuration, loaded from a `styles.json`-shaped document.
//!
//! ```json
//! {
//!   "page":  { "width_in": 13.333, "height_in": 7.5,
//!              "margins_in": [0.6, 0.6, 0.6, 0.6], "gutter_in": 0.2 },
//!   "bands": { "row_height_in": 1.0, "row_top_in": 0.0 },
//!   "debug": { "grid": false, "bbox": false }
//! }
//! ```
//! Missing sections and fields fall back to the defaults below; unknown keys
//! are ignored.

use crate::error::{GridslideError, Result};
use crate::solver::{Margins, PageGeometry};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub page: PageConfig,
    pub bands: BandConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub width_in: f64,
    pub height_in: f64,
    /// Left, top, right, bottom.
    pub margins_in: [f64; 4],
    pub gutter_in: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width_in: 13.333,
            height_in: 7.5,
            margins_in: [0.6; 4],
            gutter_in: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandConfig {
    /// Height of one band unit.
    pub row_height_in: f64,
    /// Offset of the first root row below the top margin.
    pub row_top_in: f64,
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            row_height_in: 1.0,
            row_top_in: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Emit the 12-column guide overlay.
    pub grid: bool,
    /// Emit an outline for every placement.
    pub bbox: bool,
}

impl DeckConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn margins(&self) -> Margins {
        let [left, top, right, bottom] = self.page.margins_in;
        Margins { left, top, right, bottom }
    }

    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry {
            width: self.page.width_in,
            height: self.page.height_in,
            margins: self.margins(),
            row_top: self.bands.row_top_in,
        }
    }

    /// Root gutter as a fraction of the content width.
    pub fn base_gutter_fraction(&self) -> f64 {
        self.page_geometry().gutter_fraction(self.page.gutter_in)
    }

    pub fn validate(&self) -> Result<()> {
        self.page_geometry().validate()?;
        let band = self.bands.row_height_in;
        if !(band.is_finite() && band > 0.0) {
            return Err(GridslideError::Configuration(format!(
                "bands.row_height_in must be positive, got {band}"
            )));
        }
        Ok(())
    }
}
