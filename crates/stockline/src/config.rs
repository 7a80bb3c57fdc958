//! Stockline and yard configuration.
//!
//! Configuration is plain serde data, usually read from JSON:
//!
//! ```json
//! {
//!   "stocklines": [
//!     { "name": "A", "source": "1_GridContent.txt", "width": 4000, "depth": 280 }
//!   ]
//! }
//! ```
//!
//! Every field has a default. Values are only range-checked when a
//! [`Pipeline`] is built from them.

use serde::{Deserialize, Serialize};
use stockline_mesh::segment::{DEFAULT_LENGTH, DEFAULT_SEGMENTS};
use stockline_mesh::{
    ColorBands, DEFAULT_DEPTH, DEFAULT_WIDTH, GridDimensions, SegmentShading, TriangulatorKind,
};

use crate::error::Result;
use crate::pipeline::Pipeline;

/// Default key of the height stream.
pub const DEFAULT_SOURCE: &str = "1_GridContent.txt";

/// Default colour band interval.
pub const DEFAULT_INTERVAL: f32 = 1.0;

/// Segmentation shading settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Number of alternating slices.
    pub segments: u32,
    /// Length covered by the slices, in world units.
    pub length: f32,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            length: DEFAULT_LENGTH,
        }
    }
}

/// One stockline: a height stream and how to turn it into a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StocklineConfig {
    /// Display name; also used in log output.
    pub name: String,
    /// Key passed to the byte source.
    pub source: String,
    /// Lattice width (period of the `x` counter).
    pub width: u32,
    /// Lattice depth (period of the `z` counter).
    pub depth: u32,
    /// Height band interval for the colour ramp.
    pub interval: f32,
    pub triangulator: TriangulatorKind,
    /// Reject streams whose sample count differs from `width * depth`
    /// instead of wrapping them onto the lattice.
    pub strict_dimensions: bool,
    pub segmentation: SegmentationConfig,
}

impl Default for StocklineConfig {
    fn default() -> Self {
        Self {
            name: "stockline".to_string(),
            source: DEFAULT_SOURCE.to_string(),
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
            interval: DEFAULT_INTERVAL,
            triangulator: TriangulatorKind::default(),
            strict_dimensions: false,
            segmentation: SegmentationConfig::default(),
        }
    }
}

impl StocklineConfig {
    /// Build a validated pipeline from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions, interval or segmentation are out
    /// of range.
    pub fn pipeline(&self) -> Result<Pipeline> {
        let dims = GridDimensions::new(self.width, self.depth)?;
        let bands = ColorBands::new(self.interval)?;
        let shading =
            SegmentShading::new(self.segmentation.segments, self.segmentation.length)?;

        Ok(Pipeline {
            name: self.name.clone(),
            dims,
            bands,
            shading,
            triangulator: self.triangulator,
            strict_dimensions: self.strict_dimensions,
        })
    }
}

/// A set of stocklines loaded together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YardConfig {
    pub stocklines: Vec<StocklineConfig>,
}

impl YardConfig {
    /// Parse a yard configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or has the wrong shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
