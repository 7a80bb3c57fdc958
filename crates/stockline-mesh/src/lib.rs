//! Decode stockpile height streams into triangulated surface meshes.
//!
//! This crate provides pure synchronous functions for turning a flat stream
//! of little-endian `f32` height samples into a renderable surface: the
//! samples are quantized, laid out on a wrapping `(x, z)` lattice,
//! triangulated over their 2D footprint and assembled into a mesh with
//! vertex normals. Height-banded colouring and the segmentation shading are
//! plain functions the renderer calls per vertex or per fragment.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **User-controlled parallelism**: Caller decides where the work runs
//! - **Fail fast**: Every stage returns a typed error instead of partial output
//!
//! # Key functions
//!
//! - [`decode_samples`]: Decode and quantize the raw byte stream
//! - [`layout`]: Walk samples onto the wrapping lattice
//! - [`triangulate`]: Delaunay-triangulate the projected footprint
//! - [`SurfaceMesh::assemble`]: Build positions, indices and normals
//! - [`color_for`]: Map a height to its band colour

mod error;

pub mod color;
pub mod lattice;
pub mod mesh;
pub mod normals;
pub mod samples;
pub mod segment;
pub mod triangulate;

pub use color::{ColorBands, HeightBand, color_for};
pub use error::{MeshError, MeshResult};
pub use lattice::{LatticeWalk, check_sample_count, layout};
pub use mesh::{Bounds, SurfaceMesh};
pub use normals::compute_vertex_normals;
pub use samples::{decode_samples, quantize};
pub use segment::{Fragment, SegmentShading};
pub use triangulate::{
    BowyerWatson, SweepHull, Triangulator, TriangulatorKind, project, triangulate,
};

use glam::{DVec2, Vec3};

/// Divisor applied to lattice indices and quantized heights to obtain
/// world-space positions.
pub const LATTICE_SCALE: f32 = 10.0;

/// Grid width used by the stockyard scanners.
pub const DEFAULT_WIDTH: u32 = 4000;

/// Grid depth used by the stockyard scanners.
pub const DEFAULT_DEPTH: u32 = 280;

/// Extents of the lattice the samples are walked onto.
///
/// `width` is the period of the `x` counter and `depth` the period of the
/// `z` counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub depth: u32,
}

impl GridDimensions {
    /// Create validated grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if either extent is zero.
    pub fn new(width: u32, depth: u32) -> MeshResult<Self> {
        if width == 0 || depth == 0 {
            return Err(MeshError::InvalidConfig {
                context: "grid",
                detail: format!("dimensions must be non-zero, got {width}x{depth}"),
            });
        }
        Ok(Self { width, depth })
    }

    /// Number of samples that fill the lattice exactly once.
    #[must_use]
    pub fn expected_samples(&self) -> usize {
        self.width as usize * self.depth as usize
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
        }
    }
}

/// A quantized height sample placed on the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticePoint {
    pub x_index: u32,
    pub z_index: u32,
    /// Quantized height in tenths of a unit (integer valued).
    pub height: f32,
}

impl LatticePoint {
    #[must_use]
    pub fn new(x_index: u32, height: f32, z_index: u32) -> Self {
        Self {
            x_index,
            z_index,
            height,
        }
    }

    /// World-space position `(x / 10, height / 10, z / 10)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.x_index as f32 / LATTICE_SCALE,
            self.height / LATTICE_SCALE,
            self.z_index as f32 / LATTICE_SCALE,
        )
    }

    /// Footprint of the point with the height dropped.
    ///
    /// Uses the unscaled lattice indices so the geometric predicates used by
    /// the triangulators stay exact.
    #[must_use]
    pub fn projected(&self) -> DVec2 {
        DVec2::new(f64::from(self.x_index), f64::from(self.z_index))
    }
}
