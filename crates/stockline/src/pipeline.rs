//! The stockline surface pipeline.
//!
//! decode → (dimension check) → layout → triangulate → assemble
//!
//! Every stage consumes its input completely before the next one starts,
//! and the first failure ends the run without partial output.

use glam::{Vec3, Vec4};
use stockline_mesh::{
    Bounds, ColorBands, GridDimensions, MeshResult, SegmentShading, SurfaceMesh, Triangulator,
    TriangulatorKind, check_sample_count, decode_samples, layout, project,
};
use web_time::Instant;

/// A validated stockline pipeline.
///
/// Build one with [`StocklineConfig::pipeline`](crate::StocklineConfig::pipeline)
/// or directly; the fields are plain settings.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Name used in logs and on the resulting surface.
    pub name: String,
    pub dims: GridDimensions,
    pub bands: ColorBands,
    pub shading: SegmentShading,
    pub triangulator: TriangulatorKind,
    /// Reject streams that do not fill the lattice exactly once.
    pub strict_dimensions: bool,
}

impl Pipeline {
    /// Pipeline with default banding and shading.
    #[must_use]
    pub fn new(name: impl Into<String>, dims: GridDimensions) -> Self {
        Self {
            name: name.into(),
            dims,
            bands: ColorBands::default(),
            shading: SegmentShading::default(),
            triangulator: TriangulatorKind::default(),
            strict_dimensions: false,
        }
    }

    /// Turn a raw height stream into a surface.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails: a malformed stream,
    /// a sample count mismatch (strict mode only), too few or collinear
    /// points, or an invalid triangle index.
    pub fn run(&self, bytes: &[u8]) -> MeshResult<Surface> {
        let span = tracing::info_span!("stockline", name = %self.name);
        let _enter = span.enter();
        let started = Instant::now();

        let stage = Instant::now();
        let samples = decode_samples(bytes)?;
        tracing::debug!(
            bytes = bytes.len(),
            samples = samples.len(),
            elapsed = ?stage.elapsed(),
            "Decoded height samples"
        );

        let expected = self.dims.expected_samples();
        if samples.len() != expected {
            if self.strict_dimensions {
                check_sample_count(samples.len(), self.dims)?;
            }
            tracing::warn!(
                expected,
                actual = samples.len(),
                width = self.dims.width,
                depth = self.dims.depth,
                "Sample count does not fill the lattice, wrapping"
            );
        }

        let stage = Instant::now();
        let points = layout(&samples, self.dims);
        tracing::debug!(
            points = points.len(),
            elapsed = ?stage.elapsed(),
            "Laid out lattice points"
        );

        let stage = Instant::now();
        let triangles = self.triangulator.triangulate(&project(&points))?;
        tracing::debug!(
            triangulator = ?self.triangulator,
            triangles = triangles.len(),
            elapsed = ?stage.elapsed(),
            "Triangulated footprint"
        );

        let stage = Instant::now();
        let mesh = SurfaceMesh::assemble(&points, &triangles)?;
        tracing::debug!(
            vertices = mesh.vertex_count(),
            elapsed = ?stage.elapsed(),
            "Assembled mesh"
        );

        tracing::info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            elapsed = ?started.elapsed(),
            "Built stockline surface"
        );

        Ok(Surface {
            name: self.name.clone(),
            mesh,
            bands: self.bands,
            shading: self.shading,
        })
    }
}

/// A built stockline surface with its colouring.
#[derive(Debug, Clone)]
pub struct Surface {
    pub name: String,
    pub mesh: SurfaceMesh,
    pub bands: ColorBands,
    pub shading: SegmentShading,
}

impl Surface {
    /// Band colour for every vertex, by its world-space height.
    #[must_use]
    pub fn vertex_colors(&self) -> Vec<Vec4> {
        self.mesh
            .positions()
            .iter()
            .map(|p| self.bands.color_for(p.y))
            .collect()
    }

    /// Band colour for a world-space height.
    #[must_use]
    pub fn color_at(&self, height: f32) -> Vec4 {
        self.bands.color_for(height)
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.mesh.bounds()
    }

    /// Centre of the surface footprint at ground level.
    #[must_use]
    pub fn footprint_center(&self) -> Vec3 {
        let center = self.bounds().center();
        Vec3::new(center.x, 0.0, center.z)
    }
}
