//! Surface mesh assembly.

use glam::Vec3;

use crate::LatticePoint;
use crate::error::{MeshError, MeshResult};
use crate::normals::compute_vertex_normals;

/// Axis-aligned bounds of a mesh in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Smallest bounds containing every point, or zero bounds when empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some((&first, rest)) = points.split_first() else {
            return Self::default();
        };
        rest.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |bounds, &p| Self {
                min: bounds.min.min(p),
                max: bounds.max.max(p),
            },
        )
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// A triangulated stockpile surface ready for upload.
///
/// Indices form a flat triangle list wound so that the surface faces `+y`.
/// Normals are per vertex, one for each position.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    normals: Vec<Vec3>,
}

impl SurfaceMesh {
    /// Assemble a mesh from lattice points and their footprint triangulation.
    ///
    /// `triangles` must be counter-clockwise in the `(x, z)` plane, as
    /// returned by the triangulators. Each `(a, b, c)` is emitted as
    /// `(a, c, b)` so the face normal points up.
    ///
    /// # Errors
    ///
    /// Returns an error if any index is not a valid point index.
    pub fn assemble(points: &[LatticePoint], triangles: &[[u32; 3]]) -> MeshResult<Self> {
        let len = points.len();
        if let Some(&index) = triangles
            .iter()
            .flatten()
            .find(|&&i| i as usize >= len)
        {
            return Err(MeshError::IndexOutOfBounds {
                index: index as usize,
                len,
            });
        }

        let positions: Vec<Vec3> = points.iter().map(LatticePoint::position).collect();
        let indices: Vec<u32> = triangles.iter().flat_map(|&[a, b, c]| [a, c, b]).collect();
        let normals = compute_vertex_normals(&positions, &indices);

        Ok(Self {
            positions,
            indices,
            normals,
        })
    }

    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[must_use]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as vertex index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.positions)
    }

    /// Positions as a flat attribute buffer.
    #[must_use]
    pub fn position_buffer(&self) -> Vec<[f32; 3]> {
        self.positions.iter().map(|p| p.to_array()).collect()
    }

    /// Normals as a flat attribute buffer.
    #[must_use]
    pub fn normal_buffer(&self) -> Vec<[f32; 3]> {
        self.normals.iter().map(|n| n.to_array()).collect()
    }
}
