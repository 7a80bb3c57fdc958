//! Vertex normal generation.

use glam::Vec3;

/// Compute smooth per-vertex normals for an indexed triangle list.
///
/// Each triangle contributes its unnormalized face normal
/// `(p1 - p0) × (p2 - p0)` to its three vertices, so larger faces weigh
/// more. Vertices with no (or only degenerate) incident faces get
/// [`Vec3::Y`].
///
/// Indices are expected to be in range; trailing indices that do not form a
/// whole triangle are ignored.
#[must_use]
pub fn compute_vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (p0, p1, p2) = (positions[i0], positions[i1], positions[i2]);
        let face = (p1 - p0).cross(p2 - p0);
        normals[i0] += face;
        normals[i1] += face;
        normals[i2] += face;
    }

    for normal in &mut normals {
        *normal = normal.try_normalize().unwrap_or(Vec3::Y);
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn test_flat_quad_faces_up() {
        // Two triangles of a unit square at y = 0, wound to face +y.
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        let indices = [0, 2, 1, 1, 2, 3];
        let normals = compute_vertex_normals(&positions, &indices);
        for normal in normals {
            assert_close(normal, Vec3::Y);
        }
    }

    #[test]
    fn test_unreferenced_vertex_defaults_up() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::splat(5.0)];
        let normals = compute_vertex_normals(&positions, &[0, 2, 1]);
        assert_eq!(normals[3], Vec3::Y);
    }

    #[test]
    fn test_degenerate_triangle_defaults_up() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)];
        let normals = compute_vertex_normals(&positions, &[0, 1, 2]);
        assert!(normals.iter().all(|&n| n == Vec3::Y));
    }

    #[test]
    fn test_ridge_is_averaged() {
        // Two planes folded along the z axis: x in [-1, 0] rising to the
        // ridge at y = 1, x in [0, 1] falling away from it.
        let positions = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
        ];
        let indices = [
            0, 2, 1, 1, 2, 3, // left slope
            1, 3, 4, 4, 3, 5, // right slope
        ];
        let normals = compute_vertex_normals(&positions, &indices);

        let left = Vec3::new(-1.0, 1.0, 0.0).normalize();
        let right = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert_close(normals[0], left);
        assert_close(normals[2], left);
        assert_close(normals[4], right);
        assert_close(normals[5], right);
        // Each ridge vertex touches two faces of one slope and one of the
        // other; all faces have equal area.
        assert_close(normals[1], Vec3::new(-1.0, 3.0, 0.0).normalize());
        assert_close(normals[3], Vec3::new(1.0, 3.0, 0.0).normalize());
    }

    #[test]
    fn test_normals_are_unit_length() {
        let positions = [
            Vec3::new(0.0, 0.3, 0.0),
            Vec3::new(0.1, 0.7, 0.0),
            Vec3::new(0.0, 0.2, 0.1),
            Vec3::new(0.1, 0.0, 0.1),
        ];
        let normals = compute_vertex_normals(&positions, &[0, 2, 1, 1, 2, 3]);
        for normal in normals {
            assert!((normal.length() - 1.0).abs() < 1e-5);
        }
    }
}
