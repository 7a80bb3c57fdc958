//! Planar Delaunay triangulation of the lattice footprint.
//!
//! The lattice points are projected onto the `(x, z)` plane and
//! triangulated there; heights play no part in the topology.
//!
//! Two triangulators are provided:
//! - [`SweepHull`]: radial sweep with edge flips, O(n log n) expected
//! - [`BowyerWatson`]: incremental cavity insertion, O(n²), for small inputs
//!
//! Both return triangles that are counter-clockwise in the `(x, z)` plane.

mod bowyer_watson;
mod sweep;

pub use bowyer_watson::BowyerWatson;
pub use sweep::SweepHull;

use glam::DVec2;

use crate::LatticePoint;
use crate::error::{MeshError, MeshResult};

/// A 2D Delaunay triangulation strategy.
pub trait Triangulator {
    /// Triangulate a planar point set.
    ///
    /// Returns triangles as index triples into `points`, all
    /// counter-clockwise. Duplicate points are left unreferenced.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateInput`] for fewer than 3 points and
    /// [`MeshError::Triangulation`] when the points are coincident or
    /// collinear.
    fn triangulate(&self, points: &[DVec2]) -> MeshResult<Vec<[u32; 3]>>;
}

/// Selectable triangulation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum TriangulatorKind {
    #[default]
    SweepHull,
    BowyerWatson,
}

impl Triangulator for TriangulatorKind {
    fn triangulate(&self, points: &[DVec2]) -> MeshResult<Vec<[u32; 3]>> {
        match self {
            Self::SweepHull => SweepHull.triangulate(points),
            Self::BowyerWatson => BowyerWatson.triangulate(points),
        }
    }
}

/// Project lattice points onto the `(x, z)` plane, preserving order.
#[must_use]
pub fn project(points: &[LatticePoint]) -> Vec<DVec2> {
    points.iter().map(LatticePoint::projected).collect()
}

/// Triangulate lattice points with the default strategy.
///
/// # Errors
///
/// See [`Triangulator::triangulate`].
pub fn triangulate(points: &[LatticePoint]) -> MeshResult<Vec<[u32; 3]>> {
    TriangulatorKind::default().triangulate(&project(points))
}

/// Shared input checks for every strategy.
fn check_input(points: &[DVec2]) -> MeshResult<()> {
    if points.len() < 3 {
        return Err(MeshError::DegenerateInput {
            points: points.len(),
        });
    }
    if u32::try_from(points.len()).is_err() {
        return Err(MeshError::Triangulation {
            detail: format!("{} points exceed the u32 index range", points.len()),
        });
    }
    if let Some(point) = points.iter().find(|p| !p.is_finite()) {
        return Err(MeshError::Triangulation {
            detail: format!("non-finite point {point}"),
        });
    }
    Ok(())
}

fn collinear_error() -> MeshError {
    MeshError::Triangulation {
        detail: "all points are coincident or collinear".to_string(),
    }
}

/// Twice the signed area of `(a, b, c)`; positive when counter-clockwise.
fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

/// Circumcircle determinant of `(a, b, c)` against `p`.
///
/// Positive when `p` lies strictly inside the circumcircle of a
/// counter-clockwise triangle (negative for a clockwise one), zero when
/// the four points are cocircular.
fn in_circle(a: DVec2, b: DVec2, c: DVec2, p: DVec2) -> f64 {
    let d = a - p;
    let e = b - p;
    let f = c - p;
    let ap = d.length_squared();
    let bp = e.length_squared();
    let cp = f.length_squared();
    d.x * (e.y * cp - bp * f.y) - d.y * (e.x * cp - bp * f.x) + ap * (e.x * f.y - e.y * f.x)
}

/// Circumcentre offset of `(a, b, c)` relative to `a`.
///
/// Components are infinite or NaN when the points are collinear.
fn circumcenter_offset(a: DVec2, b: DVec2, c: DVec2) -> DVec2 {
    let e = b - a;
    let f = c - a;
    let bl = e.length_squared();
    let cl = f.length_squared();
    let d = 0.5 / e.perp_dot(f);
    DVec2::new((f.y * bl - e.y * cl) * d, (e.x * cl - f.x * bl) * d)
}

fn circumradius_squared(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    circumcenter_offset(a, b, c).length_squared()
}

fn circumcenter(a: DVec2, b: DVec2, c: DVec2) -> DVec2 {
    a + circumcenter_offset(a, b, c)
}

/// Index conversion for inputs already checked by [`check_input`].
#[allow(clippy::cast_possible_truncation)]
fn index(i: usize) -> u32 {
    i as u32
}
