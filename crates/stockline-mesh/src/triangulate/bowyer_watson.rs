//! Incremental Bowyer-Watson triangulation.

use std::collections::{HashMap, HashSet};

use glam::DVec2;
use robust::Coord;

use super::{Triangulator, check_input, collinear_error, index};
use crate::error::MeshResult;

/// Vertex at infinity closing every hull edge into a ghost triangle.
const GHOST: usize = usize::MAX;

/// Bowyer-Watson Delaunay triangulator.
///
/// Points are inserted in input order. Each insertion locates a triangle
/// containing the new point, grows the cavity outward across edges into
/// neighbours whose circumcircle strictly contains the point, and re-fans the
/// cavity around it. Hull edges are represented by ghost triangles, so points
/// outside the current hull need no enclosing super-triangle.
///
/// Orientation and in-circle tests use exact adaptive predicates, so
/// near-cocircular float input still yields a valid triangulation.
///
/// Point location scans all triangles, making this O(n²). Intended for small
/// inputs and as a cross-check of [`SweepHull`](super::SweepHull); full
/// stockline grids should use the sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct BowyerWatson;

impl Triangulator for BowyerWatson {
    fn triangulate(&self, points: &[DVec2]) -> MeshResult<Vec<[u32; 3]>> {
        check_input(points)?;

        let [a, b, c] = seed_triangle(points)?;
        let mut mesh = Triangulation::default();
        for t in [[a, b, c], [b, a, GHOST], [c, b, GHOST], [a, c, GHOST]] {
            mesh.add(t);
        }

        let mut inserted: HashSet<(u64, u64)> = HashSet::with_capacity(points.len());
        for &i in &[a, b, c] {
            inserted.insert(key(points[i]));
        }

        for (i, &p) in points.iter().enumerate() {
            if !inserted.insert(key(p)) {
                continue;
            }
            mesh.insert(points, i);
        }

        Ok(mesh
            .live()
            .filter(|t| t[2] != GHOST)
            .map(|t| t.map(index))
            .collect())
    }
}

/// Triangles with edge adjacency.
///
/// Removed triangles stay in `triangles` as dead slots so ids are stable
/// while a cavity is being replaced.
#[derive(Default)]
struct Triangulation {
    triangles: Vec<[usize; 3]>,
    alive: Vec<bool>,
    /// Directed edge to the triangle that owns it.
    edges: HashMap<(usize, usize), usize>,
}

impl Triangulation {
    fn add(&mut self, t: [usize; 3]) {
        let id = self.triangles.len();
        for edge in edges_of(t) {
            self.edges.insert(edge, id);
        }
        self.triangles.push(t);
        self.alive.push(true);
    }

    fn remove(&mut self, id: usize) {
        self.alive[id] = false;
        for edge in edges_of(self.triangles[id]) {
            if self.edges.get(&edge) == Some(&id) {
                self.edges.remove(&edge);
            }
        }
    }

    /// Triangle on the other side of directed edge `(u, v)`.
    fn neighbour(&self, (u, v): (usize, usize)) -> Option<usize> {
        self.edges.get(&(v, u)).copied()
    }

    fn live_ids(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.triangles.len()).filter(|&id| self.alive[id])
    }

    fn live(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.live_ids().map(|id| self.triangles[id])
    }

    /// A triangle in conflict with `p` to start the cavity from.
    ///
    /// Prefers a real triangle containing `p`; points outside the hull start
    /// from a ghost whose hull edge they see.
    fn locate(&self, points: &[DVec2], p: DVec2) -> Option<usize> {
        let mut outside = None;
        for id in self.live_ids() {
            let [a, b, c] = self.triangles[id];
            if c == GHOST {
                if outside.is_none() && orient(points[a], points[b], p) > 0.0 {
                    outside = Some(id);
                }
                continue;
            }
            let (a, b, c) = (points[a], points[b], points[c]);
            if orient(a, b, p) >= 0.0 && orient(b, c, p) >= 0.0 && orient(c, a, p) >= 0.0 {
                return Some(id);
            }
        }
        outside
    }

    /// Insert point `i`, replacing the cavity of triangles in conflict with it.
    ///
    /// The cavity is grown by adjacency, so it stays connected. Any real
    /// boundary edge that does not strictly face `i` pulls in the triangle
    /// behind it, so every new triangle is counter-clockwise.
    fn insert(&mut self, points: &[DVec2], i: usize) {
        let p = points[i];
        let Some(start) = self.locate(points, p) else {
            return;
        };

        let mut in_cavity = HashSet::from([start]);
        let mut cavity = vec![start];
        let mut next = 0;
        let boundary = loop {
            while next < cavity.len() {
                let t = self.triangles[cavity[next]];
                next += 1;
                for edge in edges_of(t) {
                    let Some(n) = self.neighbour(edge) else {
                        continue;
                    };
                    if !in_cavity.contains(&n) && in_conflict(points, self.triangles[n], p) {
                        in_cavity.insert(n);
                        cavity.push(n);
                    }
                }
            }

            let boundary: Vec<(usize, usize)> = cavity
                .iter()
                .flat_map(|&id| edges_of(self.triangles[id]))
                .filter(|&edge| {
                    self.neighbour(edge)
                        .is_none_or(|n| !in_cavity.contains(&n))
                })
                .collect();

            let mut hidden = Vec::new();
            for &(u, v) in &boundary {
                if u == GHOST || v == GHOST || orient(points[u], points[v], p) > 0.0 {
                    continue;
                }
                match self.neighbour((u, v)) {
                    Some(n) => hidden.push(n),
                    None => return,
                }
            }
            if hidden.is_empty() {
                break boundary;
            }
            for n in hidden {
                if in_cavity.insert(n) {
                    cavity.push(n);
                }
            }
        };

        if boundary.is_empty() {
            return;
        }

        for &id in &cavity {
            self.remove(id);
        }
        for (u, v) in boundary {
            // Keep the ghost vertex last so it is easy to test for.
            self.add(match (u, v) {
                (GHOST, v) => [v, i, GHOST],
                (u, GHOST) => [i, u, GHOST],
                (u, v) => [u, v, i],
            });
        }
    }
}

fn edges_of([a, b, c]: [usize; 3]) -> [(usize, usize); 3] {
    [(a, b), (b, c), (c, a)]
}

/// First non-degenerate triangle in input order, counter-clockwise.
fn seed_triangle(points: &[DVec2]) -> MeshResult<[usize; 3]> {
    let a = 0;
    let b = points
        .iter()
        .position(|&p| p != points[a])
        .ok_or_else(collinear_error)?;
    let c = points
        .iter()
        .position(|&p| orient(points[a], points[b], p) != 0.0)
        .ok_or_else(collinear_error)?;

    if orient(points[a], points[b], points[c]) > 0.0 {
        Ok([a, b, c])
    } else {
        Ok([a, c, b])
    }
}

/// Whether `p` lies strictly inside the circumcircle of `t`.
///
/// For a ghost triangle the "circumcircle" is the open half-plane beyond its
/// hull edge, plus the open edge itself.
fn in_conflict(points: &[DVec2], t: [usize; 3], p: DVec2) -> bool {
    let [a, b, c] = t;
    if c == GHOST {
        let (u, v) = (points[a], points[b]);
        let side = orient(u, v, p);
        return side > 0.0 || (side == 0.0 && (u - p).dot(v - p) < 0.0);
    }
    in_circle(points[a], points[b], points[c], p) > 0.0
}

fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Exact orientation: positive when `a`, `b`, `c` turn counter-clockwise.
fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    robust::orient2d(coord(a), coord(b), coord(c))
}

/// Exact in-circle test: positive when `p` is inside counter-clockwise `a, b, c`.
fn in_circle(a: DVec2, b: DVec2, c: DVec2, p: DVec2) -> f64 {
    robust::incircle(coord(a), coord(b), coord(c), coord(p))
}

/// Hashable identity of a point; `-0.0` and `0.0` compare equal.
fn key(p: DVec2) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}
