//! Radial sweep-hull triangulation.

use std::cmp::Ordering;

use glam::DVec2;

use super::{
    Triangulator, check_input, circumcenter, circumradius_squared, collinear_error, in_circle,
    index, orient,
};
use crate::error::MeshResult;

/// Marker for a missing half-edge or hash slot.
const EMPTY: usize = usize::MAX;

/// Points closer than this to the previously inserted point are skipped.
const DUPLICATE_EPSILON: f64 = f64::EPSILON;

/// Initial room for pending edge flips; the stack grows past it as needed.
const EDGE_STACK_CAPACITY: usize = 512;

/// Sweep-hull Delaunay triangulator.
///
/// Seeds a triangle near the centre of the point set, then inserts the
/// remaining points in order of distance from the seed circumcentre. Each
/// point is connected to the hull edges it can see and the new triangles are
/// legalized with edge flips. A pseudo-angle hash over the hull keeps the
/// visible-edge lookup close to constant time, for O(n log n) expected
/// overall (dominated by the sort).
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepHull;

impl Triangulator for SweepHull {
    fn triangulate(&self, points: &[DVec2]) -> MeshResult<Vec<[u32; 3]>> {
        check_input(points)?;

        let seed = Seed::find(points)?;
        let mut sweep = Sweep::new(points, &seed);
        sweep.run(&seed);

        // Construction winds triangles clockwise; reverse to counter-clockwise.
        Ok(sweep
            .triangles
            .chunks_exact(3)
            .map(|t| [index(t[0]), index(t[2]), index(t[1])])
            .collect())
    }
}

/// Initial triangle of the sweep.
struct Seed {
    i0: usize,
    i1: usize,
    i2: usize,
    center: DVec2,
}

impl Seed {
    fn find(points: &[DVec2]) -> MeshResult<Self> {
        let (min, max) = points.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(min, max), &p| (min.min(p), max.max(p)),
        );
        let bbox_center = (min + max) * 0.5;

        // Seed point closest to the centre of the bounding box.
        let mut i0 = 0;
        let mut min_dist = f64::INFINITY;
        for (i, p) in points.iter().enumerate() {
            let d = p.distance_squared(bbox_center);
            if d < min_dist {
                i0 = i;
                min_dist = d;
            }
        }
        let p0 = points[i0];

        // Closest distinct point to the seed.
        let mut i1 = EMPTY;
        min_dist = f64::INFINITY;
        for (i, p) in points.iter().enumerate() {
            if i == i0 {
                continue;
            }
            let d = p.distance_squared(p0);
            if d < min_dist && d > 0.0 {
                i1 = i;
                min_dist = d;
            }
        }
        if i1 == EMPTY {
            return Err(collinear_error());
        }
        let p1 = points[i1];

        // Third point forming the smallest circumcircle with the first two.
        let mut i2 = EMPTY;
        let mut min_radius = f64::INFINITY;
        for (i, &p) in points.iter().enumerate() {
            if i == i0 || i == i1 {
                continue;
            }
            let r = circumradius_squared(p0, p1, p);
            if r < min_radius {
                i2 = i;
                min_radius = r;
            }
        }
        if i2 == EMPTY {
            return Err(collinear_error());
        }

        // Clockwise seed, matching the winding used during construction.
        if orient(p0, p1, points[i2]) > 0.0 {
            std::mem::swap(&mut i1, &mut i2);
        }

        let center = circumcenter(p0, points[i1], points[i2]);
        Ok(Self { i0, i1, i2, center })
    }
}

/// Working state of one sweep.
struct Sweep<'a> {
    points: &'a [DVec2],
    center: DVec2,
    /// Vertex triples of clockwise triangles.
    triangles: Vec<usize>,
    /// Opposite half-edge of each half-edge, or `EMPTY` on the hull.
    halfedges: Vec<usize>,
    hull_prev: Vec<usize>,
    hull_next: Vec<usize>,
    /// Half-edge of the hull edge starting at each hull vertex.
    hull_tri: Vec<usize>,
    hull_hash: Vec<usize>,
    hull_start: usize,
    edge_stack: Vec<usize>,
}

impl<'a> Sweep<'a> {
    fn new(points: &'a [DVec2], seed: &Seed) -> Self {
        let n = points.len();
        let max_triangles = (2 * n).saturating_sub(5).max(1);

        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let hash_size = ((n as f64).sqrt().ceil() as usize).max(1);

        let mut sweep = Self {
            points,
            center: seed.center,
            triangles: Vec::with_capacity(max_triangles * 3),
            halfedges: Vec::with_capacity(max_triangles * 3),
            hull_prev: vec![0; n],
            hull_next: vec![0; n],
            hull_tri: vec![0; n],
            hull_hash: vec![EMPTY; hash_size],
            hull_start: seed.i0,
            edge_stack: Vec::with_capacity(EDGE_STACK_CAPACITY),
        };

        let Seed { i0, i1, i2, .. } = *seed;
        sweep.hull_next[i0] = i1;
        sweep.hull_prev[i2] = i1;
        sweep.hull_next[i1] = i2;
        sweep.hull_prev[i0] = i2;
        sweep.hull_next[i2] = i0;
        sweep.hull_prev[i1] = i0;

        sweep.hull_tri[i0] = 0;
        sweep.hull_tri[i1] = 1;
        sweep.hull_tri[i2] = 2;

        for i in [i0, i1, i2] {
            let key = sweep.hash_key(points[i]);
            sweep.hull_hash[key] = i;
        }

        sweep.add_triangle(i0, i1, i2, EMPTY, EMPTY, EMPTY);
        sweep
    }

    fn run(&mut self, seed: &Seed) {
        let points = self.points;

        // Insertion order: distance from the seed circumcentre, then x, y and
        // index so that exact duplicates end up adjacent.
        let dists: Vec<f64> = points
            .iter()
            .map(|p| p.distance_squared(self.center))
            .collect();
        let mut ids: Vec<usize> = (0..points.len()).collect();
        ids.sort_unstable_by(|&a, &b| {
            dists[a]
                .total_cmp(&dists[b])
                .then_with(|| points[a].x.total_cmp(&points[b].x))
                .then_with(|| points[a].y.total_cmp(&points[b].y))
                .then_with(|| a.cmp(&b))
        });

        let mut previous: Option<DVec2> = None;
        for i in ids {
            let p = points[i];

            let duplicate = previous.is_some_and(|prev| {
                (p.x - prev.x).abs() <= DUPLICATE_EPSILON && (p.y - prev.y).abs() <= DUPLICATE_EPSILON
            });
            if duplicate {
                continue;
            }
            previous = Some(p);

            if i == seed.i0 || i == seed.i1 || i == seed.i2 {
                continue;
            }

            self.insert(i, p);
        }
    }

    /// Connect a point outside the current hull to every hull edge it sees.
    fn insert(&mut self, i: usize, p: DVec2) {
        let points = self.points;

        let Some(start) = self.find_visible_start(p) else {
            return;
        };

        let mut e = start;
        loop {
            let q = self.hull_next[e];
            if orient(p, points[e], points[q]) > 0.0 {
                break;
            }
            e = q;
            if e == start {
                // No visible edge: a near-duplicate of a hull vertex.
                return;
            }
        }

        // First triangle from the point, then flip until Delaunay.
        let mut t = self.add_triangle(e, i, self.hull_next[e], EMPTY, EMPTY, self.hull_tri[e]);
        self.hull_tri[i] = self.legalize(t + 2);
        self.hull_tri[e] = t;

        // Walk forward through the hull.
        let mut n = self.hull_next[e];
        loop {
            let q = self.hull_next[n];
            if orient(p, points[n], points[q]) <= 0.0 {
                break;
            }
            t = self.add_triangle(n, i, q, self.hull_tri[i], EMPTY, self.hull_tri[n]);
            self.hull_tri[i] = self.legalize(t + 2);
            self.hull_next[n] = n;
            n = q;
        }

        // Walk backward from the other side.
        if e == start {
            loop {
                let q = self.hull_prev[e];
                if orient(p, points[q], points[e]) <= 0.0 {
                    break;
                }
                t = self.add_triangle(q, i, e, EMPTY, self.hull_tri[e], self.hull_tri[q]);
                self.legalize(t + 2);
                self.hull_tri[q] = t;
                self.hull_next[e] = e;
                e = q;
            }
        }

        self.hull_start = e;
        self.hull_prev[i] = e;
        self.hull_next[e] = i;
        self.hull_prev[n] = i;
        self.hull_next[i] = n;

        let key = self.hash_key(p);
        self.hull_hash[key] = i;
        let key = self.hash_key(points[e]);
        self.hull_hash[key] = e;
    }

    /// Hull vertex preceding the first candidate edge for `p`.
    fn find_visible_start(&self, p: DVec2) -> Option<usize> {
        let size = self.hull_hash.len();
        let key = self.hash_key(p);
        let start = (0..size)
            .map(|j| self.hull_hash[(key + j) % size])
            .find(|&s| s != EMPTY && s != self.hull_next[s])
            .unwrap_or(self.hull_start);
        let start = self.hull_prev[start];
        (start != EMPTY).then_some(start)
    }

    /// Restore the Delaunay condition across half-edge `a`.
    ///
    /// Returns the half-edge that ends up opposite the last checked edge;
    /// callers use it as the hull edge of the inserted point.
    fn legalize(&mut self, mut a: usize) -> usize {
        let points = self.points;
        let mut ar;

        loop {
            let b = self.halfedges[a];
            let a0 = a - a % 3;
            ar = a0 + (a + 2) % 3;

            if b == EMPTY {
                match self.edge_stack.pop() {
                    Some(next) => {
                        a = next;
                        continue;
                    }
                    None => break,
                }
            }

            let b0 = b - b % 3;
            let al = a0 + (a + 1) % 3;
            let bl = b0 + (b + 2) % 3;

            let p0 = self.triangles[ar];
            let pr = self.triangles[a];
            let pl = self.triangles[al];
            let p1 = self.triangles[bl];

            // Clockwise triangles: a negative determinant puts p1 inside.
            let illegal = in_circle(points[p0], points[pr], points[pl], points[p1]) < 0.0;

            if illegal {
                self.triangles[a] = p1;
                self.triangles[b] = p0;

                let hbl = self.halfedges[bl];

                // Edge swapped on the other side of the hull; fix the reference.
                if hbl == EMPTY {
                    let mut e = self.hull_start;
                    loop {
                        if self.hull_tri[e] == bl {
                            self.hull_tri[e] = a;
                            break;
                        }
                        e = self.hull_prev[e];
                        if e == self.hull_start {
                            break;
                        }
                    }
                }

                self.link(a, hbl);
                self.link(b, self.halfedges[ar]);
                self.link(ar, bl);

                let br = b0 + (b + 1) % 3;
                self.edge_stack.push(br);
            } else {
                match self.edge_stack.pop() {
                    Some(next) => a = next,
                    None => break,
                }
            }
        }

        ar
    }

    fn add_triangle(
        &mut self,
        i0: usize,
        i1: usize,
        i2: usize,
        a: usize,
        b: usize,
        c: usize,
    ) -> usize {
        let t = self.triangles.len();
        self.triangles.extend([i0, i1, i2]);
        self.halfedges.extend([EMPTY; 3]);
        self.link(t, a);
        self.link(t + 1, b);
        self.link(t + 2, c);
        t
    }

    fn link(&mut self, a: usize, b: usize) {
        self.halfedges[a] = b;
        if b != EMPTY {
            self.halfedges[b] = a;
        }
    }

    fn hash_key(&self, p: DVec2) -> usize {
        let size = self.hull_hash.len();
        let d = p - self.center;

        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let key = (pseudo_angle(d) * size as f64).floor() as usize;
        key % size
    }
}

/// Monotonic stand-in for the angle of `d`, in `[0, 1]`.
fn pseudo_angle(d: DVec2) -> f64 {
    let sum = d.x.abs() + d.y.abs();
    if sum == 0.0 {
        return 0.0;
    }
    let p = d.x / sum;
    match d.y.partial_cmp(&0.0) {
        Some(Ordering::Greater) => (3.0 - p) / 4.0,
        _ => (1.0 + p) / 4.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudo_angle_is_monotonic() {
        let angles: Vec<f64> = [
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, -1.0),
            DVec2::new(-1.0, 0.0),
            DVec2::new(0.0, 1.0),
        ]
        .into_iter()
        .map(pseudo_angle)
        .collect();
        // (1, 0) -> 0.5, (0, -1) -> 0.25, (-1, 0) -> 0.0, (0, 1) -> 0.75.
        assert_eq!(angles, vec![0.5, 0.25, 0.0, 0.75]);
        assert!(pseudo_angle(DVec2::ZERO).abs() < f64::EPSILON);
    }

    #[test]
    fn test_seed_is_clockwise() {
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(5.0, 4.0),
            DVec2::new(5.0, 1.0),
        ];
        let seed = Seed::find(&points).unwrap();
        assert!(orient(points[seed.i0], points[seed.i1], points[seed.i2]) < 0.0);
    }

    #[test]
    fn test_square_with_interior_points() {
        let points = [
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(0.0, 10.0),
            DVec2::new(10.0, 10.0),
            DVec2::new(5.0, 5.0),
            DVec2::new(2.0, 7.0),
        ];
        let triangles = SweepHull.triangulate(&points).unwrap();
        // 6 points, 4 on the hull: 2n - 2 - h = 6 triangles.
        assert_eq!(triangles.len(), 6);
    }

    #[test]
    fn test_convex_curve_keeps_every_flip() {
        // Points on y = x² are all on the hull and no four are cocircular,
        // so the triangulation is unique and needs long flip chains.
        let points: Vec<DVec2> = (0..120)
            .map(|x| DVec2::new(f64::from(x), f64::from(x * x)))
            .collect();
        let triangles = SweepHull.triangulate(&points).unwrap();
        assert_eq!(triangles.len(), points.len() - 2);
        for t in &triangles {
            let [a, b, c] = t.map(|i| points[i as usize]);
            assert!(orient(a, b, c) > 0.0);
            for &p in &points {
                assert!(in_circle(a, b, c, p) <= 0.0);
            }
        }
    }
}
