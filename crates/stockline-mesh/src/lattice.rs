//! Lattice layout of height samples.

use crate::error::{MeshError, MeshResult};
use crate::{GridDimensions, LatticePoint};

/// Walk of lattice coordinates in sample order.
///
/// Two cyclic counters are kept: `x` with period `width` and `z` with
/// period `depth`. After each sample `x` advances; when it reaches `width`
/// it resets to 0 and `z` advances, and when `z` reaches `depth` it resets
/// to 0 as well. The walk never ends, so sample streams longer than the
/// lattice reuse coordinates from the start.
#[derive(Debug, Clone)]
pub struct LatticeWalk {
    dims: GridDimensions,
    x: u32,
    z: u32,
}

impl LatticeWalk {
    #[must_use]
    pub fn new(dims: GridDimensions) -> Self {
        Self { dims, x: 0, z: 0 }
    }
}

impl Iterator for LatticeWalk {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let current = (self.x, self.z);

        self.x += 1;
        if self.x >= self.dims.width {
            self.x = 0;
            self.z += 1;
            if self.z >= self.dims.depth {
                self.z = 0;
            }
        }

        Some(current)
    }
}

/// Place samples on the lattice in order.
///
/// Always returns exactly `samples.len()` points. Sample counts that do not
/// match `width * depth` wrap around; see [`check_sample_count`] to reject
/// them instead.
#[must_use]
pub fn layout(samples: &[f32], dims: GridDimensions) -> Vec<LatticePoint> {
    samples
        .iter()
        .zip(LatticeWalk::new(dims))
        .map(|(&height, (x, z))| LatticePoint::new(x, height, z))
        .collect()
}

/// Check that a sample stream fills the lattice exactly once.
///
/// # Errors
///
/// Returns an error if `len` differs from `dims.width * dims.depth`.
pub fn check_sample_count(len: usize, dims: GridDimensions) -> MeshResult<()> {
    let expected = dims.expected_samples();
    if len == expected {
        Ok(())
    } else {
        Err(MeshError::DimensionMismatch {
            expected,
            actual: len,
        })
    }
}
