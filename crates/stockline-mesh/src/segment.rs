//! Segmentation shading.
//!
//! Renders a stockline as alternating red and blue slices along `x`, with a
//! little per-fragment noise, lit by a single point light. The slices show
//! where the stockline is divided into reclaim segments.

use glam::{Vec2, Vec3, Vec4};

use crate::error::{MeshError, MeshResult};

/// Default number of slices along the stockline.
pub const DEFAULT_SEGMENTS: u32 = 10;

/// Default stockline length covered by the slices, in world units.
pub const DEFAULT_LENGTH: f32 = 400.0;

const EVEN_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const ODD_COLOR: Vec3 = Vec3::new(0.0, 0.0, 1.0);
const SPECULAR_EXPONENT: f32 = 16.0;

/// Inputs for shading one fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// World-space position.
    pub position: Vec3,
    /// Unit surface normal.
    pub normal: Vec3,
    /// Window-space pixel coordinate, used to seed the noise.
    pub frag_coord: Vec2,
}

/// Parameters of the segmentation shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentShading {
    segments: u32,
    length: f32,
    pub metalness: f32,
    /// Carried for the material; the specular term uses a fixed exponent.
    pub roughness: f32,
    pub light_position: Vec3,
    pub ambient: f32,
    pub noise_strength: f32,
}

impl Default for SegmentShading {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            length: DEFAULT_LENGTH,
            metalness: 1.0,
            roughness: 0.5,
            light_position: Vec3::new(400.0, 100.0, 0.0),
            ambient: 0.6,
            noise_strength: 0.1,
        }
    }
}

impl SegmentShading {
    /// Create shading for `segments` slices over `length` world units.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero or `length` is not finite and
    /// positive.
    pub fn new(segments: u32, length: f32) -> MeshResult<Self> {
        if segments == 0 {
            return Err(MeshError::InvalidConfig {
                context: "segmentation",
                detail: "segment count must be positive".to_string(),
            });
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(MeshError::InvalidConfig {
                context: "segmentation",
                detail: format!("length must be finite and positive, got {length}"),
            });
        }
        Ok(Self {
            segments,
            length,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn segments(&self) -> u32 {
        self.segments
    }

    #[must_use]
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Length of one slice.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn segment_length(&self) -> f32 {
        self.length / self.segments as f32
    }

    /// Index of the slice containing `x`; negative before the origin.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn segment_index(&self, x: f32) -> i64 {
        (x / self.segment_length()).floor() as i64
    }

    /// Unlit slice colour at `x`: red for even slices, blue for odd ones.
    #[must_use]
    pub fn base_color(&self, x: f32) -> Vec3 {
        if self.segment_index(x).rem_euclid(2) == 0 {
            EVEN_COLOR
        } else {
            ODD_COLOR
        }
    }

    /// Lit colour of one fragment seen from `camera`.
    #[must_use]
    pub fn shade(&self, fragment: &Fragment, camera: Vec3) -> Vec4 {
        let color = self.base_color(fragment.position.x)
            + Vec3::splat(noise(fragment.frag_coord) * self.noise_strength);

        let light_dir = (self.light_position - fragment.position).normalize_or_zero();
        let diffuse = fragment.normal.dot(light_dir).max(0.0) + self.ambient;

        let reflect_dir = reflect(-light_dir, fragment.normal);
        let view_dir = (camera - fragment.position).normalize_or_zero();
        let spec = view_dir.dot(reflect_dir).max(0.0).powf(SPECULAR_EXPONENT);
        let specular = Vec3::ONE * self.metalness * spec;

        (color * diffuse + specular).extend(1.0)
    }
}

/// Hash noise in `[0, 1)` for a pixel coordinate.
#[must_use]
pub fn noise(frag: Vec2) -> f32 {
    let n = frag.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.547;
    // GLSL `fract`: `f32::fract` keeps the sign of negative inputs.
    n - n.floor()
}

/// Reflect `incident` about the plane with unit `normal`.
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}
