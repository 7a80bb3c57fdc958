//! Height-banded colour ramp.
//!
//! Heights are split into bands of a fixed interval `I`. Below `-I` the
//! surface is solid blue and above `6I` solid red; in between each band
//! blends linearly between two anchor colours:
//!
//! | band | heights | colour |
//! |---|---|---|
//! | [`HeightBand::Deep`] | `h <= -I` | blue |
//! | [`HeightBand::Shallow`] | `(-I, 0]` | blue to cyan |
//! | [`HeightBand::Low`] | `(0, I]` | cyan to green |
//! | [`HeightBand::LowMid`] | `(I, 2I]` | green to light green |
//! | [`HeightBand::Mid`] | `(2I, 3I]` | light green to yellow |
//! | [`HeightBand::HighMid`] | `(3I, 4I]` | yellow to dark yellow |
//! | [`HeightBand::High`] | `(4I, 5I]` | dark yellow to orange |
//! | [`HeightBand::Peak`] | `(5I, 6I]` | orange to red |
//! | [`HeightBand::Summit`] | `h > 6I` | red |

use glam::Vec4;

use crate::error::{MeshError, MeshResult};

/// Named height band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeightBand {
    Deep,
    Shallow,
    Low,
    LowMid,
    Mid,
    HighMid,
    High,
    Peak,
    /// Everything above the top band, including NaN heights.
    Summit,
}

/// Colour ramp for a fixed band interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBands {
    interval: f32,
}

impl Default for ColorBands {
    fn default() -> Self {
        Self { interval: 1.0 }
    }
}

impl ColorBands {
    /// Create a colour ramp with the given band width.
    ///
    /// # Errors
    ///
    /// Returns an error if `interval` is not finite or not positive.
    pub fn new(interval: f32) -> MeshResult<Self> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(MeshError::InvalidConfig {
                context: "color bands",
                detail: format!("interval must be finite and positive, got {interval}"),
            });
        }
        Ok(Self { interval })
    }

    #[must_use]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Band containing `height`.
    #[must_use]
    pub fn band_for(&self, height: f32) -> HeightBand {
        let i = self.interval;
        if height <= -i {
            HeightBand::Deep
        } else if height <= 0.0 {
            HeightBand::Shallow
        } else if height <= i {
            HeightBand::Low
        } else if height <= 2.0 * i {
            HeightBand::LowMid
        } else if height <= 3.0 * i {
            HeightBand::Mid
        } else if height <= 4.0 * i {
            HeightBand::HighMid
        } else if height <= 5.0 * i {
            HeightBand::High
        } else if height <= 6.0 * i {
            HeightBand::Peak
        } else {
            HeightBand::Summit
        }
    }

    /// RGBA colour for `height`.
    #[must_use]
    pub fn color_for(&self, height: f32) -> Vec4 {
        let i = self.interval;
        // Position inside the band starting at `start * I`.
        let t = |start: f32| (height - start * i) / i;

        match self.band_for(height) {
            HeightBand::Deep => Vec4::new(0.0, 0.0, 1.0, 1.0),
            HeightBand::Shallow => Vec4::new(0.0, 1.0 + height / i, 1.0, 1.0),
            HeightBand::Low => Vec4::new(0.0, 1.0, 1.0 - height / i, 1.0),
            HeightBand::LowMid => Vec4::new(0.5 * t(1.0), 1.0, 0.0, 1.0),
            HeightBand::Mid => Vec4::new(0.5 + 0.5 * t(2.0), 1.0, 0.0, 1.0),
            HeightBand::HighMid => Vec4::new(1.0, 1.0 - 0.24 * t(3.0), 0.0, 1.0),
            HeightBand::High => Vec4::new(1.0, 0.76 - 0.18 * t(4.0), 0.0, 1.0),
            HeightBand::Peak => Vec4::new(1.0, 0.58 - 0.58 * t(5.0), 0.0, 1.0),
            HeightBand::Summit => Vec4::new(1.0, 0.0, 0.0, 1.0),
        }
    }
}

/// RGBA colour for `height` with band width `interval`.
///
/// # Errors
///
/// Returns an error if `interval` is not finite or not positive.
pub fn color_for(height: f32, interval: f32) -> MeshResult<Vec4> {
    Ok(ColorBands::new(interval)?.color_for(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_color(actual: Vec4, expected: [f32; 4]) {
        let expected = Vec4::from_array(expected);
        assert!(
            (actual - expected).abs().max_element() < 1e-5,
            "{actual} != {expected}"
        );
    }

    #[test]
    fn test_band_anchors() {
        let bands = ColorBands::new(1.0).unwrap();
        assert_color(bands.color_for(-1.0), [0.0, 0.0, 1.0, 1.0]);
        assert_color(bands.color_for(0.0), [0.0, 1.0, 1.0, 1.0]);
        assert_color(bands.color_for(1.0), [0.0, 1.0, 0.0, 1.0]);
        assert_color(bands.color_for(2.0), [0.5, 1.0, 0.0, 1.0]);
        assert_color(bands.color_for(3.0), [1.0, 1.0, 0.0, 1.0]);
        assert_color(bands.color_for(4.0), [1.0, 0.76, 0.0, 1.0]);
        assert_color(bands.color_for(5.0), [1.0, 0.58, 0.0, 1.0]);
        assert_color(bands.color_for(6.0), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_band_midpoints() {
        let bands = ColorBands::new(2.0).unwrap();
        assert_color(bands.color_for(-1.0), [0.0, 0.5, 1.0, 1.0]);
        assert_color(bands.color_for(1.0), [0.0, 1.0, 0.5, 1.0]);
        assert_color(bands.color_for(3.0), [0.25, 1.0, 0.0, 1.0]);
        assert_color(bands.color_for(5.0), [0.75, 1.0, 0.0, 1.0]);
        assert_color(bands.color_for(7.0), [1.0, 0.88, 0.0, 1.0]);
        assert_color(bands.color_for(9.0), [1.0, 0.67, 0.0, 1.0]);
        assert_color(bands.color_for(11.0), [1.0, 0.29, 0.0, 1.0]);
    }

    #[test]
    fn test_band_edges_are_closed_above() {
        let bands = ColorBands::new(1.0).unwrap();
        assert_eq!(bands.band_for(-1.0), HeightBand::Deep);
        assert_eq!(bands.band_for(0.0), HeightBand::Shallow);
        assert_eq!(bands.band_for(1.0), HeightBand::Low);
        assert_eq!(bands.band_for(1.5), HeightBand::LowMid);
        assert_eq!(bands.band_for(3.0), HeightBand::Mid);
        assert_eq!(bands.band_for(3.5), HeightBand::HighMid);
        assert_eq!(bands.band_for(5.0), HeightBand::High);
        assert_eq!(bands.band_for(6.0), HeightBand::Peak);
        assert_eq!(bands.band_for(6.01), HeightBand::Summit);
    }

    #[test]
    fn test_extremes() {
        let bands = ColorBands::new(1.0).unwrap();
        assert_color(bands.color_for(-1000.0), [0.0, 0.0, 1.0, 1.0]);
        assert_color(bands.color_for(1000.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(bands.band_for(f32::NAN), HeightBand::Summit);
        assert_color(bands.color_for(f32::NAN), [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_continuous_between_bands() {
        let bands = ColorBands::new(1.0).unwrap();
        for edge in 0..6u8 {
            let h = f32::from(edge);
            let below = bands.color_for(h);
            let above = bands.color_for(h + 1e-4);
            assert!((below - above).abs().max_element() < 1e-3, "jump at {h}");
        }
    }

    #[test]
    fn test_invalid_interval() {
        for interval in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                ColorBands::new(interval),
                Err(MeshError::InvalidConfig {
                    context: "color bands",
                    ..
                })
            ));
            assert!(color_for(1.0, interval).is_err());
        }
    }

    #[test]
    fn test_free_function_matches_bands() {
        let bands = ColorBands::new(0.5).unwrap();
        assert_eq!(color_for(1.3, 0.5).unwrap(), bands.color_for(1.3));
        assert_color(color_for(0.0, 1.0).unwrap(), [0.0, 1.0, 1.0, 1.0]);
        assert_color(color_for(1.0, 1.0).unwrap(), [0.0, 1.0, 0.0, 1.0]);
    }
}
