//! Height sample decoding.

use crate::error::{MeshError, MeshResult};

/// Width of one encoded sample in bytes.
pub const SAMPLE_WIDTH: usize = 4;

/// Heights below this value are treated as empty ground.
pub const HEIGHT_FLOOR: f64 = 0.1;

/// Decode a flat little-endian `f32` stream into quantized height samples.
///
/// Input format: `N * 4` bytes, no header. Each sample is quantized with
/// [`quantize`]; sample order is preserved.
///
/// # Errors
///
/// Returns an error if the input length is not divisible by 4.
pub fn decode_samples(bytes: &[u8]) -> MeshResult<Vec<f32>> {
    if bytes.len() % SAMPLE_WIDTH != 0 {
        return Err(MeshError::MalformedStream {
            context: "samples",
            detail: format!(
                "stream length {} is not divisible by {SAMPLE_WIDTH}",
                bytes.len()
            ),
        });
    }

    let mut samples = Vec::with_capacity(bytes.len() / SAMPLE_WIDTH);
    for chunk in bytes.chunks_exact(SAMPLE_WIDTH) {
        let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        samples.push(quantize(value));
    }

    Ok(samples)
}

/// Quantize a raw height to whole tenths.
///
/// Values below 0.1 (and non-finite values) become 0; everything else is
/// multiplied by 10 and truncated toward zero. The multiply happens in
/// double precision.
#[must_use]
pub fn quantize(value: f32) -> f32 {
    let value = f64::from(value);
    if !value.is_finite() || value < HEIGHT_FLOOR {
        return 0.0;
    }

    // Quantized heights are whole numbers well inside f32's exact range for
    // any physical stockpile; larger values lose precision, never range.
    #[allow(clippy::cast_possible_truncation)]
    {
        (value * 10.0).trunc() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_decode_samples_empty() {
        let result = decode_samples(&[]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_decode_samples_below_floor() {
        let result = decode_samples(&encode(&[0.05])).unwrap();
        assert_eq!(result, vec![0.0]);
    }

    #[test]
    fn test_decode_samples_truncates() {
        // 2.34 * 10 = 23.4, truncated to 23.
        let result = decode_samples(&encode(&[2.34])).unwrap();
        assert_eq!(result, vec![23.0]);
    }

    #[test]
    fn test_decode_samples_preserves_order() {
        let result = decode_samples(&encode(&[1.0, 0.0, 3.99, 12.5])).unwrap();
        assert_eq!(result, vec![10.0, 0.0, 39.0, 125.0]);
    }

    #[test]
    fn test_decode_samples_little_endian() {
        // 1.5f32 is 0x3FC00000.
        let result = decode_samples(&[0x00, 0x00, 0xC0, 0x3F]).unwrap();
        assert_eq!(result, vec![15.0]);
    }

    #[test]
    fn test_decode_samples_invalid_length() {
        let result = decode_samples(&[1, 2, 3]);
        assert!(matches!(result, Err(MeshError::MalformedStream { .. })));

        let result = decode_samples(&[0; 9]);
        assert!(matches!(result, Err(MeshError::MalformedStream { .. })));
    }

    #[test]
    fn test_quantize_floor_boundary() {
        // 0.1f32 widens to 0.10000000149..., which is not below the floor.
        assert_eq!(quantize(0.1), 1.0);
        assert_eq!(quantize(0.099), 0.0);
    }

    #[test]
    fn test_quantize_negative_and_non_finite() {
        assert_eq!(quantize(-3.7), 0.0);
        assert_eq!(quantize(f32::NAN), 0.0);
        assert_eq!(quantize(f32::INFINITY), 0.0);
        assert_eq!(quantize(f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_quantize_does_not_round() {
        assert_eq!(quantize(0.19), 1.0);
        assert_eq!(quantize(7.96), 79.0);
    }
}
