//! Error types for surface building operations.

use std::fmt;

/// Errors that can occur while turning a height stream into a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The byte stream cannot be decoded (wrong length, unreadable source).
    MalformedStream {
        context: &'static str,
        detail: String,
    },
    /// Too few points to form a single triangle.
    DegenerateInput { points: usize },
    /// The point set admits no triangulation (coincident or collinear).
    Triangulation { detail: String },
    /// A configuration value is out of range.
    InvalidConfig {
        context: &'static str,
        detail: String,
    },
    /// Sample count does not match the grid dimensions.
    DimensionMismatch { expected: usize, actual: usize },
    /// Index out of bounds.
    IndexOutOfBounds { index: usize, len: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedStream { context, detail } => {
                write!(f, "malformed stream in {context}: {detail}")
            }
            Self::DegenerateInput { points } => {
                write!(f, "degenerate input: {points} points, at least 3 required")
            }
            Self::Triangulation { detail } => write!(f, "triangulation failed: {detail}"),
            Self::InvalidConfig { context, detail } => {
                write!(f, "invalid {context} configuration: {detail}")
            }
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "sample count mismatch: grid expects {expected} samples, got {actual}"
                )
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Result type for surface building operations.
pub type MeshResult<T> = Result<T, MeshError>;
