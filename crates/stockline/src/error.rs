//! Error types for the stockline crate.

use std::fmt;

use stockline_mesh::MeshError;

/// Result type for stockline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading stockline surfaces.
#[derive(Debug)]
pub enum Error {
    /// Fetching the raw height stream failed.
    Source {
        /// The key that was requested.
        key: String,
        /// The error message.
        message: String,
    },
    /// Building the surface failed.
    Mesh(MeshError),
    /// Configuration could not be parsed.
    Config {
        /// The error message.
        message: String,
    },
    /// The background worker could not be started.
    Worker {
        /// The error message.
        message: String,
    },
    /// The background worker stopped without reporting a result.
    WorkerLost,
}

impl Error {
    /// Whether the height stream itself was unavailable or unreadable.
    #[must_use]
    pub fn is_malformed_stream(&self) -> bool {
        matches!(
            self,
            Error::Source { .. } | Error::Mesh(MeshError::MalformedStream { .. })
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Source { key, message } => {
                write!(f, "failed to fetch {key}: {message}")
            }
            Error::Mesh(e) => write!(f, "surface error: {e}"),
            Error::Config { message } => write!(f, "invalid configuration: {message}"),
            Error::Worker { message } => write!(f, "failed to start worker: {message}"),
            Error::WorkerLost => write!(f, "worker stopped without a result"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Mesh(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MeshError> for Error {
    fn from(e: MeshError) -> Self {
        Error::Mesh(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config {
            message: e.to_string(),
        }
    }
}
