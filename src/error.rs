//! Error types shared across the crate.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrackError>;

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A centroid listing could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The provider handed over a record outside the accepted domain.
    #[error("invalid centroid ({x}, {y}, {z}, weight {weight}): {reason}")]
    InvalidCentroid {
        x: i64,
        y: i64,
        z: i64,
        weight: i64,
        reason: &'static str,
    },

    /// A frame index past the end of the source was requested.
    #[error("frame {frame} out of range (source has {count} frames)")]
    FrameOutOfRange { frame: usize, count: usize },

    /// Frame headers in a listing skipped or repeated an index.
    #[error("expected frame {expected}, found frame {found}")]
    MissingFrame { expected: usize, found: usize },
}

impl TrackError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
