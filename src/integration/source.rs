//! Trait for per-frame centroid providers.

use crate::error::TrackError;
use crate::tracker::Centroid;

/// Trait for upstream providers of per-frame centroids.
///
/// Implement this trait to feed the output of any segmentation step into the
/// trajectory pipeline.
///
/// # Example
///
/// ```ignore
/// use celltrack_rs::{CentroidSource, Centroid};
///
/// struct MySegmenter {
///     // Your volumes here
/// }
///
/// impl CentroidSource for MySegmenter {
///     type Error = std::io::Error;
///
///     fn frame_count(&self) -> usize {
///         4
///     }
///
///     fn centroids(&mut self, frame: usize) -> Result<Vec<Centroid>, Self::Error> {
///         // Label the volume and return one centroid per region
///         Ok(vec![])
///     }
/// }
/// ```
pub trait CentroidSource {
    /// Error type for provider failures.
    type Error;

    /// Number of frames available, indexed `0..frame_count()`.
    fn frame_count(&self) -> usize;

    /// Centroids of one frame, in the provider's stable order.
    fn centroids(&mut self, frame: usize) -> Result<Vec<Centroid>, Self::Error>;
}

impl CentroidSource for Vec<Vec<Centroid>> {
    type Error = TrackError;

    fn frame_count(&self) -> usize {
        self.len()
    }

    fn centroids(&mut self, frame: usize) -> Result<Vec<Centroid>, Self::Error> {
        self.get(frame)
            .cloned()
            .ok_or(TrackError::FrameOutOfRange {
                frame,
                count: self.len(),
            })
    }
}
