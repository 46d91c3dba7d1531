//! Provider reading one centroid file per frame from a directory.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, TrackError};
use crate::integration::listing::parse_frame;
use crate::integration::source::CentroidSource;
use crate::tracker::Centroid;

/// Per-frame files named `<naming><index>.<extension>` for an inclusive
/// index range, e.g. `stack-0.txt` to `stack-4.txt`.
///
/// Frame `0` of the source is the file with index `start`.
#[derive(Debug, Clone)]
pub struct FrameDirectory {
    dir: PathBuf,
    naming: String,
    extension: String,
    start: usize,
    end: usize,
}

impl FrameDirectory {
    /// Create a provider over `start..=end` with the default `stack-` prefix
    /// and `txt` extension.
    pub fn new(dir: impl Into<PathBuf>, start: usize, end: usize) -> Self {
        Self {
            dir: dir.into(),
            naming: "stack-".to_string(),
            extension: "txt".to_string(),
            start,
            end,
        }
    }

    /// Set the file name prefix.
    pub fn naming(mut self, naming: impl Into<String>) -> Self {
        self.naming = naming.into();
        self
    }

    /// Set the file extension (without the dot).
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Get the directory holding the frame files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing source frame `frame`.
    pub fn frame_path(&self, frame: usize) -> Result<PathBuf> {
        let count = self.frame_count();
        let index = self
            .start
            .checked_add(frame)
            .filter(|&index| frame < count && index <= self.end)
            .ok_or(TrackError::FrameOutOfRange { frame, count })?;

        Ok(self
            .dir
            .join(format!("{}{}.{}", self.naming, index, self.extension)))
    }
}

impl CentroidSource for FrameDirectory {
    type Error = TrackError;

    fn frame_count(&self) -> usize {
        // Saturates for `0..=usize::MAX`; the final index is unreachable.
        if self.end < self.start {
            0
        } else {
            (self.end - self.start).saturating_add(1)
        }
    }

    fn centroids(&mut self, frame: usize) -> Result<Vec<Centroid>> {
        let path = self.frame_path(frame)?;
        debug!("reading {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|e| TrackError::io(&path, e))?;
        parse_frame(&text)
    }
}
