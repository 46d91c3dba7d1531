//! TrajectoryPipeline for driving a centroid provider through the assembler.

use log::info;

use crate::tracker::{Centroid, TrackAssembler, TrackerConfig, TrajectorySet};

use super::CentroidSource;

/// Bundles a `CentroidSource` with the configuration used to link its frames.
pub struct TrajectoryPipeline<S: CentroidSource> {
    source: S,
    config: TrackerConfig,
}

impl<S: CentroidSource> TrajectoryPipeline<S> {
    /// Create a new pipeline with the given source and tracker config.
    pub fn new(source: S, config: TrackerConfig) -> Self {
        Self { source, config }
    }

    /// Create a new pipeline with default tracker configuration.
    pub fn with_default_config(source: S) -> Self {
        Self::new(source, TrackerConfig::default())
    }

    /// Pull every frame from the source and link them into trajectories.
    ///
    /// Frames are requested in order and folded in as they arrive, so only
    /// the most recent one is held alongside the trajectory set.
    pub fn run(&mut self) -> Result<TrajectorySet, S::Error> {
        let frame_count = self.source.frame_count();
        if frame_count == 0 {
            return Ok(TrajectorySet::default());
        }

        info!("path reconstruction starting with {frame_count} frames");

        let first = self.load(0)?;
        let mut assembler = TrackAssembler::new(&self.config, &first);
        for frame in 1..frame_count {
            let next = self.load(frame)?;
            assembler.advance(&next);
        }

        let set = assembler.finish();
        info!("path reconstruction ended with {} paths", set.len());
        Ok(set)
    }

    /// Pull every frame from the source without linking them.
    pub fn load_frames(&mut self) -> Result<Vec<Vec<Centroid>>, S::Error> {
        (0..self.source.frame_count())
            .map(|frame| self.load(frame))
            .collect()
    }

    fn load(&mut self, frame: usize) -> Result<Vec<Centroid>, S::Error> {
        let centroids = self.source.centroids(frame)?;
        info!("frame {frame}: {} elements detected", centroids.len());
        Ok(centroids)
    }

    /// Get the configuration used to link frames.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Get a reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSource {
        frames: Vec<Vec<Centroid>>,
        requested: Vec<usize>,
    }

    impl CentroidSource for MockSource {
        type Error = std::convert::Infallible;

        fn frame_count(&self) -> usize {
            self.frames.len()
        }

        fn centroids(&mut self, frame: usize) -> Result<Vec<Centroid>, Self::Error> {
            self.requested.push(frame);
            Ok(self.frames[frame].clone())
        }
    }

    #[test]
    fn test_pipeline_requests_frames_in_order() {
        let source = MockSource {
            frames: vec![
                vec![Centroid::new(0, 0, 0, 5)],
                vec![Centroid::new(1, 0, 0, 5)],
                vec![Centroid::new(2, 0, 0, 5), Centroid::new(30, 30, 30, 2)],
            ],
            requested: vec![],
        };

        let mut pipeline = TrajectoryPipeline::with_default_config(source);
        let set = pipeline.run().unwrap();

        assert_eq!(pipeline.source().requested, vec![0, 1, 2]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.frame_count(), 3);
        assert_eq!(set.get(0).map(|t| t.len()), Some(3));
        assert_eq!(set.get(1).map(|t| t.start_frame), Some(2));
    }

    #[test]
    fn test_pipeline_without_frames() {
        let mut pipeline = TrajectoryPipeline::with_default_config(Vec::<Vec<Centroid>>::new());
        assert!(pipeline.run().unwrap().is_empty());
        assert!(pipeline.load_frames().unwrap().is_empty());
    }

    #[test]
    fn test_in_memory_pipeline() {
        let frames: Vec<Vec<Centroid>> = vec![vec![]];
        let mut pipeline = TrajectoryPipeline::with_default_config(frames);
        pipeline.source_mut().push(vec![Centroid::new(1, 1, 1, 1)]);
        assert_eq!(pipeline.load_frames().unwrap().len(), 2);
        assert_eq!(pipeline.run().unwrap().len(), 1);
    }
}
