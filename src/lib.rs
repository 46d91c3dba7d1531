//! Path reconstruction for objects segmented out of volumetric time series.
//!
//! Each frame of a scan sequence is reduced upstream to a list of region
//! centroids. This crate links those centroids across consecutive frames by
//! spatial proximity and assembles them into per-object trajectories, then
//! exports the result as a coordinate listing or a polyline mesh.

pub mod error;
pub mod export;
pub mod integration;
pub mod tracker;

pub use error::{Result, TrackError};
pub use integration::{CentroidSource, FrameDirectory, FrameListing, TrajectoryPipeline};
pub use tracker::{
    Centroid, GreedyMatcher, MatchStrategy, Matcher, Matching, OptimalMatcher, TrackAssembler,
    TrackerConfig, Trajectory, TrajectorySet, reconstruct,
};
