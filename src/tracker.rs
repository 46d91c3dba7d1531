mod assembler;
mod centroid;
mod matching;
mod path_state;
mod trajectory;

pub use assembler::{MatchStrategy, TrackAssembler, TrackerConfig, reconstruct};
pub use centroid::Centroid;
pub use matching::{GreedyMatcher, Matcher, Matching, OptimalMatcher, distance_matrix};
pub use path_state::PathState;
pub use trajectory::{Trajectory, TrajectorySet};
