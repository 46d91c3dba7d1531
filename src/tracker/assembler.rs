//! Trajectory assembly across a whole frame sequence.

use log::{debug, info};

use crate::tracker::centroid::Centroid;
use crate::tracker::matching::{GreedyMatcher, Matcher, OptimalMatcher};
use crate::tracker::trajectory::{Trajectory, TrajectorySet};

/// How centroids of consecutive frames are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Repeatedly take the closest remaining pair
    #[default]
    Greedy,
    /// Minimise the summed distance of the whole assignment
    Optimal,
}

/// Configuration for the TrackAssembler.
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    pub strategy: MatchStrategy,
    /// Pairs farther apart than this are never linked. `None` links any pair.
    pub max_distance: Option<f64>,
}

impl TrackerConfig {
    /// Build the matcher selected by this configuration.
    pub fn matcher(&self) -> Box<dyn Matcher> {
        match self.strategy {
            MatchStrategy::Greedy => Box::new(GreedyMatcher {
                max_distance: self.max_distance,
            }),
            MatchStrategy::Optimal => Box::new(OptimalMatcher {
                max_distance: self.max_distance,
            }),
        }
    }
}

/// Owns the trajectory set while frames are folded in one at a time.
///
/// Open trajectories are addressed through the position of their tail in the
/// most recent frame, never by comparing centroid values, so two objects with
/// identical coordinates and weight stay on separate trajectories.
pub struct TrackAssembler {
    trajectories: Vec<Trajectory>,
    /// Centroids of the most recent frame
    tail_frame: Vec<Centroid>,
    /// `open[i]` is the trajectory whose tail is `tail_frame[i]`
    open: Vec<usize>,
    frame_id: usize,
    matcher: Box<dyn Matcher>,
}

impl TrackAssembler {
    /// Start one trajectory per centroid of frame 0.
    pub fn new(config: &TrackerConfig, first_frame: &[Centroid]) -> Self {
        Self::with_matcher(config.matcher(), first_frame)
    }

    /// Same as [`TrackAssembler::new`] with a caller-supplied matcher.
    pub fn with_matcher(matcher: Box<dyn Matcher>, first_frame: &[Centroid]) -> Self {
        let trajectories: Vec<Trajectory> = first_frame
            .iter()
            .enumerate()
            .map(|(id, &c)| Trajectory::new(id, 0, c))
            .collect();
        let open = (0..trajectories.len()).collect();

        Self {
            trajectories,
            tail_frame: first_frame.to_vec(),
            open,
            frame_id: 0,
            matcher,
        }
    }

    /// Fold the next frame into the trajectory set.
    pub fn advance(&mut self, next: &[Centroid]) {
        let matching = self.matcher.match_frames(&self.tail_frame, next);
        self.frame_id += 1;

        // Every index of `next` is either matched or unmatched, so every slot
        // is overwritten below.
        let mut next_open = vec![0; next.len()];

        for &(i, j) in &matching.pairs {
            let id = self.open[i];
            self.trajectories[id].extend(next[j]);
            next_open[j] = id;
        }

        for &i in &matching.unmatched_from {
            self.trajectories[self.open[i]].close();
        }

        for &j in &matching.unmatched_to {
            let id = self.trajectories.len();
            self.trajectories
                .push(Trajectory::new(id, self.frame_id, next[j]));
            next_open[j] = id;
        }

        debug!(
            "frames {} -> {}: {} linked, {} started, {} closed",
            self.frame_id - 1,
            self.frame_id,
            matching.pairs.len(),
            matching.unmatched_to.len(),
            matching.unmatched_from.len()
        );

        self.tail_frame = next.to_vec();
        self.open = next_open;
    }

    /// Index of the most recently folded frame.
    pub fn frame_id(&self) -> usize {
        self.frame_id
    }

    /// Get every trajectory created so far, open or closed.
    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    /// Trajectories that can still be extended by the next frame.
    pub fn open_trajectories(&self) -> impl Iterator<Item = &Trajectory> + '_ {
        self.open.iter().map(|&id| &self.trajectories[id])
    }

    /// Freeze the trajectory set.
    pub fn finish(self) -> TrajectorySet {
        TrajectorySet::new(self.trajectories, self.frame_id + 1)
    }
}

/// Reconstruct trajectories from a whole frame sequence.
pub fn reconstruct<F: AsRef<[Centroid]>>(config: &TrackerConfig, frames: &[F]) -> TrajectorySet {
    let Some((first, rest)) = frames.split_first() else {
        return TrajectorySet::default();
    };

    info!(
        "path reconstruction starting with {} frames ({:?} matching)",
        frames.len(),
        config.strategy
    );

    let assembler = rest
        .iter()
        .fold(TrackAssembler::new(config, first.as_ref()), |mut acc, frame| {
            acc.advance(frame.as_ref());
            acc
        });
    let set = assembler.finish();

    info!("path reconstruction ended with {} paths", set.len());
    set
}
