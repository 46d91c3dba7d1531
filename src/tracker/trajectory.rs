//! Per-object trajectories and the set that owns them.

use crate::tracker::centroid::Centroid;
use crate::tracker::path_state::PathState;

/// Ordered, gap-free sequence of centroids believed to be one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trajectory {
    /// Position in the owning set, assigned at creation
    pub id: usize,
    /// Frame in which the object was first observed
    pub start_frame: usize,
    /// Whether the trajectory can still be extended
    pub state: PathState,
    centroids: Vec<Centroid>,
}

impl Trajectory {
    pub(crate) fn new(id: usize, start_frame: usize, first: Centroid) -> Self {
        Self {
            id,
            start_frame,
            state: PathState::Open,
            centroids: vec![first],
        }
    }

    pub(crate) fn extend(&mut self, next: Centroid) {
        debug_assert_eq!(self.state, PathState::Open);
        self.centroids.push(next);
    }

    pub(crate) fn close(&mut self) {
        self.state = PathState::Closed;
    }

    /// Observed centroids, earliest frame first.
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    /// Most recently appended centroid.
    pub fn tail(&self) -> &Centroid {
        // Never empty: constructed with one centroid and only ever grows.
        &self.centroids[self.centroids.len() - 1]
    }

    /// Frame index of the tail.
    pub fn end_frame(&self) -> usize {
        self.start_frame + self.centroids.len() - 1
    }

    /// Number of frames the object was observed in.
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    /// Always false for trajectories built by the assembler.
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// `(frame_index, centroid)` for every observation, earliest first.
    pub fn frames(&self) -> impl Iterator<Item = (usize, &Centroid)> + '_ {
        self.centroids
            .iter()
            .enumerate()
            .map(move |(k, c)| (self.start_frame + k, c))
    }
}

impl AsRef<[Centroid]> for Trajectory {
    fn as_ref(&self) -> &[Centroid] {
        &self.centroids
    }
}

/// Every trajectory produced from a frame sequence, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrajectorySet {
    trajectories: Vec<Trajectory>,
    frame_count: usize,
}

impl TrajectorySet {
    pub(crate) fn new(trajectories: Vec<Trajectory>, frame_count: usize) -> Self {
        Self {
            trajectories,
            frame_count,
        }
    }

    /// Number of trajectories.
    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    /// Whether no centroid was ever observed.
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// Get a trajectory by its id.
    pub fn get(&self, id: usize) -> Option<&Trajectory> {
        self.trajectories.get(id)
    }

    /// Iterate over trajectories in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Trajectory> {
        self.trajectories.iter()
    }

    /// Number of frames that were folded into this set.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Total number of centroids across all trajectories.
    pub fn total_centroids(&self) -> usize {
        self.trajectories.iter().map(Trajectory::len).sum()
    }

    /// Consume the set, returning the trajectories in creation order.
    pub fn into_inner(self) -> Vec<Trajectory> {
        self.trajectories
    }
}

impl<'a> IntoIterator for &'a TrajectorySet {
    type Item = &'a Trajectory;
    type IntoIter = std::slice::Iter<'a, Trajectory>;

    fn into_iter(self) -> Self::IntoIter {
        self.trajectories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_are_offset_by_start() {
        let mut t = Trajectory::new(0, 3, Centroid::new(1, 1, 1, 2));
        t.extend(Centroid::new(2, 1, 1, 2));
        t.extend(Centroid::new(3, 1, 1, 2));

        let frames: Vec<usize> = t.frames().map(|(f, _)| f).collect();
        assert_eq!(frames, vec![3, 4, 5]);
        assert_eq!(t.end_frame(), 5);
        assert_eq!(*t.tail(), Centroid::new(3, 1, 1, 2));
    }

    #[test]
    fn test_close() {
        let mut t = Trajectory::new(0, 0, Centroid::new(0, 0, 0, 1));
        assert_eq!(t.state, PathState::Open);
        t.close();
        assert_eq!(t.state, PathState::Closed);
        assert_eq!(t.len(), 1);
    }
}
