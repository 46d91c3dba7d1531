//! Frame-to-frame centroid matching.

use log::warn;
use ndarray::Array2;

use crate::tracker::centroid::Centroid;

/// Compute the Euclidean distance matrix between two centroid sets.
///
/// Rows index `from`, columns index `to`.
pub fn distance_matrix(from: &[Centroid], to: &[Centroid]) -> Array2<f64> {
    let mut dists = Array2::zeros((from.len(), to.len()));
    for (i, a) in from.iter().enumerate() {
        for (j, b) in to.iter().enumerate() {
            dists[[i, j]] = a.distance(b);
        }
    }
    dists
}

/// One-to-one partial matching between two consecutive frames.
///
/// Every index of `from` appears exactly once in either `pairs` or
/// `unmatched_from`, and likewise for `to`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    /// `(from_index, to_index)` in the order they were committed
    pub pairs: Vec<(usize, usize)>,
    /// Ascending
    pub unmatched_from: Vec<usize>,
    /// Ascending
    pub unmatched_to: Vec<usize>,
}

impl Matching {
    fn from_pairs(pairs: Vec<(usize, usize)>, num_from: usize, num_to: usize) -> Self {
        let mut from_used = vec![false; num_from];
        let mut to_used = vec![false; num_to];
        for &(i, j) in &pairs {
            from_used[i] = true;
            to_used[j] = true;
        }

        let unused = |mask: Vec<bool>| -> Vec<usize> {
            mask.iter()
                .enumerate()
                .filter_map(|(i, &used)| if used { None } else { Some(i) })
                .collect()
        };

        Self {
            pairs,
            unmatched_from: unused(from_used),
            unmatched_to: unused(to_used),
        }
    }
}

/// Strategy for pairing the centroids of frame N with those of frame N+1.
pub trait Matcher {
    /// Pair `from` (frame N) with `to` (frame N+1).
    fn match_frames(&self, from: &[Centroid], to: &[Centroid]) -> Matching;
}

/// Repeatedly commits the globally closest remaining pair.
///
/// Exact ties go to the lowest `from` index, then the lowest `to` index.
/// Pairs farther apart than `max_distance` are never committed.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatcher {
    pub max_distance: Option<f64>,
}

impl GreedyMatcher {
    /// Create an ungated greedy matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher that never links pairs farther apart than
    /// `max_distance`.
    pub fn with_max_distance(max_distance: f64) -> Self {
        Self {
            max_distance: Some(max_distance),
        }
    }

    /// Greedy selection over a precomputed distance matrix.
    pub fn assign(&self, dists: &Array2<f64>) -> Matching {
        let (num_from, num_to) = dists.dim();

        // Row-major candidates, stably sorted by distance. Sweeping this list
        // and skipping consumed rows/columns picks the same pairs, in the same
        // order, as rescanning for the minimum after every commit.
        let mut candidates: Vec<(usize, usize, f64)> = dists
            .indexed_iter()
            .map(|((i, j), &d)| (i, j, d))
            .filter(|&(_, _, d)| within_gate(d, self.max_distance))
            .collect();
        candidates.sort_by(|a, b| a.2.total_cmp(&b.2));

        let mut from_used = vec![false; num_from];
        let mut to_used = vec![false; num_to];
        let mut pairs = Vec::with_capacity(num_from.min(num_to));

        for (i, j, _) in candidates {
            if pairs.len() == num_from.min(num_to) {
                break;
            }
            if from_used[i] || to_used[j] {
                continue;
            }
            from_used[i] = true;
            to_used[j] = true;
            pairs.push((i, j));
        }

        Matching::from_pairs(pairs, num_from, num_to)
    }
}

impl Matcher for GreedyMatcher {
    fn match_frames(&self, from: &[Centroid], to: &[Centroid]) -> Matching {
        self.assign(&distance_matrix(from, to))
    }
}

/// Minimum total distance assignment (Jonker-Volgenant).
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimalMatcher {
    pub max_distance: Option<f64>,
}

impl OptimalMatcher {
    /// Create an ungated optimal matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher that never links pairs farther apart than
    /// `max_distance`.
    pub fn with_max_distance(max_distance: f64) -> Self {
        Self {
            max_distance: Some(max_distance),
        }
    }

    /// Optimal assignment over a precomputed distance matrix.
    pub fn assign(&self, dists: &Array2<f64>) -> Matching {
        let (num_rows, num_cols) = dists.dim();

        if num_rows == 0 || num_cols == 0 {
            return Matching::from_pairs(vec![], num_rows, num_cols);
        }

        // Gated-out pairs cost more than any real assignment so the solver
        // only uses them when nothing else fits; they are dropped afterwards.
        let max_real = dists.iter().copied().fold(0.0_f64, f64::max);
        let forbidden = (max_real + 1.0) * (num_rows.max(num_cols) as f64 + 1.0);

        let size = num_rows.max(num_cols);
        let mut padded = Array2::<f64>::from_elem((size, size), forbidden);
        for i in 0..num_rows {
            for j in 0..num_cols {
                let d = dists[[i, j]];
                if within_gate(d, self.max_distance) {
                    padded[[i, j]] = d;
                }
            }
        }

        match lapjv::lapjv(&padded) {
            Ok((row_to_col, _)) => {
                let pairs = row_to_col
                    .iter()
                    .enumerate()
                    .filter(|&(row, &col)| {
                        row < num_rows
                            && col < num_cols
                            && within_gate(dists[[row, col]], self.max_distance)
                    })
                    .map(|(row, &col)| (row, col))
                    .collect();
                Matching::from_pairs(pairs, num_rows, num_cols)
            }
            Err(err) => {
                warn!("optimal assignment failed ({err:?}), falling back to greedy matching");
                GreedyMatcher {
                    max_distance: self.max_distance,
                }
                .assign(dists)
            }
        }
    }
}

impl Matcher for OptimalMatcher {
    fn match_frames(&self, from: &[Centroid], to: &[Centroid]) -> Matching {
        self.assign(&distance_matrix(from, to))
    }
}

#[inline]
fn within_gate(distance: f64, max_distance: Option<f64>) -> bool {
    max_distance.is_none_or(|max| distance <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: u32, y: u32, z: u32) -> Centroid {
        Centroid::new(x, y, z, 1)
    }

    #[test]
    fn test_distance_matrix_shape() {
        let dists = distance_matrix(&[c(0, 0, 0), c(1, 1, 1)], &[c(0, 0, 2)]);
        assert_eq!(dists.dim(), (2, 1));
        assert!((dists[[0, 0]] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_greedy_empty_sides() {
        let m = GreedyMatcher::new().match_frames(&[], &[c(1, 1, 1)]);
        assert!(m.pairs.is_empty());
        assert_eq!(m.unmatched_to, vec![0]);

        let m = GreedyMatcher::new().match_frames(&[c(1, 1, 1)], &[]);
        assert!(m.pairs.is_empty());
        assert_eq!(m.unmatched_from, vec![0]);
    }

    #[test]
    fn test_greedy_takes_global_minimum_first() {
        // from[0] is nearest to[0] at 3, but (1, 1) at 1 is closest overall.
        let from = [c(0, 0, 0), c(9, 0, 0)];
        let to = [c(3, 0, 0), c(10, 0, 0)];
        let m = GreedyMatcher::new().match_frames(&from, &to);
        assert_eq!(m.pairs, vec![(1, 1), (0, 0)]);
    }

    #[test]
    fn test_greedy_not_fooled_by_input_order() {
        let from = [c(10, 10, 10), c(0, 0, 0)];
        let to = [c(1, 0, 0), c(11, 10, 10)];
        let mut m = GreedyMatcher::new().match_frames(&from, &to);
        m.pairs.sort();
        assert_eq!(m.pairs, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_greedy_tie_break_lowest_indices() {
        // Every pair is at distance 1.
        let from = [c(1, 0, 0), c(1, 0, 0)];
        let to = [c(0, 0, 0), c(2, 0, 0)];
        let m = GreedyMatcher::new().match_frames(&from, &to);
        assert_eq!(m.pairs, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_greedy_unmatched_leftovers() {
        let from = [c(0, 0, 0)];
        let to = [c(50, 0, 0), c(1, 0, 0), c(90, 0, 0)];
        let m = GreedyMatcher::new().match_frames(&from, &to);
        assert_eq!(m.pairs, vec![(0, 1)]);
        assert!(m.unmatched_from.is_empty());
        assert_eq!(m.unmatched_to, vec![0, 2]);
    }

    #[test]
    fn test_greedy_gate() {
        let from = [c(0, 0, 0), c(100, 0, 0)];
        let to = [c(2, 0, 0), c(150, 0, 0)];
        let m = GreedyMatcher::with_max_distance(10.0).match_frames(&from, &to);
        assert_eq!(m.pairs, vec![(0, 0)]);
        assert_eq!(m.unmatched_from, vec![1]);
        assert_eq!(m.unmatched_to, vec![1]);
    }

    #[test]
    fn test_optimal_differs_from_greedy() {
        // Greedy grabs (0, 0) at distance 1 and is left with (1, 1) at 9,
        // total 10. The optimal assignment crosses over for a total of 8.
        let from = [c(5, 0, 0), c(0, 0, 0)];
        let to = [c(4, 0, 0), c(9, 0, 0)];

        let greedy = GreedyMatcher::new().match_frames(&from, &to);
        assert_eq!(greedy.pairs, vec![(0, 0), (1, 1)]);

        let mut optimal = OptimalMatcher::new().match_frames(&from, &to);
        optimal.pairs.sort();
        assert_eq!(optimal.pairs, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_optimal_rectangular() {
        let from = [c(0, 0, 0), c(20, 0, 0), c(40, 0, 0)];
        let to = [c(21, 0, 0)];
        let m = OptimalMatcher::new().match_frames(&from, &to);
        assert_eq!(m.pairs, vec![(1, 0)]);
        assert_eq!(m.unmatched_from, vec![0, 2]);
        assert!(m.unmatched_to.is_empty());
    }

    #[test]
    fn test_optimal_gate() {
        let from = [c(0, 0, 0)];
        let to = [c(30, 0, 0)];
        let m = OptimalMatcher::with_max_distance(5.0).match_frames(&from, &to);
        assert!(m.pairs.is_empty());
        assert_eq!(m.unmatched_from, vec![0]);
        assert_eq!(m.unmatched_to, vec![0]);
    }
}
