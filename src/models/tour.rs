//! Closed tours over a distance matrix.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;

/// A closed tour: starts and ends at the depot and visits every other
/// location exactly once in between.
///
/// For `n` locations a tour holds `n + 1` indices. With a single location
/// the tour is `[depot, depot]`.
///
/// # Examples
///
/// ```
/// use u_colony::models::Tour;
/// use u_colony::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let tour = Tour::new(vec![0, 1, 2, 0]);
/// assert!(tour.is_valid(3));
/// assert_eq!(tour.length(&dm), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tour {
    path: Vec<usize>,
}

impl Tour {
    /// Wraps a path. No validation is done; see [`Tour::is_valid`].
    pub fn new(path: Vec<usize>) -> Self {
        Self { path }
    }

    /// The full path, including the closing depot.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Consumes the tour and returns its path.
    pub fn into_path(self) -> Vec<usize> {
        self.path
    }

    /// Number of indices in the path (locations + 1 for a valid tour).
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns `true` if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The start (and end) location, if any.
    pub fn depot(&self) -> Option<usize> {
        self.path.first().copied()
    }

    /// Iterates over consecutive directed edges `(from, to)`, including the
    /// closing edge back to the depot.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.path.windows(2).map(|w| (w[0], w[1]))
    }

    /// Sum of `distances[path[i]][path[i + 1]]` over all consecutive pairs.
    ///
    /// Summation order is fixed, so recomputing a tour's length always
    /// reproduces the value the optimizer reported.
    pub fn length(&self, distances: &DistanceMatrix) -> f64 {
        self.edges().map(|(u, v)| distances.get(u, v)).sum()
    }

    /// Returns `true` if this is a closed tour over `n` locations.
    ///
    /// First and last entries must be equal, and the interior must contain
    /// every non-depot index in `0..n` exactly once.
    pub fn is_valid(&self, n: usize) -> bool {
        if n == 0 || self.path.len() != n + 1 {
            return false;
        }
        let depot = self.path[0];
        if depot >= n || self.path[n] != depot {
            return false;
        }
        let mut seen = vec![false; n];
        seen[depot] = true;
        for &v in &self.path[1..n] {
            if v >= n || seen[v] {
                return false;
            }
            seen[v] = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> DistanceMatrix {
        // Four points on a line at x = 0, 1, 2, 3
        let mut dm = DistanceMatrix::new(4);
        for i in 0..4 {
            for j in 0..4 {
                dm.set(i, j, (i as f64 - j as f64).abs());
            }
        }
        dm
    }

    #[test]
    fn test_length_includes_closing_edge() {
        let tour = Tour::new(vec![0, 1, 2, 3, 0]);
        // 1 + 1 + 1 + 3
        assert!((tour.length(&line()) - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_edges() {
        let tour = Tour::new(vec![2, 0, 1, 2]);
        let edges: Vec<_> = tour.edges().collect();
        assert_eq!(edges, vec![(2, 0), (0, 1), (1, 2)]);
    }

    #[test]
    fn test_valid() {
        assert!(Tour::new(vec![0, 3, 1, 2, 0]).is_valid(4));
        assert!(Tour::new(vec![2, 0, 1, 3, 2]).is_valid(4));
        assert!(Tour::new(vec![0, 0]).is_valid(1));
    }

    #[test]
    fn test_invalid() {
        // not closed
        assert!(!Tour::new(vec![0, 1, 2, 3, 1]).is_valid(4));
        // repeated interior node
        assert!(!Tour::new(vec![0, 1, 1, 3, 0]).is_valid(4));
        // depot revisited inside
        assert!(!Tour::new(vec![0, 1, 0, 3, 0]).is_valid(4));
        // wrong length
        assert!(!Tour::new(vec![0, 1, 2, 0]).is_valid(4));
        // out of range
        assert!(!Tour::new(vec![0, 1, 2, 7, 0]).is_valid(4));
        assert!(!Tour::new(vec![]).is_valid(0));
    }

    #[test]
    fn test_single_location() {
        let tour = Tour::new(vec![0, 0]);
        assert_eq!(tour.length(&DistanceMatrix::new(1)), 0.0);
        assert_eq!(tour.depot(), Some(0));
    }
}
