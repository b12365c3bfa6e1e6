//! Tour construction for a single agent.

use rand::Rng;

use super::TransitionPolicy;
use crate::models::Tour;

/// Private walk state of one agent.
#[derive(Debug, Clone)]
struct Ant {
    path: Vec<usize>,
    visited: Vec<bool>,
    current: usize,
}

impl Ant {
    fn new(depot: usize, n: usize) -> Self {
        let mut visited = vec![false; n];
        visited[depot] = true;
        let mut path = Vec::with_capacity(n + 1);
        path.push(depot);
        Self {
            path,
            visited,
            current: depot,
        }
    }

    fn unvisited_into(&self, out: &mut Vec<usize>) {
        out.clear();
        out.extend(
            self.visited
                .iter()
                .enumerate()
                .filter(|&(_, &v)| !v)
                .map(|(i, _)| i),
        );
    }

    fn visit(&mut self, node: usize) {
        self.path.push(node);
        self.visited[node] = true;
        self.current = node;
    }
}

/// Builds one closed tour starting and ending at `depot`.
///
/// Returns the tour and its length, where the length is exactly
/// [`Tour::length`] of the returned tour.
///
/// # Panics
///
/// Panics if `depot` is out of range, or if the policy stops while
/// locations remain unvisited.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_colony::aco::{construct_tour, PheromoneMatrix, TransitionPolicy};
/// use u_colony::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let tau = PheromoneMatrix::new(3, 0.1);
/// let policy = TransitionPolicy::new(&tau, &dm, 1.0, 2.0);
///
/// let (tour, length) = construct_tour(&policy, 0, &mut StdRng::seed_from_u64(1));
/// assert!(tour.is_valid(3));
/// assert_eq!(length, 4.0); // every 3-node cycle here has length 4
/// ```
pub fn construct_tour<R: Rng + ?Sized>(
    policy: &TransitionPolicy<'_>,
    depot: usize,
    rng: &mut R,
) -> (Tour, f64) {
    let n = policy.size();
    let mut ant = Ant::new(depot, n);
    let mut candidates = Vec::with_capacity(n);

    loop {
        ant.unvisited_into(&mut candidates);
        match policy.select_next(ant.current, &candidates, rng) {
            Some(next) => ant.visit(next),
            None => break,
        }
    }
    assert_eq!(
        ant.path.len(),
        n,
        "transition policy stopped with unvisited locations"
    );

    ant.path.push(depot);
    let tour = Tour::new(ant.path);
    let length = tour.length(policy.distances());
    (tour, length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aco::PheromoneMatrix;
    use crate::distance::DistanceMatrix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(n: usize) -> DistanceMatrix {
        let mut dm = DistanceMatrix::new(n);
        for i in 0..n {
            for j in 0..n {
                dm.set(i, j, (i as f64 - j as f64).abs() + if i == j { 0.0 } else { 0.5 });
            }
        }
        dm
    }

    #[test]
    fn test_tour_is_closed_permutation() {
        let dm = grid(8);
        let tau = PheromoneMatrix::new(8, 0.1);
        let policy = TransitionPolicy::new(&tau, &dm, 1.0, 2.0);
        let mut rng = StdRng::seed_from_u64(42);
        for depot in 0..8 {
            let (tour, length) = construct_tour(&policy, depot, &mut rng);
            assert!(tour.is_valid(8));
            assert_eq!(tour.depot(), Some(depot));
            assert_eq!(tour.len(), 9);
            assert_eq!(length, tour.length(&dm));
        }
    }

    #[test]
    fn test_single_location() {
        let dm = DistanceMatrix::new(1);
        let tau = PheromoneMatrix::new(1, 0.1);
        let policy = TransitionPolicy::new(&tau, &dm, 1.0, 2.0);
        let (tour, length) = construct_tour(&policy, 0, &mut StdRng::seed_from_u64(0));
        assert_eq!(tour.path(), &[0, 0]);
        assert_eq!(length, 0.0);
    }

    #[test]
    fn test_two_locations() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 3.0], vec![4.0, 0.0]]).expect("valid");
        let tau = PheromoneMatrix::new(2, 0.1);
        let policy = TransitionPolicy::new(&tau, &dm, 1.0, 2.0);
        let (tour, length) = construct_tour(&policy, 1, &mut StdRng::seed_from_u64(0));
        assert_eq!(tour.path(), &[1, 0, 1]);
        assert_eq!(length, 7.0);
    }

    #[test]
    fn test_same_seed_same_tour() {
        let dm = grid(10);
        let tau = PheromoneMatrix::new(10, 0.1);
        let policy = TransitionPolicy::new(&tau, &dm, 1.0, 1.0);
        let a = construct_tour(&policy, 0, &mut StdRng::seed_from_u64(9));
        let b = construct_tour(&policy, 0, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
