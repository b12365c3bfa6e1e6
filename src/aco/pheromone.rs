//! Pheromone matrix.

use crate::models::Tour;

/// Dense n×n pheromone levels in row-major order, updated in place.
///
/// Entries start strictly positive and never go negative: evaporation
/// multiplies by `1 − ρ ≥ 0` and deposits only add positive amounts.
///
/// # Examples
///
/// ```
/// use u_colony::aco::PheromoneMatrix;
/// use u_colony::models::Tour;
///
/// let mut tau = PheromoneMatrix::new(3, 0.1);
/// tau.evaporate(0.5);
/// tau.deposit(&Tour::new(vec![0, 1, 2, 0]), 10.0, 100.0);
/// assert!((tau.get(0, 1) - 10.05).abs() < 1e-10);
/// assert!((tau.get(1, 0) - 0.05).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    data: Vec<f64>,
    size: usize,
}

impl PheromoneMatrix {
    /// Creates an n×n matrix filled with `initial`.
    pub fn new(size: usize, initial: f64) -> Self {
        Self {
            data: vec![initial; size * size],
            size,
        }
    }

    /// Pheromone on the directed edge `from → to`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major view of all entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Multiplies every entry by `1 − rate`.
    pub fn evaporate(&mut self, rate: f64) {
        let keep = 1.0 - rate;
        for tau in &mut self.data {
            *tau *= keep;
        }
    }

    /// Adds `q / length` to every directed edge of `tour`.
    ///
    /// Does nothing when `length` is zero.
    pub fn deposit(&mut self, tour: &Tour, length: f64, q: f64) {
        if length == 0.0 {
            return;
        }
        let amount = q / length;
        for (u, v) in tour.edges() {
            self.data[u * self.size + v] += amount;
        }
    }

    /// Like [`deposit`](Self::deposit), but also reinforces each reverse edge.
    pub fn deposit_symmetric(&mut self, tour: &Tour, length: f64, q: f64) {
        if length == 0.0 {
            return;
        }
        let amount = q / length;
        for (u, v) in tour.edges() {
            self.data[u * self.size + v] += amount;
            if u != v {
                self.data[v * self.size + u] += amount;
            }
        }
    }
}
