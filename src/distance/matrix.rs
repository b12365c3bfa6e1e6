//! Dense distance matrix.

use crate::error::AcoError;

/// A dense n×n distance matrix stored in row-major order.
///
/// Entries need not be symmetric. The optimizer only ever reads it.
///
/// # Examples
///
/// ```
/// use u_colony::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 8.0],
///     vec![5.0, 0.0, 5.0],
///     vec![8.0, 5.0, 0.0],
/// ])
/// .unwrap();
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from a flat row-major buffer.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Fails if any row length differs from the number of rows, or if any
    /// entry is negative or non-finite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AcoError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(AcoError::NonSquareMatrix {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        let dm = Self { data, size };
        dm.validate()?;
        Ok(dm)
    }

    /// Checks that every entry is finite and non-negative.
    pub fn validate(&self) -> Result<(), AcoError> {
        for (idx, &value) in self.data.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(AcoError::InvalidDistance {
                    from: idx / self.size,
                    to: idx % self.size,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the rows as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.data.chunks(self.size).map(|r| r.to_vec()).collect()
    }
}
