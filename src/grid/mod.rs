//! Dense 2D float grid.
//!
//! `Grid2D` is the storage primitive shared by every field in the crate:
//! bathymetry, shore distance, phase lag and displacement are all plain
//! row-major grids of `f32`. A grid is a value type with no interior
//! ownership graph; clone it or move it as needed.
//!
//! # Example
//!
//! ```
//! use shorewave::{Grid2D, Shape2D};
//!
//! let mut grid = Grid2D::new(Shape2D::new(4, 4));
//! grid[(1, 2)] = 3.5;
//! assert_eq!(grid[(1, 2)], 3.5);
//! assert_eq!(grid.max(), 3.5);
//! ```

mod export;

pub use export::PALETTE_STOPS;

use std::fmt;
use std::ops::{Index, IndexMut};

use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Shape2D;

/// Dense 2D grid of `f32` values in row-major order.
///
/// Cell `(i, j)` lives at buffer offset `i * n1 + j`, so `j` is contiguous
/// within a row of length `n1`. The buffer length equals
/// `shape.total_cells()` at all times; reshaping discards prior contents.
///
/// Out-of-bounds indexing is a contract violation and panics (fail fast);
/// it is never reported as a recoverable error.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid2D {
    shape: Shape2D,
    data: Vec<f32>,
}

impl Grid2D {
    /// Create a zero-filled grid with the given shape.
    pub fn new(shape: Shape2D) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.total_cells()],
        }
    }

    /// Grid shape.
    #[inline]
    pub fn shape(&self) -> Shape2D {
        self.shape
    }

    /// Reallocate to a new shape, zero-filled.
    ///
    /// Prior contents are discarded, not preserved or resampled.
    pub fn reshape(&mut self, shape: Shape2D) {
        self.shape = shape;
        self.data.clear();
        self.data.resize(shape.total_cells(), 0.0);
    }

    /// Backing buffer, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable backing buffer, row-major.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Maximum cell value (full scan).
    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Minimum cell value (full scan).
    pub fn min(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Set every cell to `v`.
    pub fn fill(&mut self, v: f32) {
        self.data.fill(v);
    }

    /// Apply `f` to every cell in place.
    pub fn apply<F: FnMut(f32) -> f32>(&mut self, mut f: F) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Fill with uniform values in `[a, b)` from a seeded generator.
    ///
    /// The same seed and range always produce the same cell values, so
    /// randomized fields stay reproducible across runs.
    pub fn randomize(&mut self, a: f32, b: f32, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = Uniform::new(a, b);
        for v in &mut self.data {
            *v = rng.sample(dist);
        }
    }

    /// Summary statistics over all cells.
    pub fn statistics(&self) -> GridStatistics {
        let sum: f64 = self.data.iter().map(|&v| v as f64).sum();
        GridStatistics {
            shape: self.shape,
            min: self.min(),
            max: self.max(),
            mean: (sum / self.data.len() as f64) as f32,
        }
    }
}

impl Index<(usize, usize)> for Grid2D {
    type Output = f32;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f32 {
        &self.data[i * self.shape.n1() + j]
    }
}

impl IndexMut<(usize, usize)> for Grid2D {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f32 {
        &mut self.data[i * self.shape.n1() + j]
    }
}

/// Summary statistics about a grid.
#[derive(Debug, Clone, Copy)]
pub struct GridStatistics {
    /// Grid shape
    pub shape: Shape2D,
    /// Minimum cell value
    pub min: f32,
    /// Maximum cell value
    pub max: f32,
    /// Mean cell value
    pub mean: f32,
}

impl fmt::Display for GridStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grid {}: min = {:.6}, max = {:.6}, mean = {:.6}",
            self.shape, self.min, self.max, self.mean
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_zero() {
        for n0 in 1..=8 {
            for n1 in 1..=8 {
                let grid = Grid2D::new(Shape2D::new(n0, n1));
                assert_eq!(grid.as_slice().len(), n0 * n1);
                assert!(grid.as_slice().iter().all(|&v| v == 0.0));
            }
        }
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = Grid2D::new(Shape2D::new(3, 5));
        grid[(2, 4)] = 1.0;
        grid[(1, 0)] = 2.0;
        assert_eq!(grid.as_slice()[2 * 5 + 4], 1.0);
        assert_eq!(grid.as_slice()[5], 2.0);
    }

    #[test]
    fn test_reshape_discards_contents() {
        let mut grid = Grid2D::new(Shape2D::new(2, 2));
        grid.fill(7.0);
        grid.reshape(Shape2D::new(3, 4));
        assert_eq!(grid.shape(), Shape2D::new(3, 4));
        assert!(grid.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_min_max() {
        let mut grid = Grid2D::new(Shape2D::new(2, 3));
        grid[(0, 1)] = -4.0;
        grid[(1, 2)] = 9.0;
        assert_eq!(grid.min(), -4.0);
        assert_eq!(grid.max(), 9.0);
    }

    #[test]
    fn test_randomize_deterministic() {
        let shape = Shape2D::new(16, 16);
        let mut a = Grid2D::new(shape);
        let mut b = Grid2D::new(shape);
        a.randomize(-1.0, 1.0, 42);
        b.randomize(-1.0, 1.0, 42);
        assert_eq!(a, b);
        assert!(a.as_slice().iter().all(|&v| (-1.0..1.0).contains(&v)));
    }

    #[test]
    fn test_randomize_seed_changes_output() {
        let shape = Shape2D::new(16, 16);
        let mut a = Grid2D::new(shape);
        let mut b = Grid2D::new(shape);
        a.randomize(0.0, 1.0, 1);
        b.randomize(0.0, 1.0, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_statistics() {
        let mut grid = Grid2D::new(Shape2D::new(1, 4));
        grid.as_mut_slice().copy_from_slice(&[0.0, 1.0, 2.0, 3.0]);
        let stats = grid.statistics();
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 3.0);
        assert!((stats.mean - 1.5).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_panics() {
        let grid = Grid2D::new(Shape2D::new(2, 2));
        let _ = grid[(2, 0)];
    }
}
