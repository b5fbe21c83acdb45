//! Strongly-typed grid shape.

use std::fmt;

/// Shape of a dense 2D grid (number of cells in each direction).
///
/// Provides a strongly-typed way to pass grid dimensions around,
/// preventing mix-ups between n0/n1 and other integer parameters.
///
/// # Example
///
/// ```
/// use shorewave::Shape2D;
///
/// let shape = Shape2D::new(256, 128);
/// assert_eq!(shape.n0(), 256);
/// assert_eq!(shape.n1(), 128);
/// assert_eq!(shape.total_cells(), 32768);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Shape2D {
    /// Number of cells along the first (i) axis
    n0: usize,
    /// Number of cells along the second (j) axis
    n1: usize,
}

impl Shape2D {
    /// Create a new shape.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(n0: usize, n1: usize) -> Self {
        assert!(n0 > 0, "n0 must be positive, got {}", n0);
        assert!(n1 > 0, "n1 must be positive, got {}", n1);
        Self { n0, n1 }
    }

    /// Create a square shape (same extent in both directions).
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Number of cells along the first (i) axis.
    #[inline]
    pub fn n0(&self) -> usize {
        self.n0
    }

    /// Number of cells along the second (j) axis.
    #[inline]
    pub fn n1(&self) -> usize {
        self.n1
    }

    /// Total number of cells.
    #[inline]
    pub fn total_cells(&self) -> usize {
        self.n0 * self.n1
    }
}

impl fmt::Display for Shape2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.n0, self.n1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let shape = Shape2D::new(4, 7);
        assert_eq!(shape.n0(), 4);
        assert_eq!(shape.n1(), 7);
        assert_eq!(shape.total_cells(), 28);
    }

    #[test]
    fn test_square() {
        assert_eq!(Shape2D::square(8), Shape2D::new(8, 8));
    }

    #[test]
    #[should_panic(expected = "n0 must be positive")]
    fn test_zero_n0_panics() {
        Shape2D::new(0, 4);
    }

    #[test]
    #[should_panic(expected = "n1 must be positive")]
    fn test_zero_n1_panics() {
        Shape2D::new(4, 0);
    }
}
