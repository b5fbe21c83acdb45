//! Central-difference gradient operators.

use crate::grid::Grid2D;

/// Gradient along the i axis.
///
/// Interior cells use the central difference `0.5 * (f(i+1) - f(i-1))`;
/// the two i-boundaries use one-sided differences against the adjacent
/// row. Requires `n0 >= 2`.
pub fn gradient_x(field: &Grid2D) -> Grid2D {
    let shape = field.shape();
    let (n0, n1) = (shape.n0(), shape.n1());
    assert!(n0 >= 2, "gradient_x requires n0 >= 2, got {}", n0);

    let mut dx = Grid2D::new(shape);
    for i in 1..n0 - 1 {
        for j in 0..n1 {
            dx[(i, j)] = 0.5 * (field[(i + 1, j)] - field[(i - 1, j)]);
        }
    }
    for j in 0..n1 {
        dx[(0, j)] = field[(1, j)] - field[(0, j)];
        dx[(n0 - 1, j)] = field[(n0 - 1, j)] - field[(n0 - 2, j)];
    }
    dx
}

/// Gradient along the j axis, symmetric to [`gradient_x`]. Requires `n1 >= 2`.
pub fn gradient_y(field: &Grid2D) -> Grid2D {
    let shape = field.shape();
    let (n0, n1) = (shape.n0(), shape.n1());
    assert!(n1 >= 2, "gradient_y requires n1 >= 2, got {}", n1);

    let mut dy = Grid2D::new(shape);
    for i in 0..n0 {
        for j in 1..n1 - 1 {
            dy[(i, j)] = 0.5 * (field[(i, j + 1)] - field[(i, j - 1)]);
        }
        dy[(i, 0)] = field[(i, 1)] - field[(i, 0)];
        dy[(i, n1 - 1)] = field[(i, n1 - 1)] - field[(i, n1 - 2)];
    }
    dy
}

/// Per-cell gradient direction `atan2(dy, dx)` in `(-pi, pi]`.
pub fn gradient_angle(field: &Grid2D) -> Grid2D {
    let dx = gradient_x(field);
    let dy = gradient_y(field);
    let mut alpha = Grid2D::new(field.shape());

    for ((a, &gx), &gy) in alpha
        .as_mut_slice()
        .iter_mut()
        .zip(dx.as_slice())
        .zip(dy.as_slice())
    {
        *a = gy.atan2(gx);
    }
    alpha
}
