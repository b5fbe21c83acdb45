//! Resampling between grids related by a regular affine coordinate mapping.
//!
//! Both operators here assume the source coordinate grids are *regular and
//! linearly spaced* along each axis: `x(i, j)` depends only on `i`,
//! `y(i, j)` only on `j`, with constant spacing. Under that precondition
//! the inverse mapping from world coordinates to cell indices is a single
//! affine transform derived from the global coordinate extents, making
//! every lookup O(1). The precondition is not checked; calling either
//! operator with scattered or warped coordinate grids is undefined (it is
//! NOT a general scattered-data interpolator).

use crate::grid::Grid2D;

/// Nearest-neighbor resampling of `z` (defined over coordinates `x`, `y`)
/// at the target coordinates `xi`, `yi`.
///
/// Index pairs are obtained from the affine inverse of the source spacing
/// (rounded to the nearest index) and clamped into the valid index range,
/// so queries outside the source extent snap to the border cells. The
/// output has the shape of `xi`.
///
/// # Panics
///
/// Panics if `x`, `y` and `z` do not share a shape, if `xi` and `yi`
/// disagree, or if a source coordinate extent is degenerate.
pub fn resample_nearest(
    x: &Grid2D,
    y: &Grid2D,
    z: &Grid2D,
    xi: &Grid2D,
    yi: &Grid2D,
) -> Grid2D {
    assert_eq!(x.shape(), z.shape(), "source coordinate/value shape mismatch");
    assert_eq!(y.shape(), z.shape(), "source coordinate/value shape mismatch");
    assert_eq!(xi.shape(), yi.shape(), "target coordinate shape mismatch");

    let (ni, nj) = (z.shape().n0(), z.shape().n1());
    let (xmin, xmax) = (x.min(), x.max());
    let (ymin, ymax) = (y.min(), y.max());
    assert!(xmax > xmin, "degenerate source extent along x");
    assert!(ymax > ymin, "degenerate source extent along y");

    let ax = (ni - 1) as f32 / (xmax - xmin);
    let ay = (nj - 1) as f32 / (ymax - ymin);
    let bx = -xmin * ax;
    let by = -ymin * ay;

    let mut zi = Grid2D::new(xi.shape());
    for i in 0..xi.shape().n0() {
        for j in 0..xi.shape().n1() {
            let p = (ax * xi[(i, j)] + bx).round() as i64;
            let q = (ay * yi[(i, j)] + by).round() as i64;
            let p = p.clamp(0, ni as i64 - 1) as usize;
            let q = q.clamp(0, nj as i64 - 1) as usize;
            zi[(i, j)] = z[(p, q)];
        }
    }
    zi
}

/// Bilinear sampler over a value grid with regular coordinates.
///
/// Built once from the source coordinate extents, then queried at
/// arbitrary world positions. Queries outside the coordinate domain
/// return 0.0. Requires at least 2 cells along each axis.
pub struct BilinearSampler<'a> {
    z: &'a Grid2D,
    xmin: f32,
    xmax: f32,
    ymin: f32,
    ymax: f32,
    ax: f32,
    ay: f32,
}

impl<'a> BilinearSampler<'a> {
    /// Create a sampler for `z` over the coordinate grids `x`, `y`.
    ///
    /// Same regular-spacing precondition as [`resample_nearest`]; only the
    /// coordinate extents are read.
    pub fn new(x: &Grid2D, y: &Grid2D, z: &'a Grid2D) -> Self {
        assert_eq!(x.shape(), z.shape(), "source coordinate/value shape mismatch");
        assert_eq!(y.shape(), z.shape(), "source coordinate/value shape mismatch");
        let (ni, nj) = (z.shape().n0(), z.shape().n1());
        assert!(ni >= 2 && nj >= 2, "bilinear sampling requires at least 2x2 cells");

        let (xmin, xmax) = (x.min(), x.max());
        let (ymin, ymax) = (y.min(), y.max());
        assert!(xmax > xmin, "degenerate source extent along x");
        assert!(ymax > ymin, "degenerate source extent along y");

        Self {
            z,
            xmin,
            xmax,
            ymin,
            ymax,
            ax: (ni - 1) as f32 / (xmax - xmin),
            ay: (nj - 1) as f32 / (ymax - ymin),
        }
    }

    /// Bilinearly interpolated value at `(xq, yq)`, 0.0 outside the domain.
    pub fn sample(&self, xq: f32, yq: f32) -> f32 {
        if xq < self.xmin || xq > self.xmax || yq < self.ymin || yq > self.ymax {
            return 0.0;
        }

        let (ni, nj) = (self.z.shape().n0(), self.z.shape().n1());
        let p = self.ax * (xq - self.xmin);
        let q = self.ay * (yq - self.ymin);

        let i0 = (p.floor() as usize).min(ni - 2);
        let j0 = (q.floor() as usize).min(nj - 2);
        let u = p - i0 as f32;
        let v = q - j0 as f32;

        let z00 = self.z[(i0, j0)];
        let z10 = self.z[(i0 + 1, j0)];
        let z01 = self.z[(i0, j0 + 1)];
        let z11 = self.z[(i0 + 1, j0 + 1)];

        (1.0 - u) * (1.0 - v) * z00 + u * (1.0 - v) * z10 + (1.0 - u) * v * z01 + u * v * z11
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shape2D;

    /// Regular coordinate grids over [x0, x1] x [y0, y1].
    fn coords(shape: Shape2D, x0: f32, x1: f32, y0: f32, y1: f32) -> (Grid2D, Grid2D) {
        let mut x = Grid2D::new(shape);
        let mut y = Grid2D::new(shape);
        for i in 0..shape.n0() {
            let xv = x0 + (x1 - x0) * i as f32 / (shape.n0() - 1) as f32;
            for j in 0..shape.n1() {
                let yv = y0 + (y1 - y0) * j as f32 / (shape.n1() - 1) as f32;
                x[(i, j)] = xv;
                y[(i, j)] = yv;
            }
        }
        (x, y)
    }

    #[test]
    fn test_identity_resampling() {
        let shape = Shape2D::new(8, 6);
        let (x, y) = coords(shape, -3.0, 3.0, 0.0, 2.0);
        let mut z = Grid2D::new(shape);
        z.randomize(-1.0, 1.0, 7);

        let zi = resample_nearest(&x, &y, &z, &x, &y);
        assert_eq!(zi, z);
    }

    #[test]
    fn test_out_of_range_clamps_to_border() {
        let shape = Shape2D::new(4, 4);
        let (x, y) = coords(shape, 0.0, 1.0, 0.0, 1.0);
        let mut z = Grid2D::new(shape);
        for i in 0..4 {
            for j in 0..4 {
                z[(i, j)] = (i * 4 + j) as f32;
            }
        }

        let mut xi = Grid2D::new(shape);
        let mut yi = Grid2D::new(shape);
        xi.fill(10.0);
        yi.fill(-10.0);
        let zi = resample_nearest(&x, &y, &z, &xi, &yi);
        // Clamped to (3, 0).
        assert!(zi.as_slice().iter().all(|&v| v == 12.0));
    }

    #[test]
    fn test_bilinear_reproduces_grid_values() {
        let shape = Shape2D::new(5, 5);
        let (x, y) = coords(shape, -1.0, 1.0, -1.0, 1.0);
        let mut z = Grid2D::new(shape);
        z.randomize(0.0, 1.0, 3);

        let sampler = BilinearSampler::new(&x, &y, &z);
        for i in 0..5 {
            for j in 0..5 {
                let got = sampler.sample(x[(i, j)], y[(i, j)]);
                assert!((got - z[(i, j)]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_bilinear_linear_field_is_exact() {
        // Bilinear interpolation must be exact on f(x, y) = 2x - y.
        let shape = Shape2D::new(6, 6);
        let (x, y) = coords(shape, 0.0, 1.0, 0.0, 1.0);
        let mut z = Grid2D::new(shape);
        for i in 0..6 {
            for j in 0..6 {
                z[(i, j)] = 2.0 * x[(i, j)] - y[(i, j)];
            }
        }

        let sampler = BilinearSampler::new(&x, &y, &z);
        let got = sampler.sample(0.37, 0.61);
        assert!((got - (2.0 * 0.37 - 0.61)).abs() < 1e-5);
    }

    #[test]
    fn test_bilinear_outside_domain_is_zero() {
        let shape = Shape2D::new(4, 4);
        let (x, y) = coords(shape, -1.0, 1.0, -1.0, 1.0);
        let mut z = Grid2D::new(shape);
        z.fill(5.0);

        let sampler = BilinearSampler::new(&x, &y, &z);
        assert_eq!(sampler.sample(1.5, 0.0), 0.0);
        assert_eq!(sampler.sample(0.0, -1.01), 0.0);
        assert_eq!(sampler.sample(0.0, 0.0), 5.0);
    }
}
