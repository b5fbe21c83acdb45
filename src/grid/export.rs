//! Byte-buffer export for display.
//!
//! A grid is handed to the rendering layer as a normalized 8-bit buffer,
//! either grayscale or palette-mapped RGB. Values are rescaled to [0, 1]
//! over the grid's min/max range; a flat field (max == min) exports as an
//! all-zero buffer rather than dividing by zero. Rows are emitted with the
//! `j` axis flipped so buffer index 0 corresponds to the bottom-left cell
//! when `(i, j)` is read as `(x, y)` with y up.

use super::Grid2D;

/// Fixed palette stops for RGB export, sampled from the inferno colormap.
///
/// Normalized values index the 11 segments between the 12 stops, with
/// linear interpolation inside each segment.
pub const PALETTE_STOPS: [[f32; 3]; 12] = [
    [0.001, 0.000, 0.014],
    [0.070, 0.050, 0.194],
    [0.198, 0.064, 0.404],
    [0.348, 0.083, 0.494],
    [0.494, 0.141, 0.508],
    [0.639, 0.190, 0.494],
    [0.786, 0.242, 0.450],
    [0.913, 0.330, 0.383],
    [0.980, 0.491, 0.368],
    [0.996, 0.661, 0.451],
    [0.995, 0.827, 0.586],
    [0.987, 0.991, 0.750],
];

impl Grid2D {
    /// Export as an 8-bit grayscale buffer of `n0 * n1` bytes.
    ///
    /// Each value is normalized to [0, 1] over the grid's range and scaled
    /// to [0, 255]. A flat field exports as all zeros.
    pub fn to_grayscale_bytes(&self) -> Vec<u8> {
        let (n0, n1) = (self.shape().n0(), self.shape().n1());
        let mut data = vec![0u8; n0 * n1];
        let vmin = self.min();
        let vmax = self.max();

        if vmax != vmin {
            let a = 1.0 / (vmax - vmin);
            let b = -vmin / (vmax - vmin);
            let mut k = 0;

            for j in (0..n1).rev() {
                for i in 0..n0 {
                    let v = a * self[(i, j)] + b;
                    data[k] = (255.0 * v).floor() as u8;
                    k += 1;
                }
            }
        }
        data
    }

    /// Export as a palette-mapped RGB buffer of `3 * n0 * n1` bytes.
    ///
    /// Values are normalized as in [`to_grayscale_bytes`](Self::to_grayscale_bytes)
    /// and mapped through [`PALETTE_STOPS`]. When a companion `mask` grid is
    /// given, any cell with a positive mask value is forced to pure black;
    /// the mask must have the same shape as the grid.
    pub fn to_rgb_bytes(&self, mask: Option<&Grid2D>) -> Vec<u8> {
        let (n0, n1) = (self.shape().n0(), self.shape().n1());
        if let Some(mask) = mask {
            assert_eq!(
                mask.shape(),
                self.shape(),
                "mask shape {} does not match grid shape {}",
                mask.shape(),
                self.shape()
            );
        }

        let mut data = vec![0u8; 3 * n0 * n1];
        let vmin = self.min();
        let vmax = self.max();
        let nc = PALETTE_STOPS.len();

        if vmax != vmin {
            let a = 1.0 / (vmax - vmin);
            let b = -vmin / (vmax - vmin);
            let mut k = 0;

            for j in (0..n1).rev() {
                for i in 0..n0 {
                    let v = a * self[(i, j)] + b;
                    let vc = v * (nc - 1) as f32;
                    let ic = vc as usize;

                    let mut rgb = if ic >= nc - 1 {
                        PALETTE_STOPS[nc - 1]
                    } else {
                        let t = vc - ic as f32;
                        let lo = PALETTE_STOPS[ic];
                        let hi = PALETTE_STOPS[ic + 1];
                        [
                            (1.0 - t) * lo[0] + t * hi[0],
                            (1.0 - t) * lo[1] + t * hi[1],
                            (1.0 - t) * lo[2] + t * hi[2],
                        ]
                    };

                    if let Some(mask) = mask {
                        if mask[(i, j)] > 0.0 {
                            rgb = [0.0; 3];
                        }
                    }

                    for (p, &c) in rgb.iter().enumerate() {
                        data[k + p] = (255.0 * c).floor() as u8;
                    }
                    k += 3;
                }
            }
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shape2D;

    #[test]
    fn test_flat_field_exports_all_zero() {
        let mut grid = Grid2D::new(Shape2D::new(3, 3));
        grid.fill(5.0);
        let bytes = grid.to_grayscale_bytes();
        assert_eq!(bytes.len(), 9);
        assert!(bytes.iter().all(|&b| b == 0));

        let rgb = grid.to_rgb_bytes(None);
        assert_eq!(rgb.len(), 27);
        assert!(rgb.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_grayscale_normalization() {
        let mut grid = Grid2D::new(Shape2D::new(2, 1));
        grid[(0, 0)] = -1.0;
        grid[(1, 0)] = 1.0;
        let bytes = grid.to_grayscale_bytes();
        assert_eq!(bytes, vec![0, 255]);
    }

    #[test]
    fn test_grayscale_row_flip() {
        // (0, n1-1) must land at buffer index 0.
        let mut grid = Grid2D::new(Shape2D::new(2, 2));
        grid[(0, 1)] = 1.0;
        let bytes = grid.to_grayscale_bytes();
        assert_eq!(bytes[0], 255);
        assert_eq!(bytes[1], 0);
    }

    #[test]
    fn test_rgb_extremes_hit_palette_ends() {
        let mut grid = Grid2D::new(Shape2D::new(2, 1));
        grid[(0, 0)] = 0.0;
        grid[(1, 0)] = 1.0;
        let rgb = grid.to_rgb_bytes(None);
        let lo = &PALETTE_STOPS[0];
        let hi = &PALETTE_STOPS[11];
        assert_eq!(rgb[0], (255.0 * lo[0]).floor() as u8);
        assert_eq!(rgb[1], (255.0 * lo[1]).floor() as u8);
        assert_eq!(rgb[2], (255.0 * lo[2]).floor() as u8);
        assert_eq!(rgb[3], (255.0 * hi[0]).floor() as u8);
        assert_eq!(rgb[4], (255.0 * hi[1]).floor() as u8);
        assert_eq!(rgb[5], (255.0 * hi[2]).floor() as u8);
    }

    #[test]
    fn test_rgb_mask_forces_black() {
        let mut grid = Grid2D::new(Shape2D::new(2, 1));
        grid[(0, 0)] = 0.0;
        grid[(1, 0)] = 1.0;
        let mut mask = Grid2D::new(Shape2D::new(2, 1));
        mask[(1, 0)] = 1.0;
        let rgb = grid.to_rgb_bytes(Some(&mask));
        assert_eq!(&rgb[3..6], &[0, 0, 0]);
        assert_ne!(&rgb[0..3], &[0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "mask shape")]
    fn test_rgb_mask_shape_mismatch_panics() {
        let grid = Grid2D::new(Shape2D::new(2, 2));
        let mask = Grid2D::new(Shape2D::new(3, 2));
        grid.to_rgb_bytes(Some(&mask));
    }
}
