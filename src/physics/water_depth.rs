//! Synthetic bathymetry: fractal noise over a linear cross-shore shelf.

use crate::grid::Grid2D;
use crate::noise::{fbm_perlin, FbmConfig};
use crate::types::Shape2D;

/// Water depth field for a rectangular coastal region.
///
/// Owns the bathymetry grid `h` and the parameters it is generated from:
/// a fractal-noise component plus a linear cross-shore ramp along the i
/// axis, so one edge of the domain is deep water and the opposite edge
/// rises through h = 0 into exposed shore. Sign convention throughout the
/// crate: `h < 0` is submerged, `h > 0` is exposed land.
///
/// The grid is only mutated by [`update`](Self::update); parameter setters
/// change the recipe but leave `h` untouched until the next `update()`.
///
/// # Example
///
/// ```
/// use shorewave::{Shape2D, WaterDepthField};
///
/// let depth = WaterDepthField::new(Shape2D::square(64));
/// // The shelf spans the waterline: submerged and exposed cells coexist.
/// assert!(depth.h().min() < 0.0);
/// assert!(depth.h().max() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct WaterDepthField {
    h: Grid2D,
    noise: FbmConfig,
    slope: f32,
    offset: f32,
    scaling: f32,
}

impl WaterDepthField {
    /// Create a field with default parameters and generate its bathymetry.
    pub fn new(shape: Shape2D) -> Self {
        let mut field = Self {
            h: Grid2D::new(shape),
            noise: FbmConfig::default(),
            slope: 2.8,
            offset: -0.5,
            scaling: 0.4,
        };
        field.update();
        field
    }

    /// The bathymetry grid.
    #[inline]
    pub fn h(&self) -> &Grid2D {
        &self.h
    }

    /// Grid shape.
    #[inline]
    pub fn shape(&self) -> Shape2D {
        self.h.shape()
    }

    /// Reallocate to a new shape. Contents are stale until `update()`.
    pub fn reshape(&mut self, shape: Shape2D) {
        self.h.reshape(shape);
    }

    /// Noise parameters.
    #[inline]
    pub fn noise_config(&self) -> &FbmConfig {
        &self.noise
    }

    /// Replace the noise parameters (takes effect at the next `update()`).
    pub fn set_noise_config(&mut self, noise: FbmConfig) {
        self.noise = noise;
    }

    /// Set the noise seed (takes effect at the next `update()`).
    pub fn set_seed(&mut self, seed: u32) {
        self.noise.seed = seed;
    }

    /// Set the cross-shore slope (takes effect at the next `update()`).
    pub fn set_slope(&mut self, slope: f32) {
        self.slope = slope;
    }

    /// Set the depth offset (takes effect at the next `update()`).
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Set the overall depth scaling (takes effect at the next `update()`).
    pub fn set_scaling(&mut self, scaling: f32) {
        self.scaling = scaling;
    }

    /// (Re)generate the bathymetry from the current parameters.
    ///
    /// `h` is the fractal-noise field plus a linear ramp
    /// `slope * (i - n0/2) / n0` and the offset, all multiplied by the
    /// scaling factor. The ramp depends only on `i` and is centered at
    /// mid-grid, so the i axis is the cross-shore direction.
    pub fn update(&mut self) {
        let shape = self.h.shape();
        self.h = fbm_perlin(shape, &self.noise);

        let n0 = shape.n0();
        for i in 0..n0 {
            let dh = self.slope * (i as f32 - 0.5 * n0 as f32) / n0 as f32;
            for j in 0..shape.n1() {
                let v = (self.h[(i, j)] + dh + self.offset) * self.scaling;
                self.h[(i, j)] = v;
            }
        }
    }
}
