//! Shallow-water-aware Gerstner wave field.
//!
//! The wave model is a stylized trochoidal (Gerstner) wave train that
//! refracts, shoals and loses amplitude as it approaches the shoreline of
//! a bathymetry grid:
//!
//! - a squared-distance transform of the land cells gives a saturating
//!   0 to 1 shore-distance ramp used to taper amplitude,
//! - the finite-depth dispersion relation `k = k_inf / sqrt(tanh(k_inf d))`
//!   is integrated along the propagation direction on a rotated auxiliary
//!   grid, producing an accumulated phase lag that bends wave crests
//!   toward shallow water,
//! - per frame, surface cells move on trochoidal orbits with a single
//!   nonlinear steepening correction near shore, and the displacement is
//!   resampled at the advected positions.
//!
//! This is an intentionally stylized approximation for animation, not a
//! fluid solver.

use std::f32::consts::{PI, SQRT_2};

use thiserror::Error;

use crate::grid::Grid2D;
use crate::operators::{distance_transform, resample_nearest, BilinearSampler};
use crate::types::Shape2D;

/// Error type for wave-field contract violations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WaveFieldError {
    /// A parameter changed after the last `update()`, so the static
    /// refraction fields no longer match the configuration.
    #[error("static fields are stale after a parameter change; call update() before generate()")]
    StaleFields,

    /// The bathymetry passed to `generate()` does not have the shape the
    /// static fields were computed for.
    #[error("bathymetry shape {actual} does not match updated shape {expected}")]
    ShapeMismatch {
        /// Shape recorded at the last `update()`
        expected: Shape2D,
        /// Shape of the bathymetry actually passed in
        actual: Shape2D,
    },
}

/// Consistency of the derived fields with the current parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    /// Parameters set; static fields stale.
    Configured,
    /// Static fields consistent with parameters and the last bathymetry.
    Updated,
}

/// Animated Gerstner wave field over an externally owned bathymetry grid.
///
/// The bathymetry is never stored; it is passed explicitly to
/// [`update`](Self::update) and [`generate`](Self::generate). `update`
/// recomputes the static refraction fields (base coordinates, shore
/// distance, accumulated phase lag) and records the bathymetry shape;
/// `generate` produces the displacement field for a point in time against
/// those static fields, and fails with [`WaveFieldError`] if the
/// parameters changed since the last `update` or the bathymetry shape
/// disagrees.
///
/// Note that `generate` cannot detect in-place edits of bathymetry
/// *values*; after mutating the depth grid the caller must run `update`
/// again, or the output is defined but stale.
///
/// # Example
///
/// ```
/// use shorewave::{GerstnerWaveField, Shape2D, WaterDepthField};
///
/// let depth = WaterDepthField::new(Shape2D::square(64));
/// let mut waves = GerstnerWaveField::new(depth.h());
/// let dz = waves.generate(depth.h(), 0.0).unwrap();
/// assert_eq!(dz.shape(), depth.shape());
/// ```
#[derive(Debug, Clone)]
pub struct GerstnerWaveField {
    shape: Shape2D,
    state: FieldState,

    // wave parameters
    kinf: f32,
    alpha: f32,
    steepness: f32,
    phi0: f32,
    phase_speed: f32,
    kludge: f32,
    k_clipping_ratio: f32,
    shore_dist_ratio: f32,
    shore_r_ratio: f32,

    // derived scalars
    r: f32,
    omega: f32,

    // static fields, valid in state Updated
    x0: Grid2D,
    y0: Grid2D,
    shore_dist: Grid2D,
    phi_depth: Grid2D,

    // output displacement
    dz: Grid2D,
}

impl GerstnerWaveField {
    /// Create a wave field with default parameters and compute its static
    /// fields against `h`.
    ///
    /// # Panics
    ///
    /// Panics if `h` has fewer than 2 cells along either axis.
    pub fn new(h: &Grid2D) -> Self {
        let shape = h.shape();
        let mut field = Self {
            shape,
            state: FieldState::Configured,
            kinf: 4.0,
            alpha: 15.0 / 180.0 * PI,
            steepness: 0.6,
            phi0: 0.0,
            phase_speed: 1.0,
            kludge: 20.0,
            k_clipping_ratio: 4.0,
            shore_dist_ratio: 0.8,
            shore_r_ratio: 0.9,
            r: 0.0,
            omega: 0.0,
            x0: Grid2D::new(shape),
            y0: Grid2D::new(shape),
            shore_dist: Grid2D::new(shape),
            phi_depth: Grid2D::new(shape),
            dz: Grid2D::new(shape),
        };
        field.update(h);
        field
    }

    /// Shape the static fields were computed for.
    #[inline]
    pub fn shape(&self) -> Shape2D {
        self.shape
    }

    /// Output displacement grid (all zeros before the first `generate`).
    #[inline]
    pub fn displacement(&self) -> &Grid2D {
        &self.dz
    }

    /// Shore-distance decay field in [0, 1) (0 at the shoreline).
    #[inline]
    pub fn shore_distance(&self) -> &Grid2D {
        &self.shore_dist
    }

    /// Accumulated depth phase-lag field.
    #[inline]
    pub fn phase_lag(&self) -> &Grid2D {
        &self.phi_depth
    }

    /// Deep-water peak wavenumber.
    #[inline]
    pub fn kinf(&self) -> f32 {
        self.kinf
    }

    /// Set the deep-water wavenumber; static fields become stale.
    pub fn set_kinf(&mut self, kinf: f32) {
        self.kinf = kinf;
        self.state = FieldState::Configured;
    }

    /// Set the propagation direction in radians; static fields become stale.
    pub fn set_direction(&mut self, alpha: f32) {
        self.alpha = alpha;
        self.state = FieldState::Configured;
    }

    /// Set the wave steepness; static fields become stale.
    pub fn set_steepness(&mut self, steepness: f32) {
        self.steepness = steepness;
        self.state = FieldState::Configured;
    }

    /// Set the initial phase; static fields become stale.
    pub fn set_phase(&mut self, phi0: f32) {
        self.phi0 = phi0;
        self.state = FieldState::Configured;
    }

    /// Set the phase speed; static fields become stale.
    pub fn set_phase_speed(&mut self, phase_speed: f32) {
        self.phase_speed = phase_speed;
        self.state = FieldState::Configured;
    }

    /// Set the near-shore steepening factor; static fields become stale.
    pub fn set_kludge(&mut self, kludge: f32) {
        self.kludge = kludge;
        self.state = FieldState::Configured;
    }

    /// Set the shallow-water wavenumber clipping ratio; static fields
    /// become stale.
    pub fn set_k_clipping_ratio(&mut self, ratio: f32) {
        self.k_clipping_ratio = ratio;
        self.state = FieldState::Configured;
    }

    /// Set the shore-distance decay ratio; static fields become stale.
    pub fn set_shore_dist_ratio(&mut self, ratio: f32) {
        self.shore_dist_ratio = ratio;
        self.state = FieldState::Configured;
    }

    /// Set the near-shore amplitude reduction ratio; static fields become
    /// stale.
    pub fn set_shore_r_ratio(&mut self, ratio: f32) {
        self.shore_r_ratio = ratio;
        self.state = FieldState::Configured;
    }

    /// Base linear coordinate along an axis, index `k` of `n` cells mapped
    /// into `[-scale, scale]`. Both axes normalize by `n0 - 1`.
    #[inline]
    fn axis_coord(&self, k: usize, scale: f32) -> f32 {
        scale * (2.0 * k as f32 / (self.shape.n0() - 1) as f32 - 1.0)
    }

    /// Recompute the static refraction fields against the bathymetry `h`.
    ///
    /// Adopts the shape of `h`, builds the base coordinate grids, the
    /// shore-distance decay field and the accumulated depth phase lag, and
    /// marks the field consistent so `generate` may run.
    ///
    /// # Panics
    ///
    /// Panics if `h` has fewer than 2 cells along either axis.
    pub fn update(&mut self, h: &Grid2D) {
        let shape = h.shape();
        assert!(
            shape.n0() >= 2 && shape.n1() >= 2,
            "wave field requires at least 2x2 cells, got {}",
            shape
        );
        self.shape = shape;
        let (n0, n1) = (shape.n0(), shape.n1());

        self.r = self.steepness / self.kinf;
        self.omega = self.kinf * self.phase_speed;
        self.dz.reshape(shape);

        // Base coordinate grids over [-pi, pi].
        self.x0.reshape(shape);
        self.y0.reshape(shape);
        for i in 0..n0 {
            let x = self.axis_coord(i, PI);
            for j in 0..n1 {
                self.x0[(i, j)] = x;
                self.y0[(i, j)] = self.axis_coord(j, PI);
            }
        }

        // Shore-distance decay: squared distance to the nearest land cell,
        // mapped through a saturating exponential so it ramps 0 -> 1 over
        // roughly shore_dist_ratio wavelengths.
        self.shore_dist = distance_transform(h);
        let c_decay = 0.5 / (n0 as f32 / self.kinf * self.shore_dist_ratio).powi(2);
        self.shore_dist.apply(|d| 1.0 - (-d * c_decay).exp());

        // Rotated sampling grid covering the rotated bounding square.
        let ca = self.alpha.cos();
        let sa = self.alpha.sin();
        let scale = PI * SQRT_2;

        let mut xr = Grid2D::new(shape);
        let mut yr = Grid2D::new(shape);
        for i in 0..n0 {
            let x = self.axis_coord(i, scale);
            for j in 0..n1 {
                let y = self.axis_coord(j, scale);
                xr[(i, j)] = x * ca - y * sa;
                yr[(i, j)] = x * sa + y * ca;
            }
        }
        // Step of the rotated grid along its x direction.
        let dxr = xr[(1, 0)] - xr[(0, 0)];

        // Water depth seen along the rotated rows.
        let hr = resample_nearest(&self.x0, &self.y0, h, &xr, &yr);

        // Local wavenumber excess over deep water from the finite-depth
        // dispersion relation, clipped so shallow and dry cells stay
        // bounded instead of producing NaN/inf. Dry-cell values are
        // clipped garbage; they are masked out in generate().
        let mut fk = Grid2D::new(shape);
        for i in 0..n0 {
            for j in 0..n1 {
                let v = self
                    .k_clipping_ratio
                    .min(1.0 / (-self.kinf * hr[(i, j)]).tanh().sqrt());
                fk[(i, j)] = self.kinf * (v - 1.0);
            }
        }

        // Accumulated phase lag: running integral of the wavenumber excess
        // along the propagation direction.
        let mut phi_depth_r = Grid2D::new(shape);
        for j in 0..n1 {
            phi_depth_r[(0, j)] = dxr * fk[(0, j)];
            for i in 1..n0 {
                phi_depth_r[(i, j)] = phi_depth_r[(i - 1, j)] + dxr * fk[(i, j)];
            }
        }

        // Resample back onto the axis-aligned grid through the inverse
        // rotation. Scaling the source coordinates by sqrt(2) instead of
        // rotating them keeps the source grid regular, which the affine
        // resampler requires.
        let mut x0r = Grid2D::new(shape);
        let mut y0r = Grid2D::new(shape);
        for i in 0..n0 {
            let x = self.axis_coord(i, PI);
            for j in 0..n1 {
                let y = self.axis_coord(j, PI);
                xr[(i, j)] = SQRT_2 * x;
                yr[(i, j)] = SQRT_2 * y;
                x0r[(i, j)] = x * ca + y * sa;
                y0r[(i, j)] = -x * sa + y * ca;
            }
        }
        self.phi_depth = resample_nearest(&xr, &yr, &phi_depth_r, &x0r, &y0r);

        self.state = FieldState::Updated;
    }

    /// Displaced coordinates and raw displacement for row `i`.
    fn displace_row(&self, i: usize, t: f32, x_row: &mut [f32], y_row: &mut [f32], dz_row: &mut [f32]) {
        let ca = self.alpha.cos();
        let sa = self.alpha.sin();

        for j in 0..self.shape.n1() {
            let phi = self.kinf * ca * self.x0[(i, j)] + self.kinf * sa * self.y0[(i, j)]
                - self.omega * t
                + self.phi_depth[(i, j)]
                + self.phi0;

            // Amplitude taper toward shore, with a fractional-power curve
            // so the falloff starts gently and then drops fast.
            let sd = self.shore_dist[(i, j)];
            let rloc = self.r * (1.0 - self.shore_r_ratio * sd) * sd.powf(0.2);

            x_row[j] = self.x0[(i, j)] - rloc * phi.sin() * ca;
            y_row[j] = self.y0[(i, j)] - rloc * phi.sin() * sa;
            let dz = -rloc * phi.cos();

            // Single-pass steepening feedback, stronger near shore.
            // Deliberately not iterated to a fixed point.
            let ck = (1.0 - sd) * self.kludge;
            dz_row[j] = -rloc * (phi - ck * dz).cos();
        }
    }

    /// Produce the displacement field for time `t`.
    ///
    /// Every submerged cell (`h < 0`) receives the trochoidal displacement
    /// bilinearly resampled at its advected position; dry cells are forced
    /// to 0. Returns the displacement grid, also available afterwards via
    /// [`displacement`](Self::displacement).
    ///
    /// # Errors
    ///
    /// [`WaveFieldError::StaleFields`] if a parameter changed since the
    /// last [`update`](Self::update); [`WaveFieldError::ShapeMismatch`] if
    /// `h` does not have the updated shape.
    pub fn generate(&mut self, h: &Grid2D, t: f32) -> Result<&Grid2D, WaveFieldError> {
        self.check_consistent(h)?;
        let (n0, n1) = (self.shape.n0(), self.shape.n1());

        let mut x = Grid2D::new(self.shape);
        let mut y = Grid2D::new(self.shape);
        let mut raw = Grid2D::new(self.shape);

        for i in 0..n0 {
            let lo = i * n1;
            let hi = lo + n1;
            self.displace_row(
                i,
                t,
                &mut x.as_mut_slice()[lo..hi],
                &mut y.as_mut_slice()[lo..hi],
                &mut raw.as_mut_slice()[lo..hi],
            );
        }

        self.resample_displaced(h, &x, &y, &raw);
        Ok(&self.dz)
    }

    /// Parallel variant of [`generate`](Self::generate); identical results,
    /// rows computed across threads.
    #[cfg(feature = "parallel")]
    pub fn generate_parallel(&mut self, h: &Grid2D, t: f32) -> Result<&Grid2D, WaveFieldError> {
        use rayon::prelude::*;

        self.check_consistent(h)?;
        let n1 = self.shape.n1();

        let mut x = Grid2D::new(self.shape);
        let mut y = Grid2D::new(self.shape);
        let mut raw = Grid2D::new(self.shape);

        {
            let (xs, ys, raws) = (x.as_mut_slice(), y.as_mut_slice(), raw.as_mut_slice());
            xs.par_chunks_mut(n1)
                .zip(ys.par_chunks_mut(n1))
                .zip(raws.par_chunks_mut(n1))
                .enumerate()
                .for_each(|(i, ((x_row, y_row), raw_row))| {
                    self.displace_row(i, t, x_row, y_row, raw_row);
                });
        }

        self.resample_displaced(h, &x, &y, &raw);
        Ok(&self.dz)
    }

    fn check_consistent(&self, h: &Grid2D) -> Result<(), WaveFieldError> {
        if self.state != FieldState::Updated {
            return Err(WaveFieldError::StaleFields);
        }
        if h.shape() != self.shape {
            return Err(WaveFieldError::ShapeMismatch {
                expected: self.shape,
                actual: h.shape(),
            });
        }
        Ok(())
    }

    /// Resample the raw displacement at the advected positions and mask
    /// out dry cells.
    fn resample_displaced(&mut self, h: &Grid2D, x: &Grid2D, y: &Grid2D, raw: &Grid2D) {
        let sampler = BilinearSampler::new(&self.x0, &self.y0, raw);
        for i in 0..self.shape.n0() {
            for j in 0..self.shape.n1() {
                self.dz[(i, j)] = if h[(i, j)] < 0.0 {
                    sampler.sample(x[(i, j)], y[(i, j)])
                } else {
                    0.0
                };
            }
        }
    }
}
