//! # shorewave
//!
//! Procedural shoreline ocean-wave fields on dense 2D grids.
//!
//! This crate provides the core building blocks for animating a stylized
//! ocean surface near a synthetic coast:
//! - Dense 2D float grids with byte-buffer export (`Grid2D`)
//! - Exact squared-Euclidean distance transform (`distance_transform`)
//! - Central-difference gradient operators (`gradient_x`, `gradient_y`)
//! - Affine nearest-neighbor and bilinear resampling between regular grids
//! - Seeded weighted fractal noise (`fbm_perlin`)
//! - Fractal bathymetry over a cross-shore shelf (`WaterDepthField`)
//! - Depth-refracted Gerstner waves (`GerstnerWaveField`)
//!
//! # Example
//!
//! ```
//! use shorewave::{GerstnerWaveField, Shape2D, WaterDepthField};
//!
//! // Bathymetry: fractal noise over a linear shelf, negative = water.
//! let mut depth = WaterDepthField::new(Shape2D::square(128));
//!
//! // Static refraction fields, then one displacement frame per time step.
//! let mut waves = GerstnerWaveField::new(depth.h());
//! for frame in 0..3 {
//!     let dz = waves.generate(depth.h(), frame as f32 * 0.1).unwrap();
//!     let _bytes = dz.to_grayscale_bytes();
//! }
//!
//! // Any reconfiguration goes through update() before the next frame.
//! depth.set_seed(7);
//! depth.update();
//! waves.update(depth.h());
//! let _dz = waves.generate(depth.h(), 0.3).unwrap();
//! ```
//!
//! All computation is single-threaded, synchronous and deterministic:
//! identical parameters always rebuild identical fields. With the
//! `parallel` feature, per-cell loops can run across threads with
//! identical observable results.

pub mod grid;
pub mod noise;
pub mod operators;
pub mod physics;
pub mod types;

// Re-export main types for convenience
pub use grid::{Grid2D, GridStatistics, PALETTE_STOPS};
pub use noise::{fbm_perlin, FbmConfig};
pub use operators::{
    distance_transform, gradient_angle, gradient_x, gradient_y, resample_nearest, BilinearSampler,
};
pub use physics::{GerstnerWaveField, WaterDepthField, WaveFieldError};
pub use types::Shape2D;
