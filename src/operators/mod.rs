//! Grid operators: distance transform, gradients, resampling.
//!
//! This module provides:
//! - Exact squared-Euclidean distance transform (`distance_transform`)
//! - Central-difference gradients (`gradient_x`, `gradient_y`, `gradient_angle`)
//! - Affine nearest-neighbor resampling between regular grids (`resample_nearest`)
//! - Bilinear sampling over a regular grid (`BilinearSampler`)

mod distance;
mod gradient;
mod resample;

pub use distance::distance_transform;
pub use gradient::{gradient_angle, gradient_x, gradient_y};
pub use resample::{resample_nearest, BilinearSampler};
