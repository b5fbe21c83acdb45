//! Wave physics: bathymetry synthesis and Gerstner wave fields.

mod gerstner;
mod water_depth;

pub use gerstner::{GerstnerWaveField, WaveFieldError};
pub use water_depth::WaterDepthField;
