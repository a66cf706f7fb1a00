//! Noise generation module for texture synthesis.
//!
//! Gradient-grid Perlin noise and its multi-octave fractal sum. Randomness is
//! always passed in explicitly so callers control reproducibility.

mod error;
mod gradient;
mod perlin;
mod fractal;

pub use error::NoiseError;
pub use gradient::{ExpandedGradients, GradientGrid};
pub use perlin::{generate_perlin_noise_2d, quintic_fade, validate_perlin};
pub use fractal::{
    generate_fractal_noise_2d, normalize, FractalNoiseConfig, Normalization, DEGENERATE_FILL,
};
