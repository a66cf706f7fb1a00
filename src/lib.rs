//! Procedural grayscale noise texture generator.
//!
//! This crate generates 2D Perlin and fractal (multi-octave) noise fields and
//! writes them as PNG textures for use by rendering shaders.

pub mod field;
pub mod noise;
pub mod export;
pub mod pipeline;

pub use field::{Field, Resolution, Shape};
pub use noise::{generate_fractal_noise_2d, generate_perlin_noise_2d, FractalNoiseConfig, NoiseError};
pub use export::{save_noise_texture, BitDepth, PngExportOptions, RangePolicy};
pub use pipeline::{NoiseKind, TextureSet, TextureSpec};
