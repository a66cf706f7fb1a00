//! Texture descriptions and single-texture generation.

use std::fmt;

use log::{debug, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::field::{Field, Resolution, Shape};
use crate::noise::{
    generate_fractal_noise_2d, generate_perlin_noise_2d, normalize, FractalNoiseConfig,
    validate_perlin, NoiseError, Normalization,
};

/// Which noise function fills a texture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoiseKind {
    /// A single Perlin tile, min-max normalized for export.
    Perlin,
    /// Multi-octave fractal noise.
    Fractal(FractalNoiseConfig),
}

impl NoiseKind {
    pub fn fractal(octaves: u32, persistence: f32) -> Self {
        NoiseKind::Fractal(FractalNoiseConfig::new(octaves, persistence))
    }

    /// Finest grid resolution this kind samples for a base `res`.
    pub fn finest_resolution(&self, res: Resolution) -> Option<Resolution> {
        match self {
            NoiseKind::Perlin => Some(res),
            NoiseKind::Fractal(config) => config.finest_resolution(res),
        }
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseKind::Perlin => write!(f, "perlin"),
            NoiseKind::Fractal(config) => write!(
                f,
                "fractal, {} octaves, persistence {}",
                config.octaves, config.persistence
            ),
        }
    }
}

/// A named texture to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSpec {
    /// Short name used in messages.
    pub name: String,
    /// File name inside the output directory.
    pub file_name: String,
    /// Pixel dimensions.
    pub shape: Shape,
    /// Base gradient-grid resolution.
    pub res: Resolution,
    pub kind: NoiseKind,
}

impl TextureSpec {
    pub fn new(name: &str, file_name: &str, shape: Shape, res: Resolution, kind: NoiseKind) -> Self {
        Self {
            name: name.to_string(),
            file_name: file_name.to_string(),
            shape,
            res,
            kind,
        }
    }

    /// Plain Perlin texture.
    pub fn perlin(name: &str, file_name: &str, shape: Shape, res: Resolution) -> Self {
        Self::new(name, file_name, shape, res, NoiseKind::Perlin)
    }

    /// Fractal texture.
    pub fn fractal(
        name: &str,
        file_name: &str,
        shape: Shape,
        res: Resolution,
        octaves: u32,
        persistence: f32,
    ) -> Self {
        Self::new(name, file_name, shape, res, NoiseKind::fractal(octaves, persistence))
    }

    /// Returns a copy with a different pixel shape.
    pub fn with_shape(&self, shape: Shape) -> Self {
        Self {
            shape,
            ..self.clone()
        }
    }

    /// Human-readable parameter summary, used in error context.
    pub fn describe(&self) -> String {
        format!("{} px, res {}, {}", self.shape, self.res, self.kind)
    }

    /// Checks that the texture can be generated without producing any noise.
    pub fn validate(&self) -> Result<(), NoiseError> {
        match &self.kind {
            NoiseKind::Perlin => validate_perlin(self.shape, self.res),
            NoiseKind::Fractal(config) => config.validate(self.shape, self.res),
        }
    }

    /// Generates the texture's field in `[0, 1]` from `seed`.
    pub fn generate(&self, seed: u64) -> Result<Field, NoiseError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        debug!("generating '{}' ({}) with seed {}", self.name, self.describe(), seed);

        match &self.kind {
            NoiseKind::Perlin => {
                let mut field = generate_perlin_noise_2d(self.shape, self.res, &mut rng)?;
                if let Normalization::Degenerate { value } = normalize(&mut field) {
                    warn!("perlin texture '{}' is constant; filled with {}", self.name, value);
                }
                Ok(field)
            }
            NoiseKind::Fractal(config) => {
                generate_fractal_noise_2d(self.shape, self.res, config, &mut rng)
            }
        }
    }
}
