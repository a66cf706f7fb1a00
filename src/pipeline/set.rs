//! Batch generation of named texture sets.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::export::{save_noise_texture, ExportError, PngExportOptions};
use crate::field::{Resolution, Shape};
use crate::noise::NoiseError;
use super::manifest::{Manifest, ManifestError, MANIFEST_FILE_NAME};
use super::texture::TextureSpec;

/// Default output directory, relative to the invocation root.
pub const DEFAULT_OUTPUT_DIR: &str = "assets/textures/noise";

/// Pixel size of the reference textures.
pub const DEFAULT_TEXTURE_SIZE: u32 = 256;

/// Errors that can occur while generating a texture set.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Texture '{texture}' ({params}) failed: {source}")]
    Generation {
        texture: String,
        params: String,
        #[source]
        source: NoiseError,
    },
    #[error("Texture '{texture}' could not be saved: {source}")]
    Export {
        texture: String,
        #[source]
        source: ExportError,
    },
    #[error("Failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Two textures write to the same file '{0}'")]
    DuplicateFile(String),
    #[error("Texture '{texture}' has file name '{file_name}', which is not a plain file name")]
    InvalidFileName { texture: String, file_name: String },
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Seed for texture `index` of a run with master seed `seed`.
pub fn derive_texture_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(31337))
}

/// True if `file_name` is a single normal path component, so joining it
/// onto the output directory stays inside that directory.
fn is_plain_file_name(file_name: &str) -> bool {
    let mut components = Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == file_name
    )
}

/// Options controlling a texture-set run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub png: PngExportOptions,
    /// Generate textures on the rayon thread pool.
    pub parallel: bool,
    /// Write a [`Manifest`] next to the textures.
    pub write_manifest: bool,
}

/// A texture that was generated and written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTexture {
    pub name: String,
    pub path: PathBuf,
    pub seed: u64,
    pub shape: Shape,
}

/// An ordered collection of textures generated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSet {
    pub textures: Vec<TextureSpec>,
}

impl TextureSet {
    pub fn new(textures: Vec<TextureSpec>) -> Self {
        Self { textures }
    }

    /// The three reference textures used by the shader.
    pub fn default_set() -> Self {
        let shape = Shape::square(DEFAULT_TEXTURE_SIZE);
        Self::new(vec![
            TextureSpec::perlin("basic", "basic_noise.png", shape, Resolution::square(8)),
            TextureSpec::fractal(
                "fractal",
                "fractal_noise.png",
                shape,
                Resolution::square(4),
                5,
                0.5,
            ),
            TextureSpec::fractal(
                "shimmer",
                "shimmer_noise.png",
                shape,
                Resolution::square(8),
                3,
                0.7,
            ),
        ])
    }

    /// Returns a copy with every texture resized to `shape`.
    pub fn with_shape(&self, shape: Shape) -> Self {
        Self::new(self.textures.iter().map(|t| t.with_shape(shape)).collect())
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Checks every texture's parameters and that file names are plain and
    /// unique.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let mut files = HashSet::new();

        for spec in &self.textures {
            spec.validate().map_err(|source| PipelineError::Generation {
                texture: spec.name.clone(),
                params: spec.describe(),
                source,
            })?;
            if !is_plain_file_name(&spec.file_name) {
                return Err(PipelineError::InvalidFileName {
                    texture: spec.name.clone(),
                    file_name: spec.file_name.clone(),
                });
            }
            if !files.insert(spec.file_name.as_str()) {
                return Err(PipelineError::DuplicateFile(spec.file_name.clone()));
            }
        }

        Ok(())
    }

    /// Generates and saves one texture.
    fn produce(
        &self,
        index: usize,
        output_dir: &Path,
        seed: u64,
        png: &PngExportOptions,
    ) -> Result<GeneratedTexture, PipelineError> {
        let spec = &self.textures[index];
        let texture_seed = derive_texture_seed(seed, index);

        let field = spec
            .generate(texture_seed)
            .map_err(|source| PipelineError::Generation {
                texture: spec.name.clone(),
                params: spec.describe(),
                source,
            })?;

        let path = save_noise_texture(&field, &output_dir.join(&spec.file_name), png)
            .map_err(|source| PipelineError::Export {
                texture: spec.name.clone(),
                source,
            })?;

        Ok(GeneratedTexture {
            name: spec.name.clone(),
            path,
            seed: texture_seed,
            shape: spec.shape,
        })
    }

    /// Generates every texture into `output_dir`.
    ///
    /// The directory is created if missing and all parameters are validated
    /// before any noise is generated. Each texture draws from its own seeded
    /// generator, so sequential and parallel runs write identical files.
    ///
    /// # Arguments
    /// * `output_dir` - Directory receiving the textures
    /// * `seed` - Master seed
    /// * `options` - Export settings and execution mode
    /// * `on_complete` - Called after each texture is written
    ///
    /// # Returns
    /// The written textures in set order
    pub fn run<F>(
        &self,
        output_dir: &Path,
        seed: u64,
        options: &RunOptions,
        on_complete: F,
    ) -> Result<Vec<GeneratedTexture>, PipelineError>
    where
        F: Fn(&GeneratedTexture) + Send + Sync,
    {
        self.validate()?;

        std::fs::create_dir_all(output_dir).map_err(|source| PipelineError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        info!(
            "generating {} textures into {} (seed {}, parallel: {})",
            self.len(),
            output_dir.display(),
            seed,
            options.parallel
        );

        let step = |index: usize| -> Result<GeneratedTexture, PipelineError> {
            let texture = self.produce(index, output_dir, seed, &options.png)?;
            on_complete(&texture);
            Ok(texture)
        };

        let generated = if options.parallel {
            (0..self.len()).into_par_iter().map(step).collect::<Result<Vec<_>, _>>()?
        } else {
            (0..self.len()).map(step).collect::<Result<Vec<_>, _>>()?
        };

        if options.write_manifest {
            Manifest::new(seed, self).save(&output_dir.join(MANIFEST_FILE_NAME))?;
        }

        Ok(generated)
    }
}
