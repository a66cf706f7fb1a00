//! Pipeline module for generating named texture sets.
//!
//! A [`TextureSet`] describes which textures to build; running it generates
//! each one from a per-texture seed and writes it through the PNG exporter.

mod texture;
mod set;
mod manifest;

pub use texture::{NoiseKind, TextureSpec};
pub use set::{
    derive_texture_seed, GeneratedTexture, PipelineError, RunOptions, TextureSet,
    DEFAULT_OUTPUT_DIR, DEFAULT_TEXTURE_SIZE,
};
pub use manifest::{Manifest, ManifestError, MANIFEST_FILE_NAME};
