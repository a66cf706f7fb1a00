//! JSON manifest recording how a texture set was generated.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::set::TextureSet;
use super::texture::TextureSpec;

/// File name of the manifest written next to the textures.
pub const MANIFEST_FILE_NAME: &str = "noise_manifest.json";

/// Errors that can occur while reading or writing a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid manifest {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Seed and texture parameters of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Generator name and version.
    pub generator: String,
    /// Master seed; texture `i` uses `derive_texture_seed(seed, i)`.
    pub seed: u64,
    pub textures: Vec<TextureSpec>,
}

impl Manifest {
    pub fn new(seed: u64, set: &TextureSet) -> Self {
        Self {
            generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            seed,
            textures: set.textures.clone(),
        }
    }

    /// Texture set that reproduces this run.
    pub fn texture_set(&self) -> TextureSet {
        TextureSet::new(self.textures.clone())
    }

    /// Writes the manifest as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let json = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_manifest_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE_NAME);
        let manifest = Manifest::new(1234, &TextureSet::default_set());

        manifest.save(&path).unwrap();
        let loaded = Manifest::load(&path).unwrap();

        assert_eq!(loaded, manifest);
        assert_eq!(loaded.texture_set(), TextureSet::default_set());
    }

    #[test]
    fn test_manifest_json_layout() {
        let manifest = Manifest::new(5, &TextureSet::default_set());
        let value = serde_json::to_value(&manifest).unwrap();

        assert_eq!(value["seed"], 5);
        assert_eq!(value["textures"][0]["kind"]["type"], "perlin");
        assert_eq!(value["textures"][1]["kind"]["type"], "fractal");
        assert_eq!(value["textures"][1]["kind"]["octaves"], 5);
        assert_eq!(value["textures"][2]["file_name"], "shimmer_noise.png");
    }

    #[test]
    fn test_load_missing_manifest() {
        let dir = tempdir().unwrap();
        let err = Manifest::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ \"seed\": \"not a number\" }").unwrap();

        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Json { .. }));
    }
}
