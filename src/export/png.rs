//! PNG export for normalized noise fields.

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::Field;

/// Errors that can occur during texture export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Sample {index} has value {value}, outside [0, 1]")]
    OutOfRange { index: usize, value: f32 },
}

/// Sample depth of the written grayscale image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitDepth {
    /// 8-bit grayscale, `value * 255` truncated.
    #[default]
    Eight,
    /// 16-bit grayscale, `value * 65535` truncated.
    Sixteen,
}

impl BitDepth {
    pub fn bytes_per_sample(&self) -> u64 {
        match self {
            BitDepth::Eight => 1,
            BitDepth::Sixteen => 2,
        }
    }
}

/// What to do with samples outside `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangePolicy {
    /// Fail the export with [`ExportError::OutOfRange`].
    #[default]
    Reject,
    /// Clamp finite samples into `[0, 1]`. Non-finite samples are still rejected.
    Clamp,
}

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    pub bit_depth: BitDepth,
    pub range_policy: RangePolicy,
    /// PNG compression type.
    pub compression: CompressionType,
    /// PNG filter type.
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    fn default() -> Self {
        Self {
            bit_depth: BitDepth::Eight,
            range_policy: RangePolicy::Reject,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

/// Returns the sample mapped into `[0, 1]` according to `policy`.
fn checked_sample(index: usize, value: f32, policy: RangePolicy) -> Result<f32, ExportError> {
    if !value.is_finite() {
        return Err(ExportError::OutOfRange { index, value });
    }
    if (0.0..=1.0).contains(&value) {
        return Ok(value);
    }
    match policy {
        RangePolicy::Reject => Err(ExportError::OutOfRange { index, value }),
        RangePolicy::Clamp => Ok(value.clamp(0.0, 1.0)),
    }
}

/// Checks every sample of `field` against `policy`.
pub fn validate_range(field: &Field, policy: RangePolicy) -> Result<(), ExportError> {
    for (index, &value) in field.values().iter().enumerate() {
        checked_sample(index, value, policy)?;
    }
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Saves a `[0, 1]` field as a grayscale PNG.
///
/// The image is encoded in memory and written in one step, so a failed
/// encode leaves nothing at `path`. Missing parent directories are created.
///
/// # Arguments
/// * `field` - Normalized field to write
/// * `path` - Output file path
/// * `options` - Bit depth, range policy and PNG encoder settings
///
/// # Returns
/// The path that was written
pub fn save_noise_texture(
    field: &Field,
    path: &Path,
    options: &PngExportOptions,
) -> Result<PathBuf, ExportError> {
    validate_range(field, options.range_policy)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
    }

    let (width, height) = (field.width(), field.height());
    let policy = options.range_policy;

    let mut encoded = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut encoded, options.compression, options.filter);

    let result = match options.bit_depth {
        BitDepth::Eight => {
            let mut img: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::new(width, height);
            for y in 0..height {
                for x in 0..width {
                    let index = (y as usize) * (width as usize) + x as usize;
                    let v = checked_sample(index, field.get(x, y), policy)?;
                    img.put_pixel(x, y, Luma([(v * 255.0) as u8]));
                }
            }
            encoder.write_image(img.as_raw(), width, height, image::ExtendedColorType::L8)
        }
        BitDepth::Sixteen => {
            let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(width, height);
            for y in 0..height {
                for x in 0..width {
                    let index = (y as usize) * (width as usize) + x as usize;
                    let v = checked_sample(index, field.get(x, y), policy)?;
                    img.put_pixel(x, y, Luma([(v * 65535.0) as u16]));
                }
            }
            let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
            encoder.write_image(byte_slice, width, height, image::ExtendedColorType::L16)
        }
    };

    result.map_err(|source| ExportError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, &encoded).map_err(|e| io_error(path, e))?;

    debug!("wrote {}x{} {:?} texture to {}", width, height, options.bit_depth, path.display());
    Ok(path.to_path_buf())
}

/// Uncompressed size in bytes of a texture's pixel data.
pub fn raw_texture_size(width: u32, height: u32, bit_depth: BitDepth) -> u64 {
    (width as u64) * (height as u64) * bit_depth.bytes_per_sample()
}
