//! Export module for writing noise fields to image files.
//!
//! Fields are written as single-channel PNG, 8-bit by default with an
//! optional 16-bit mode for higher-precision shaders.

mod png;

pub use png::{
    raw_texture_size, save_noise_texture, validate_range, BitDepth, ExportError,
    PngExportOptions, RangePolicy,
};
