//! Errors raised by noise generation.

use thiserror::Error;

use crate::field::{Resolution, Shape};

/// Errors that can occur while generating a noise field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    #[error("Shape {shape} is not evenly divisible by grid resolution {res}")]
    DimensionMismatch { shape: Shape, res: Resolution },
    #[error("Grid resolution {0} must have at least one cell per axis")]
    InvalidResolution(Resolution),
    #[error("Shape {0} has no pixels")]
    EmptyShape(Shape),
    #[error("Octave count must be at least 1")]
    InvalidOctaves,
    #[error("Persistence {0} is not finite or overflows the octave sum")]
    InvalidPersistence(f32),
    #[error("Grid resolution {res} overflows at octave {octave}")]
    ResolutionOverflow { res: Resolution, octave: u32 },
}

/// Returns the per-axis cell size for `res` over `shape`.
pub(crate) fn checked_cell_size(shape: Shape, res: Resolution) -> Result<(u32, u32), NoiseError> {
    if shape.is_empty() {
        return Err(NoiseError::EmptyShape(shape));
    }
    if res.x == 0 || res.y == 0 {
        return Err(NoiseError::InvalidResolution(res));
    }
    shape
        .cell_size(res)
        .ok_or(NoiseError::DimensionMismatch { shape, res })
}
