//! Scalar field data structures.
//!
//! A [`Field`] is the in-memory form of a noise texture: one `f32` sample
//! per pixel, row-major.

mod dims;
mod grid;

pub use dims::{Resolution, Shape};
pub use grid::{Field, FieldError};
