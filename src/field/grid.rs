//! Row-major scalar field storage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dims::Shape;

/// Errors raised when building a field from raw data.
#[derive(Error, Debug, PartialEq)]
pub enum FieldError {
    #[error("Field data length {actual} does not match shape {shape} ({expected} samples)")]
    DataLength {
        shape: Shape,
        expected: usize,
        actual: usize,
    },
}

/// A 2D grid of `f32` samples stored in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    shape: Shape,
    data: Vec<f32>,
}

impl Field {
    /// Creates a zero-filled field.
    pub fn new(shape: Shape) -> Self {
        Self::filled(shape, 0.0)
    }

    /// Creates a field with every sample set to `value`.
    pub fn filled(shape: Shape, value: f32) -> Self {
        Self {
            shape,
            data: vec![value; shape.len()],
        }
    }

    /// Wraps existing row-major samples.
    pub fn from_vec(shape: Shape, data: Vec<f32>) -> Result<Self, FieldError> {
        if data.len() != shape.len() {
            return Err(FieldError::DataLength {
                shape,
                expected: shape.len(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn width(&self) -> u32 {
        self.shape.width
    }

    pub fn height(&self) -> u32 {
        self.shape.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.shape.width as usize) + (x as usize)
    }

    /// Sample at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        let i = self.index(x, y);
        self.data[i] = value;
    }

    pub fn values(&self) -> &[f32] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Minimum and maximum sample values.
    pub fn value_range(&self) -> (f32, f32) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;

        for &v in &self.data {
            min = min.min(v);
            max = max.max(v);
        }

        (min, max)
    }

    /// Adds `weight * other` to every sample.
    ///
    /// Both fields must have the same shape.
    pub fn add_scaled(&mut self, other: &Field, weight: f32) {
        debug_assert_eq!(self.shape, other.shape);
        for (dst, &src) in self.data.iter_mut().zip(other.data.iter()) {
            *dst += weight * src;
        }
    }

    /// Mean absolute difference between horizontally and vertically adjacent
    /// samples. Higher values mean more high-frequency detail.
    pub fn mean_abs_gradient(&self) -> f64 {
        let (w, h) = (self.shape.width, self.shape.height);
        let mut total = 0.0f64;
        let mut count = 0usize;

        for y in 0..h {
            for x in 0..w {
                let v = self.get(x, y);
                if x + 1 < w {
                    total += (self.get(x + 1, y) - v).abs() as f64;
                    count += 1;
                }
                if y + 1 < h {
                    total += (self.get(x, y + 1) - v).abs() as f64;
                    count += 1;
                }
            }
        }

        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }
}
