//! Pixel shapes and gradient-grid resolutions.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of a field or texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl Shape {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Square shape with the same size on both axes.
    pub const fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the per-axis cell size in pixels if `res` divides this shape
    /// evenly on both axes.
    pub fn cell_size(&self, res: Resolution) -> Option<(u32, u32)> {
        if res.x == 0 || res.y == 0 {
            return None;
        }
        if self.width % res.x != 0 || self.height % res.y != 0 {
            return None;
        }
        Some((self.width / res.x, self.height / res.y))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Number of gradient-grid cells along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub x: u32,
    pub y: u32,
}

impl Resolution {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub const fn square(cells: u32) -> Self {
        Self::new(cells, cells)
    }

    /// Multiplies both axes by `factor`, returning `None` on overflow.
    pub fn scaled(&self, factor: u32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_mul(factor)?,
            y: self.y.checked_mul(factor)?,
        })
    }

    /// Resolution of the given fractal octave (`self * 2^octave`).
    pub fn for_octave(&self, octave: u32) -> Option<Self> {
        let factor = 1u32.checked_shl(octave)?;
        self.scaled(factor)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size() {
        let shape = Shape::square(256);
        assert_eq!(shape.cell_size(Resolution::square(8)), Some((32, 32)));
        assert_eq!(shape.cell_size(Resolution::new(4, 16)), Some((64, 16)));
        assert_eq!(Shape::square(250).cell_size(Resolution::square(8)), None);
        assert_eq!(shape.cell_size(Resolution::new(0, 8)), None);
    }

    #[test]
    fn test_resolution_for_octave() {
        let res = Resolution::new(4, 8);
        assert_eq!(res.for_octave(0), Some(Resolution::new(4, 8)));
        assert_eq!(res.for_octave(3), Some(Resolution::new(32, 64)));
        assert_eq!(res.for_octave(32), None);
        assert_eq!(Resolution::square(u32::MAX).scaled(2), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::new(256, 128).to_string(), "256x128");
        assert_eq!(Resolution::square(8).to_string(), "8x8");
    }
}
