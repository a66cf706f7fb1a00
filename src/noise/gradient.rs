//! Random gradient lattice for Perlin noise.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::field::Resolution;

/// Unit gradient vectors at the corners of a `res.x × res.y` cell grid.
///
/// Holds `(res.x + 1) × (res.y + 1)` vectors, row-major with corner `(i, j)`
/// at index `j * (res.x + 1) + i`.
#[derive(Debug, Clone)]
pub struct GradientGrid {
    res: Resolution,
    vectors: Vec<Vec2>,
}

impl GradientGrid {
    /// Draws one gradient per corner with a uniformly random angle in `[0, 2π)`.
    pub fn random<R: Rng>(res: Resolution, rng: &mut R) -> Self {
        let count = (res.x as usize + 1) * (res.y as usize + 1);
        let vectors = (0..count)
            .map(|_| {
                let angle = rng.random::<f32>() * TAU;
                Vec2::new(angle.cos(), angle.sin())
            })
            .collect();

        Self { res, vectors }
    }

    pub fn resolution(&self) -> Resolution {
        self.res
    }

    /// Gradient at lattice corner `(i, j)`, `i <= res.x`, `j <= res.y`.
    #[inline]
    pub fn corner(&self, i: u32, j: u32) -> Vec2 {
        self.vectors[(j as usize) * (self.res.x as usize + 1) + i as usize]
    }

    /// Replicates every corner gradient over a `dx × dy` pixel block.
    ///
    /// Corner `(i, j)` covers pixels `[i*dx, (i+1)*dx) × [j*dy, (j+1)*dy)`.
    pub fn expand(&self, dx: u32, dy: u32) -> ExpandedGradients {
        let width = (self.res.x + 1) * dx;
        let height = (self.res.y + 1) * dy;
        let mut data = vec![Vec2::ZERO; (width as usize) * (height as usize)];

        for j in 0..=self.res.y {
            for i in 0..=self.res.x {
                let g = self.corner(i, j);
                for py in j * dy..(j + 1) * dy {
                    let row = (py as usize) * (width as usize);
                    for px in i * dx..(i + 1) * dx {
                        data[row + px as usize] = g;
                    }
                }
            }
        }

        ExpandedGradients { width, height, data }
    }
}

/// Per-pixel gradient field produced by [`GradientGrid::expand`].
#[derive(Debug, Clone)]
pub struct ExpandedGradients {
    width: u32,
    height: u32,
    data: Vec<Vec2>,
}

impl ExpandedGradients {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Vec2 {
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_gradients_are_unit_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = GradientGrid::random(Resolution::new(5, 3), &mut rng);

        for j in 0..=3 {
            for i in 0..=5 {
                let len = grid.corner(i, j).length();
                assert!((len - 1.0).abs() < 1e-5, "corner ({}, {}) has length {}", i, j, len);
            }
        }
    }

    #[test]
    fn test_expand_is_block_replication() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let res = Resolution::new(3, 2);
        let (dx, dy) = (4, 5);
        let grid = GradientGrid::random(res, &mut rng);
        let expanded = grid.expand(dx, dy);

        assert_eq!(expanded.width(), 16);
        assert_eq!(expanded.height(), 15);

        for py in 0..expanded.height() {
            for px in 0..expanded.width() {
                assert_eq!(
                    expanded.get(px, py),
                    grid.corner(px / dx, py / dy),
                    "pixel ({}, {}) not covered by its corner block",
                    px,
                    py
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_gradients() {
        let res = Resolution::square(4);
        let a = GradientGrid::random(res, &mut ChaCha8Rng::seed_from_u64(3));
        let b = GradientGrid::random(res, &mut ChaCha8Rng::seed_from_u64(3));
        let c = GradientGrid::random(res, &mut ChaCha8Rng::seed_from_u64(4));

        assert_eq!(a.vectors, b.vectors);
        assert_ne!(a.vectors, c.vectors);
    }
}
