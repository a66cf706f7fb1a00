//! Single-tile 2D gradient (Perlin) noise.

use std::f32::consts::SQRT_2;

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::field::{Field, Resolution, Shape};
use super::error::{checked_cell_size, NoiseError};
use super::gradient::GradientGrid;

/// Quintic smoothstep `6t⁵ - 15t⁴ + 10t³`.
#[inline]
pub fn quintic_fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Checks that `res` is non-empty and divides a non-empty `shape` evenly.
pub fn validate_perlin(shape: Shape, res: Resolution) -> Result<(), NoiseError> {
    checked_cell_size(shape, res).map(|_| ())
}

/// Generates one tile of 2D Perlin noise.
///
/// A fresh [`GradientGrid`] of `res` cells is drawn from `rng` on every call,
/// so the output is reproducible only through the state of `rng`.
///
/// # Arguments
/// * `shape` - Pixel dimensions of the output
/// * `res` - Number of gradient cells per axis; must divide `shape` evenly
/// * `rng` - Source of gradient angles
///
/// # Returns
/// A field with values in `[-√2, √2]`, concentrated near `[-1, 1]`
pub fn generate_perlin_noise_2d<R: Rng>(
    shape: Shape,
    res: Resolution,
    rng: &mut R,
) -> Result<Field, NoiseError> {
    let (dx, dy) = checked_cell_size(shape, res)?;
    debug!("perlin {} over {} cells ({}x{} px per cell)", shape, res, dx, dy);

    let gradients = GradientGrid::random(res, rng).expand(dx, dy);
    let (cell_w, cell_h) = (dx as f32, dy as f32);
    let mut field = Field::new(shape);

    for y in 0..shape.height {
        let v = (y % dy) as f32 / cell_h;
        let tv = quintic_fade(v);

        for x in 0..shape.width {
            let u = (x % dx) as f32 / cell_w;
            let tu = quintic_fade(u);

            let n00 = Vec2::new(u, v).dot(gradients.get(x, y));
            let n10 = Vec2::new(u - 1.0, v).dot(gradients.get(x + dx, y));
            let n01 = Vec2::new(u, v - 1.0).dot(gradients.get(x, y + dy));
            let n11 = Vec2::new(u - 1.0, v - 1.0).dot(gradients.get(x + dx, y + dy));

            let n0 = n00 * (1.0 - tu) + tu * n10;
            let n1 = n01 * (1.0 - tu) + tu * n11;

            field.set(x, y, SQRT_2 * ((1.0 - tv) * n0 + tv * n1));
        }
    }

    Ok(field)
}
