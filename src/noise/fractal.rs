//! Multi-octave fractal noise built from layered Perlin tiles.

use std::f32::consts::SQRT_2;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::field::{Field, Resolution, Shape};
use super::error::{checked_cell_size, NoiseError};
use super::perlin::generate_perlin_noise_2d;

/// Value written to every sample when a field has no range to normalize.
pub const DEGENERATE_FILL: f32 = 0.5;

/// Configuration for multi-octave fractal noise generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractalNoiseConfig {
    /// Number of noise octaves. Octave `k` uses `res * 2^k` grid cells.
    pub octaves: u32,
    /// Amplitude decay per octave (0.4-0.7 typical).
    pub persistence: f32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 1,
            persistence: 0.5,
        }
    }
}

impl FractalNoiseConfig {
    pub fn new(octaves: u32, persistence: f32) -> Self {
        Self { octaves, persistence }
    }

    /// Checks the octave parameters and that every octave's resolution
    /// divides `shape` evenly.
    pub fn validate(&self, shape: Shape, res: Resolution) -> Result<(), NoiseError> {
        self.octave_resolutions(shape, res).map(|_| ())
    }

    /// Validated grid resolution of every octave, coarsest first.
    pub fn octave_resolutions(
        &self,
        shape: Shape,
        res: Resolution,
    ) -> Result<Vec<Resolution>, NoiseError> {
        if self.octaves == 0 {
            return Err(NoiseError::InvalidOctaves);
        }
        if !self.persistence.is_finite() {
            return Err(NoiseError::InvalidPersistence(self.persistence));
        }

        let resolutions = (0..self.octaves)
            .map(|octave| {
                let octave_res = res
                    .for_octave(octave)
                    .ok_or(NoiseError::ResolutionOverflow { res, octave })?;
                checked_cell_size(shape, octave_res)?;
                Ok(octave_res)
            })
            .collect::<Result<Vec<_>, NoiseError>>()?;

        // The normalization range spans up to twice the peak magnitude.
        if !(2.0 * self.peak_amplitude()).is_finite() {
            return Err(NoiseError::InvalidPersistence(self.persistence));
        }

        Ok(resolutions)
    }

    /// Upper bound on the magnitude of the summed octaves.
    fn peak_amplitude(&self) -> f32 {
        let mut amplitude = 1.0f32;
        let mut peak = 0.0f32;
        for _ in 0..self.octaves {
            peak += amplitude.abs() * SQRT_2;
            amplitude *= self.persistence;
        }
        peak
    }

    /// Finest grid resolution used by the last octave.
    pub fn finest_resolution(&self, res: Resolution) -> Option<Resolution> {
        res.for_octave(self.octaves.checked_sub(1)?)
    }
}

/// Outcome of min-max normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Samples were mapped from `[min, max]` onto `[0, 1]`.
    Scaled { min: f32, max: f32 },
    /// The field had no usable range and was filled with `value`.
    Degenerate { value: f32 },
}

/// Min-max normalizes `field` to `[0, 1]` in place.
///
/// A constant field (or one whose range is not finite) is filled with
/// [`DEGENERATE_FILL`] instead of dividing by zero.
pub fn normalize(field: &mut Field) -> Normalization {
    let (min, max) = field.value_range();
    let range = max - min;

    if !(range.is_finite() && range > 0.0) {
        field.values_mut().fill(DEGENERATE_FILL);
        return Normalization::Degenerate { value: DEGENERATE_FILL };
    }

    for v in field.values_mut() {
        *v = (*v - min) / range;
    }

    Normalization::Scaled { min, max }
}

/// Generates fractal noise by summing Perlin octaves at doubling frequencies.
///
/// Octave `k` samples a fresh gradient grid of `res * 2^k` cells, weighted by
/// `persistence^k`. All octaves draw from `rng` in order. The sum is
/// normalized to `[0, 1]`.
///
/// # Arguments
/// * `shape` - Pixel dimensions of the output
/// * `res` - Grid resolution of the first octave
/// * `config` - Octave count and persistence
/// * `rng` - Source of gradient angles
///
/// # Returns
/// A field in `[0, 1]` with at least one sample at each end, or a constant
/// [`DEGENERATE_FILL`] field if the sum had no range
pub fn generate_fractal_noise_2d<R: Rng>(
    shape: Shape,
    res: Resolution,
    config: &FractalNoiseConfig,
    rng: &mut R,
) -> Result<Field, NoiseError> {
    let resolutions = config.octave_resolutions(shape, res)?;

    let mut noise = Field::new(shape);
    let mut amplitude = 1.0f32;

    for (octave, &octave_res) in resolutions.iter().enumerate() {
        let layer = generate_perlin_noise_2d(shape, octave_res, rng)?;

        debug!("octave {}: res {} amplitude {:.4}", octave, octave_res, amplitude);
        noise.add_scaled(&layer, amplitude);
        amplitude *= config.persistence;
    }

    if let Normalization::Degenerate { value } = normalize(&mut noise) {
        warn!(
            "fractal noise {} at res {} is constant; filled with {}",
            shape, res, value
        );
    }

    Ok(noise)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_config() {
        let config = FractalNoiseConfig::default();
        assert_eq!(config.octaves, 1);
        assert_eq!(config.persistence, 0.5);
    }

    #[test]
    fn test_fractal_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = FractalNoiseConfig::new(5, 0.5);
        let field = generate_fractal_noise_2d(
            Shape::square(256),
            Resolution::square(4),
            &config,
            &mut rng,
        )
        .unwrap();

        for &v in field.values() {
            assert!((0.0..=1.0).contains(&v), "value {} out of [0, 1]", v);
        }
        assert_eq!(field.value_range(), (0.0, 1.0));
    }

    #[test]
    fn test_single_octave_matches_normalized_perlin() {
        let shape = Shape::square(64);
        let res = Resolution::square(8);

        let fractal = generate_fractal_noise_2d(
            shape,
            res,
            &FractalNoiseConfig::new(1, 0.5),
            &mut ChaCha8Rng::seed_from_u64(2024),
        )
        .unwrap();

        let mut perlin =
            generate_perlin_noise_2d(shape, res, &mut ChaCha8Rng::seed_from_u64(2024)).unwrap();
        normalize(&mut perlin);

        assert_eq!(fractal, perlin);
    }

    #[test]
    fn test_more_octaves_add_detail() {
        let shape = Shape::square(128);
        let res = Resolution::square(4);

        let smooth = generate_fractal_noise_2d(
            shape,
            res,
            &FractalNoiseConfig::new(1, 0.5),
            &mut ChaCha8Rng::seed_from_u64(17),
        )
        .unwrap();
        let detailed = generate_fractal_noise_2d(
            shape,
            res,
            &FractalNoiseConfig::new(4, 0.5),
            &mut ChaCha8Rng::seed_from_u64(17),
        )
        .unwrap();

        assert_eq!(smooth.value_range(), (0.0, 1.0));
        assert_eq!(detailed.value_range(), (0.0, 1.0));
        assert!(
            detailed.mean_abs_gradient() > smooth.mean_abs_gradient(),
            "4 octaves ({}) should be rougher than 1 ({})",
            detailed.mean_abs_gradient(),
            smooth.mean_abs_gradient()
        );
    }

    #[test]
    fn test_normalize_constant_field() {
        let mut field = Field::filled(Shape::square(16), 3.25);
        let outcome = normalize(&mut field);

        assert_eq!(outcome, Normalization::Degenerate { value: DEGENERATE_FILL });
        assert!(field.values().iter().all(|&v| v == DEGENERATE_FILL));
    }

    #[test]
    fn test_normalize_scaled() {
        let mut field = Field::from_vec(Shape::new(4, 1), vec![-2.0, 0.0, 1.0, 2.0]).unwrap();
        let outcome = normalize(&mut field);

        assert_eq!(outcome, Normalization::Scaled { min: -2.0, max: 2.0 });
        assert_eq!(field.values(), &[0.0, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_zero_persistence_keeps_first_octave() {
        // Persistence 0 keeps only the first octave.
        let shape = Shape::square(32);
        let res = Resolution::square(2);
        let a = generate_fractal_noise_2d(
            shape,
            res,
            &FractalNoiseConfig::new(3, 0.0),
            &mut ChaCha8Rng::seed_from_u64(8),
        )
        .unwrap();
        assert_eq!(a.value_range(), (0.0, 1.0));
    }

    #[test]
    fn test_octave_dimension_mismatch() {
        // 96 / (4 * 2^3) = 3 but 96 / (4 * 2^4) is not integral.
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let shape = Shape::square(96);
        let res = Resolution::square(4);

        assert!(generate_fractal_noise_2d(shape, res, &FractalNoiseConfig::new(4, 0.5), &mut rng).is_ok());

        let err = generate_fractal_noise_2d(shape, res, &FractalNoiseConfig::new(5, 0.5), &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            NoiseError::DimensionMismatch { shape, res: Resolution::square(64) }
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let shape = Shape::square(64);
        let res = Resolution::square(4);

        assert_eq!(
            FractalNoiseConfig::new(0, 0.5).validate(shape, res),
            Err(NoiseError::InvalidOctaves)
        );
        assert!(matches!(
            FractalNoiseConfig::new(2, f32::NAN).validate(shape, res),
            Err(NoiseError::InvalidPersistence(_))
        ));
        assert_eq!(
            FractalNoiseConfig::new(40, 0.5).validate(shape, res),
            Err(NoiseError::DimensionMismatch { shape, res: Resolution::square(128) })
        );
    }

    #[test]
    fn test_overflowing_persistence_rejected() {
        let shape = Shape::square(64);
        let res = Resolution::square(2);

        for persistence in [1e30, -1e30, 1e20] {
            let config = FractalNoiseConfig::new(3, persistence);
            assert_eq!(
                config.validate(shape, res),
                Err(NoiseError::InvalidPersistence(persistence))
            );
            let result =
                generate_fractal_noise_2d(shape, res, &config, &mut ChaCha8Rng::seed_from_u64(3));
            assert_eq!(result, Err(NoiseError::InvalidPersistence(persistence)));
        }

        // A large persistence with a single octave never scales anything.
        assert!(FractalNoiseConfig::new(1, 1e30).validate(shape, res).is_ok());
        assert!(FractalNoiseConfig::new(3, 100.0).validate(shape, res).is_ok());
    }

    #[test]
    fn test_octave_resolutions() {
        let config = FractalNoiseConfig::new(3, 0.5);
        let resolutions = config
            .octave_resolutions(Shape::square(64), Resolution::new(2, 4))
            .unwrap();
        assert_eq!(
            resolutions,
            vec![Resolution::new(2, 4), Resolution::new(4, 8), Resolution::new(8, 16)]
        );
    }

    #[test]
    fn test_finest_resolution() {
        let config = FractalNoiseConfig::new(5, 0.5);
        assert_eq!(config.finest_resolution(Resolution::square(4)), Some(Resolution::square(64)));
        assert_eq!(FractalNoiseConfig::new(0, 0.5).finest_resolution(Resolution::square(4)), None);
    }
}
