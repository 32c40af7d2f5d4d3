//! Seeded 1-D value noise and its fractal (fBm) layering.
//!
//! Each telemetry channel owns one generator built from its own seed, so
//! channels drift independently while staying reproducible run to run.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::core::easing::{fade, lerp};

pub const TABLE_SIZE: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParams {
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub scale: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 0.02,
        }
    }
}

#[derive(Clone, Debug)]
pub struct NoiseGenerator {
    seed: u64,
    gradients: [f64; TABLE_SIZE],
    params: NoiseParams,
}

impl NoiseGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_params(seed, NoiseParams::default())
    }

    pub fn with_params(seed: u64, params: NoiseParams) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut gradients = [0.0; TABLE_SIZE];
        for g in gradients.iter_mut() {
            *g = rng.random_range(-1.0..=1.0);
        }
        Self {
            seed,
            gradients,
            params: NoiseParams {
                octaves: params.octaves.max(1),
                ..params
            },
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn params(&self) -> NoiseParams {
        self.params
    }

    pub fn gradients(&self) -> &[f64; TABLE_SIZE] {
        &self.gradients
    }

    /// Smooth noise in [-1, 1]; continuous in `x`, periodic every 256 units.
    pub fn noise1d(&self, x: f64) -> f64 {
        if !x.is_finite() {
            return 0.0;
        }
        let floor = x.floor();
        let t = x - floor;
        let i0 = (floor as i64).rem_euclid(TABLE_SIZE as i64) as usize;
        let i1 = (i0 + 1) % TABLE_SIZE;
        lerp(self.gradients[i0], self.gradients[i1], fade(t))
    }

    /// Octave sum normalized by total amplitude, so the result stays in [-1, 1].
    pub fn fbm(&self, x: f64) -> f64 {
        let NoiseParams {
            octaves,
            persistence,
            lacunarity,
            scale,
        } = self.params;

        let mut sum = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = scale;
        let mut total = 0.0;
        for _ in 0..octaves {
            sum += amplitude * self.noise1d(x * frequency);
            total += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }
        if total <= 0.0 || !sum.is_finite() {
            return 0.0;
        }
        sum / total
    }

    /// `fbm(time * speed)` remapped from [-1, 1] into `[min, max]`.
    pub fn range(&self, time: f64, min: f64, max: f64, speed: f64) -> f64 {
        let n = self.fbm(time * speed);
        let unit = ((n + 1.0) * 0.5).clamp(0.0, 1.0);
        min + unit * (max - min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_table_is_seed_deterministic() {
        let a = NoiseGenerator::new(7);
        let b = NoiseGenerator::new(7);
        assert_eq!(a.gradients(), b.gradients());
    }

    #[test]
    fn noise_is_continuous_across_lattice_points() {
        let n = NoiseGenerator::new(3);
        for i in 0..600 {
            let x = i as f64;
            let left = n.noise1d(x - 1e-9);
            let right = n.noise1d(x + 1e-9);
            assert!((left - right).abs() < 1e-6, "jump at x={x}");
        }
    }

    #[test]
    fn noise_hits_table_values_on_lattice() {
        let n = NoiseGenerator::new(11);
        assert_eq!(n.noise1d(5.0), n.gradients()[5]);
        assert_eq!(n.noise1d(-1.0), n.gradients()[TABLE_SIZE - 1]);
    }

    #[test]
    fn non_finite_input_is_neutral() {
        let n = NoiseGenerator::new(1);
        assert_eq!(n.noise1d(f64::NAN), 0.0);
        assert_eq!(n.fbm(f64::INFINITY), 0.0);
    }

    #[test]
    fn zero_octaves_are_promoted_to_one() {
        let n = NoiseGenerator::with_params(
            2,
            NoiseParams {
                octaves: 0,
                ..NoiseParams::default()
            },
        );
        assert_eq!(n.params().octaves, 1);
    }
}
