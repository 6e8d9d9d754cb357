//! Seeded gradient noise.

use noise::{NoiseFn, OpenSimplex};

use crate::resource::Resource;

/// Sample spacing applied to integer coordinates.
pub const DEFAULT_FREQUENCY: f64 = 0.01;

/// 2D OpenSimplex noise with a fixed seed and frequency.
pub struct NoiseGenerator {
    frequency: f64,
    source: OpenSimplex,
}

impl NoiseGenerator {
    pub fn new(seed: i64) -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            // Seeds are 32-bit in the generator; wider script integers wrap.
            source: OpenSimplex::new(seed as u32),
        }
    }

    /// Samples at integer grid coordinates. The result lies in `[-1, 1]`.
    pub fn sample(&self, x: i64, y: i64) -> f32 {
        let value = self
            .source
            .get([x as f64 * self.frequency, y as f64 * self.frequency]);
        value.clamp(-1.0, 1.0) as f32
    }
}

impl Resource for NoiseGenerator {
    const KIND: &'static str = "noise";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_values() {
        let a = NoiseGenerator::new(1337);
        let b = NoiseGenerator::new(1337);
        for (x, y) in [(0, 0), (10, 20), (-35, 7), (1000, -1000)] {
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn values_are_bounded() {
        let n = NoiseGenerator::new(42);
        for x in -50..50 {
            for y in (-50..50).step_by(7) {
                let v = n.sample(x, y);
                assert!(v.is_finite());
                assert!((-1.0..=1.0).contains(&v), "{v} at ({x}, {y})");
            }
        }
    }

    #[test]
    fn different_seeds_differ_somewhere() {
        let a = NoiseGenerator::new(1);
        let b = NoiseGenerator::new(2);
        let differs = (0..200).any(|i| a.sample(i * 3, i * 5) != b.sample(i * 3, i * 5));
        assert!(differs);
    }

    #[test]
    fn neighbouring_samples_are_smooth() {
        let n = NoiseGenerator::new(9);
        let v0 = n.sample(100, 100);
        let v1 = n.sample(101, 100);
        assert!((v0 - v1).abs() < 0.2);
    }
}
