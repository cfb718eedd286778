//! Seeded lattice value noise for elevation synthesis.
//!
//! The elevation formula evaluates this primitive at several fixed
//! frequencies (see the generator module), so the noise itself is a single
//! unscaled lattice: callers multiply world coordinates by their frequency
//! before sampling.
//!
//! # Implementation
//!
//! Classic 2D value noise: each integer lattice corner hashes to a value in
//! [-1, 1] through a seeded permutation table, and samples interpolate the
//! four surrounding corners with Perlin's quintic fade (6t^5 - 15t^4 + 10t^3)
//! for C2 continuity. Interpolation is convex, so outputs stay in [-1, 1]
//! without clamping. Deterministic for a given seed.
//!
//! # References
//!
//! - Perlin, K. (2002). Improving noise. ACM Transactions on Graphics, 21(3).

/// Permutation table size (must be power of 2).
const PERM_SIZE: usize = 256;

/// Seeded 2D value-noise lattice.
#[derive(Clone, Debug)]
pub struct ValueNoise {
    /// Seed the permutation table was built from.
    pub seed: u64,

    /// Doubled permutation table for overflow-free double lookup.
    perm: Vec<u8>,
}

impl ValueNoise {
    /// Create a noise lattice from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            perm: Self::generate_permutation(seed),
        }
    }

    /// Generate permutation table from seed.
    ///
    /// Uses a simple linear congruential generator for deterministic
    /// but well-distributed permutation values.
    fn generate_permutation(seed: u64) -> Vec<u8> {
        let mut perm: Vec<u8> = (0..=255).collect();

        // Fisher-Yates shuffle using LCG random
        let mut rng_state = seed;
        for i in (1..PERM_SIZE).rev() {
            // LCG parameters (same as MINSTD)
            rng_state = rng_state.wrapping_mul(48_271).wrapping_rem(2_147_483_647);
            let j = (rng_state as usize) % (i + 1);
            perm.swap(i, j);
        }

        // Double the permutation table to avoid modulo operations
        let mut doubled = perm.clone();
        doubled.extend_from_slice(&perm);
        doubled
    }

    /// Sample noise at a position, returns value in range [-1, 1].
    ///
    /// # Arguments
    ///
    /// * `x` - X coordinate in lattice space (1 unit = 1 lattice cell)
    /// * `z` - Z coordinate in lattice space
    #[must_use]
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        // Grid cell coordinates
        let x0 = x.floor() as i32;
        let z0 = z.floor() as i32;
        let x1 = x0 + 1;
        let z1 = z0 + 1;

        // Fractional position within cell
        let fx = x - x.floor();
        let fz = z - z.floor();

        // Smooth interpolation weights (6t^5 - 15t^4 + 10t^3)
        let sx = Self::smoothstep(fx);
        let sz = Self::smoothstep(fz);

        // Corner values
        let n00 = self.corner_value(x0, z0);
        let n10 = self.corner_value(x1, z0);
        let n01 = self.corner_value(x0, z1);
        let n11 = self.corner_value(x1, z1);

        // Bilinear interpolation
        let nx0 = Self::lerp(n00, n10, sx);
        let nx1 = Self::lerp(n01, n11, sx);
        Self::lerp(nx0, nx1, sz)
    }

    /// Sample noise remapped to [0, 1].
    #[must_use]
    pub fn sample01(&self, x: f32, z: f32) -> f32 {
        (self.sample(x, z) + 1.0) * 0.5
    }

    /// Hash a lattice corner to a value in [-1, 1].
    fn corner_value(&self, x: i32, z: i32) -> f32 {
        // Wrap to permutation table size using bitwise AND
        let px = (x & 0xFF) as usize;
        let pz = (z & 0xFF) as usize;
        let hashed = self.perm[self.perm[px] as usize + pz];
        f32::from(hashed) / 255.0 * 2.0 - 1.0
    }

    /// Improved smoothstep function (Perlin's improved noise).
    ///
    /// Uses 6t^5 - 15t^4 + 10t^3 for C2 continuity.
    #[inline]
    fn smoothstep(t: f32) -> f32 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    /// Linear interpolation.
    #[inline]
    fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + t * (b - a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that noise values are within the expected [-1, 1] range.
    #[test]
    fn noise_produces_valid_range() {
        let noise = ValueNoise::new(12345);

        for i in 0..1000 {
            let x = (i as f32) * 0.73;
            let z = (i as f32) * 1.17;
            let value = noise.sample(x, z);

            assert!(
                (-1.0..=1.0).contains(&value),
                "Noise value {value} at ({x}, {z}) is outside [-1, 1] range"
            );
        }
    }

    /// Test that the remapped sampler stays in [0, 1] and tracks sample().
    #[test]
    fn noise_sample01_remaps_range() {
        let noise = ValueNoise::new(2024);

        for i in 0..200 {
            let x = (i as f32) * 0.37;
            let z = (i as f32) * 0.91;
            let raw = noise.sample(x, z);
            let remapped = noise.sample01(x, z);

            assert!((0.0..=1.0).contains(&remapped));
            assert!(
                (remapped - (raw + 1.0) * 0.5).abs() < f32::EPSILON,
                "sample01 should be an affine remap of sample: {remapped} vs {raw}"
            );
        }
    }

    /// Test that the same seed produces identical output.
    #[test]
    fn noise_deterministic_with_seed() {
        let noise1 = ValueNoise::new(99999);
        let noise2 = ValueNoise::new(99999);

        for i in 0..100 {
            let x = (i as f32) * 1.37;
            let z = (i as f32) * 1.93;

            let v1 = noise1.sample(x, z);
            let v2 = noise2.sample(x, z);

            assert!(
                (v1 - v2).abs() < f32::EPSILON,
                "Same seed should produce identical noise: {v1} vs {v2}"
            );
        }

        // Different seeds should produce different results
        let noise3 = ValueNoise::new(11111);
        let mut all_same = true;
        for i in 0..100 {
            let x = (i as f32) * 1.37;
            let z = (i as f32) * 1.93;

            if (noise1.sample(x, z) - noise3.sample(x, z)).abs() > f32::EPSILON {
                all_same = false;
                break;
            }
        }
        assert!(!all_same, "Different seeds should produce different noise");
    }

    /// Test that integer lattice points return their corner value exactly.
    #[test]
    fn noise_interpolates_through_lattice_values() {
        let noise = ValueNoise::new(7);

        for i in 0..50_i32 {
            let value = noise.sample(i as f32, (i * 3) as f32);
            // At a lattice point the fade weights are zero, so the sample
            // is exactly one hashed corner, which must be a representable
            // v/255 * 2 - 1 value.
            assert!((-1.0..=1.0).contains(&value));
            let reconstructed = ((value + 1.0) / 2.0 * 255.0).round();
            assert!(
                (reconstructed - (value + 1.0) / 2.0 * 255.0).abs() < 1e-3,
                "Lattice sample {value} is not a corner value"
            );
        }
    }

    /// Test spatial continuity: close points give close values.
    #[test]
    fn noise_is_continuous() {
        let noise = ValueNoise::new(31337);

        for i in 0..200 {
            let x = (i as f32) * 0.61;
            let z = (i as f32) * 0.29;
            let a = noise.sample(x, z);
            let b = noise.sample(x + 1e-3, z + 1e-3);

            // Corner values span at most 2.0 across one lattice cell, so a
            // 1e-3 step cannot move the smooth interpolant far.
            assert!(
                (a - b).abs() < 0.05,
                "Noise discontinuity at ({x}, {z}): {a} vs {b}"
            );
        }
    }
}
