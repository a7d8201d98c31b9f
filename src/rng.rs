//! PRNG helpers (spec.md §4.2).
//!
//! These are pure functions over an injected `rand::Rng` rather than a
//! hidden global, so tests can seed a deterministic source (`Prng::seeded`)
//! while runtime code uses an OS-entropy-seeded one (`Prng::from_entropy`).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::vec3::Vec3;

/// A thread-owned uniform random source.
pub struct Prng(ChaCha8Rng);

impl Prng {
    /// Seed from OS entropy. Not required to be reproducible across runs.
    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }

    /// Seed deterministically, for tests and reproducible replays.
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform sample in `[0, max)`.
    pub fn double(&mut self, max: f64) -> f64 {
        self.double_range(0., max)
    }

    /// Uniform sample in `[lo, hi)`.
    pub fn double_range(&mut self, lo: f64, hi: f64) -> f64 {
        if (hi - lo).abs() < f64::EPSILON {
            return lo;
        }
        self.0.gen_range(lo..hi)
    }

    /// Uniform integer sample in `[0, max]` (inclusive).
    pub fn int(&mut self, max: i64) -> i64 {
        if max <= 0 {
            return 0;
        }
        self.0.gen_range(0..=max)
    }

    /// A vector whose components are independent uniforms in `[-mag, +mag]`.
    pub fn vector(&mut self, mag: f64) -> Vec3 {
        Vec3::new(
            self.double_range(-mag, mag),
            self.double_range(-mag, mag),
            self.double_range(-mag, mag),
        )
    }
}
