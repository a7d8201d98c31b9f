//! `SlowParticles` / `FastParticles`: an unstructured cloud with no central
//! mass, differing only in velocity scale (spec.md §4.7).

use std::f64::consts::TAU;

use crate::body::Body;
use crate::rng::Prng;
use crate::vec3::Vec3;

pub(super) fn generate(slots: &mut [Option<Body>], rng: &mut Prng, velocity_half_range: f64) {
    for slot in slots.iter_mut() {
        let d = rng.double(1e6);
        let theta = rng.double(TAU);
        let y = rng.double_range(-2e5, 2e5);
        let position = Vec3::new(theta.cos() * d, y, theta.sin() * d);
        let mass = rng.double_range(3e4, 1e6 + 3e4);
        let velocity = rng.vector(velocity_half_range);
        *slot = Some(Body::new(position, mass).with_velocity(velocity));
    }
}
