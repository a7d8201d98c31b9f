//! `OrbitalSystem`: a central mass surrounded by a thick disk of circular
//! orbiters (spec.md §4.7).

use std::f64::consts::TAU;

use super::{circular_orbit_speed, orbit_direction};
use crate::body::Body;
use crate::rng::Prng;
use crate::vec3::Vec3;

const CENTRAL_MASS: f64 = 1e10;

pub(super) fn generate(slots: &mut [Option<Body>], rng: &mut Prng, g: f64) {
    if slots.is_empty() {
        return;
    }

    slots[0] = Some(Body::new(Vec3::new_zero(), CENTRAL_MASS));

    for slot in slots.iter_mut().skip(1) {
        let d = rng.double_range(2e4, 5e5);
        let theta = rng.double(TAU);
        let thickness = rng.double_range(-1e4, 1e4);
        let position = Vec3::new(theta.cos() * d, thickness, theta.sin() * d);
        let mass = rng.double_range(1e3, 1e6);
        let speed = circular_orbit_speed(g, CENTRAL_MASS, mass, d);
        let velocity = orbit_direction(position) * speed;
        *slot = Some(Body::new(position, mass).with_velocity(velocity));
    }
}
