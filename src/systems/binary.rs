//! `BinarySystem`: two comparably massive bodies on a random line through
//! the origin in the x-z plane, each moving at the circular speed
//! appropriate to the two-body (reduced-mass) problem, surrounded by a
//! disk whose orbiters use the combined mass with a near-pair correction
//! (spec.md §4.7).

use std::f64::consts::TAU;

use super::{circular_orbit_speed, orbit_direction};
use crate::body::Body;
use crate::rng::Prng;
use crate::vec3::Vec3;

pub(super) fn generate(slots: &mut [Option<Body>], rng: &mut Prng, g: f64) {
    if slots.len() < 2 {
        for slot in slots.iter_mut() {
            *slot = Some(Body::new(Vec3::new_zero(), 1e10));
        }
        return;
    }

    let theta = rng.double(TAU);
    let direction = Vec3::new(theta.cos(), 0., theta.sin());
    let separation = rng.double_range(5e4, 2e5);
    let half_sep = separation / 2.;

    let mass_a = rng.double_range(1e9, 1e10);
    let mass_b = rng.double_range(1e9, 1e10);

    let pos_a = direction * half_sep;
    let pos_b = -direction * half_sep;

    // Each body orbits the reduced two-body problem around the other.
    let speed_a = circular_orbit_speed(g, mass_b, mass_a, separation);
    let speed_b = circular_orbit_speed(g, mass_a, mass_b, separation);
    let vel_a = orbit_direction(pos_a) * speed_a;
    let vel_b = orbit_direction(pos_b) * speed_b;

    slots[0] = Some(Body::new(pos_a, mass_a).with_velocity(vel_a));
    slots[1] = Some(Body::new(pos_b, mass_b).with_velocity(vel_b));

    let combined_mass = mass_a + mass_b;

    for slot in slots.iter_mut().skip(2) {
        let d = rng.double_range(separation * 2., separation * 20.);
        let phi = rng.double(TAU);
        let thickness = rng.double_range(-1e4, 1e4);
        let position = Vec3::new(phi.cos() * d, thickness, phi.sin() * d);
        let mass = rng.double_range(1e2, 1e5);

        // Speed correction near the pair: treat the binary as a single
        // mass at the origin, same as `OrbitalSystem`'s central body.
        let speed = circular_orbit_speed(g, combined_mass, mass, d);
        let velocity = orbit_direction(position) * speed;
        *slot = Some(Body::new(position, mass).with_velocity(velocity));
    }
}
