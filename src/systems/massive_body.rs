//! `MassiveBody`: a primary, a secondary orbiting it closely, and a
//! disk of small bodies orbiting the secondary, tilted as a rigid whole
//! (spec.md §4.7).

use std::f64::consts::{PI, TAU};

use super::{circular_orbit_speed, orbit_direction};
use crate::body::Body;
use crate::rng::Prng;
use crate::vec3::Vec3;

const PRIMARY_MASS: f64 = 1e10;
const TILT_AXIS: Vec3 = Vec3::new(1., 1., 1.);
const TILT_ANGLE: f64 = PI / 10.;

pub(super) fn generate(slots: &mut [Option<Body>], rng: &mut Prng, g: f64) {
    if slots.is_empty() {
        return;
    }

    slots[0] = Some(Body::new(Vec3::new_zero(), PRIMARY_MASS));

    if slots.len() == 1 {
        return;
    }

    let secondary_mass = rng.double_range(1e6, 1e8);
    let secondary_dist = rng.double_range(2e4, 8e4);
    let theta = rng.double(TAU);
    let secondary_pos = Vec3::new(theta.cos() * secondary_dist, 0., theta.sin() * secondary_dist);
    let secondary_speed = circular_orbit_speed(g, PRIMARY_MASS, secondary_mass, secondary_dist);
    let secondary_vel = orbit_direction(secondary_pos) * secondary_speed;
    slots[1] = Some(Body::new(secondary_pos, secondary_mass).with_velocity(secondary_vel));

    for slot in slots.iter_mut().skip(2) {
        let d = rng.double_range(1e3, 5e4);
        let phi = rng.double(TAU);
        let inclination = rng.double_range(-0.1, 0.1);
        let r_rel = Vec3::new(phi.cos() * d, d * inclination, phi.sin() * d);
        let mass = rng.double_range(1e2, 1e5);
        let speed = circular_orbit_speed(g, secondary_mass, mass, d);
        let velocity = secondary_vel + orbit_direction(r_rel) * speed;
        *slot = Some(Body::new(secondary_pos + r_rel, mass).with_velocity(velocity));
    }

    // Rigidly tilt the whole disk by `TILT_ANGLE` about `TILT_AXIS` through
    // the origin (spec.md §4.7).
    for slot in slots.iter_mut() {
        if let Some(body) = slot {
            body.rotate(Vec3::new_zero(), TILT_AXIS, TILT_ANGLE);
        }
    }
}
