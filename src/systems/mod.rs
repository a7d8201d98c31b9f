//! Preset initial-condition generators (spec.md §4.7).
//!
//! Each generator fills a fixed-length slice of body slots from scratch;
//! callers (`World::generate`) hold the body lock for the duration, so a
//! partial world is never observed mid-generation.

mod binary;
mod clouds;
mod lattice;
mod massive_body;
mod orbital;
mod planetary;

use crate::body::Body;
use crate::rng::Prng;
use crate::vec3::Vec3;

/// "Up" for disk-like systems.
pub(crate) const Y_AXIS: Vec3 = Vec3::new(0., 1., 0.);

/// The tagged set of presets exposed to the UI layer (spec.md §6).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SystemType {
    None,
    SlowParticles,
    FastParticles,
    MassiveBody,
    OrbitalSystem,
    BinarySystem,
    PlanetarySystem,
    DistributionTest,
}

/// Circular-orbit speed for an orbiter of mass `m` at distance `d` from a
/// primary of mass `m_primary`. This is the reference's formula
/// (`√(G·M²/((M+m)·d))`), preserved verbatim per spec.md §4.7 and §9 open
/// question 2 rather than simplified to the textbook `√(G·M/d)`.
pub(crate) fn circular_orbit_speed(g: f64, m_primary: f64, m_orbiter: f64, d: f64) -> f64 {
    if d <= 0. {
        return 0.;
    }
    (g * m_primary * m_primary / ((m_primary + m_orbiter) * d)).sqrt()
}

/// Direction of a circular orbit at relative position `r` around a primary
/// at the origin of `r`: `unit(cross(r, ŷ))`.
pub(crate) fn orbit_direction(r: Vec3) -> Vec3 {
    r.cross(Y_AXIS).unit()
}

/// Fill every slot in `slots` with a body sampled from `kind`.
pub fn generate(kind: SystemType, slots: &mut [Option<Body>], rng: &mut Prng, g: f64) {
    for slot in slots.iter_mut() {
        *slot = None;
    }
    match kind {
        SystemType::None => {}
        SystemType::SlowParticles => clouds::generate(slots, rng, 5.0),
        SystemType::FastParticles => clouds::generate(slots, rng, 5e3),
        SystemType::MassiveBody => massive_body::generate(slots, rng, g),
        SystemType::OrbitalSystem => orbital::generate(slots, rng, g),
        SystemType::BinarySystem => binary::generate(slots, rng, g),
        SystemType::PlanetarySystem => planetary::generate(slots, rng, g),
        SystemType::DistributionTest => lattice::generate(slots),
    }
}
