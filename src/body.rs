//! A point mass and its per-tick integrator (spec.md §3, §4.3).

use std::collections::VecDeque;
use std::f64::consts::PI;

use crate::error::SimError;
use crate::vec3::Vec3;

/// A single simulated particle.
///
/// `acceleration` is pending force-per-mass accumulated during a tick's
/// acceleration phase; `update` consumes and resets it. The octree built
/// each tick holds no reference to a `Body` past that tick.
#[derive(Clone, Debug)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub mass: f64,
    trail: Option<VecDeque<Vec3>>,
    trail_capacity: usize,
}

impl Body {
    pub fn new(position: Vec3, mass: f64) -> Self {
        Self {
            position,
            velocity: Vec3::new_zero(),
            acceleration: Vec3::new_zero(),
            mass,
            trail: None,
            trail_capacity: 0,
        }
    }

    /// Validating constructor for the command boundary (spec.md §7's
    /// precondition violation: negative mass, non-finite coordinate).
    /// Internal generators call `new` directly since their sampled masses
    /// are always positive and finite by construction; this is for callers
    /// accepting externally supplied position/mass, like `World::spawn`.
    pub fn new_checked(position: Vec3, mass: f64) -> Result<Self, SimError> {
        if !mass.is_finite() || mass <= 0. {
            return Err(SimError::InvalidMass(mass));
        }
        if !position.is_finite() {
            return Err(SimError::NonFiniteCoordinate);
        }
        Ok(Self::new(position, mass))
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Enable a bounded motion-trail ring of `capacity` recent positions.
    pub fn with_trail(mut self, capacity: usize) -> Self {
        self.trail_capacity = capacity;
        self.trail = Some(VecDeque::with_capacity(capacity));
        self
    }

    /// Derived, visual-only radius. `R(m) = 10·(3m/4π)^(1/3) + 10`.
    ///
    /// See spec.md §9 open question 3: an older variant used `+1`; this
    /// implementation keeps `+10` and documents the choice once, here.
    pub fn radius(&self) -> f64 {
        10. * (3. * self.mass / (4. * PI)).cbrt() + 10.
    }

    pub fn trail(&self) -> Option<&VecDeque<Vec3>> {
        self.trail.as_ref()
    }

    /// Advance this body by one tick under a speed ceiling `c`, per the
    /// five ordered steps of spec.md §4.3.
    pub fn update(&mut self, c: f64) {
        if let Some(trail) = &mut self.trail {
            if trail.len() == self.trail_capacity {
                trail.pop_front();
            }
            if self.trail_capacity > 0 {
                trail.push_back(self.position);
            }
        }

        let mut speed = self.velocity.magnitude();
        if speed > c {
            self.velocity *= c / speed;
            speed = c;
        }

        if speed == 0. {
            self.velocity += self.acceleration;
        } else {
            let a = self.acceleration;
            let a_par = a.project(self.velocity);
            let a_perp = a - a_par;
            let alpha = (1. - (speed / c).powi(2)).max(0.).sqrt();
            let denom = 1. + self.velocity.dot(a) / (c * c);
            self.velocity = (self.velocity + a_par + a_perp * alpha) / denom;
        }

        self.position += self.velocity;
        self.acceleration = Vec3::new_zero();
    }

    /// Rigidly rotate this body's position, velocity, and acceleration (and
    /// trail, if enabled) about `axis` through `base` by `angle` radians.
    pub fn rotate(&mut self, base: Vec3, axis: Vec3, angle: f64) {
        self.position = self.position.rotate_point(base, axis, angle);
        self.velocity = self.velocity.rotate_direction(base, axis, angle);
        self.acceleration = self.acceleration.rotate_direction(base, axis, angle);
        if let Some(trail) = &mut self.trail {
            for p in trail.iter_mut() {
                *p = p.rotate_point(base, axis, angle);
            }
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.acceleration.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_at_rest_with_no_acceleration_stays_put() {
        let mut b = Body::new(Vec3::new_zero(), 1.);
        b.update(1e4);
        assert_eq!(b.position, Vec3::new_zero());
        assert_eq!(b.velocity, Vec3::new_zero());
    }

    #[test]
    fn speed_clamp_does_not_double_the_ceiling() {
        let c = 1e4;
        let mut b = Body::new(Vec3::new_zero(), 1.).with_velocity(Vec3::new(c, 0., 0.));
        b.acceleration = Vec3::new(c, 0., 0.);
        b.update(c);
        assert!((b.velocity.magnitude() - c).abs() < 1e-6);
    }

    #[test]
    fn acceleration_resets_after_update() {
        let mut b = Body::new(Vec3::new_zero(), 1.);
        b.acceleration = Vec3::new(1., 2., 3.);
        b.update(1e4);
        assert_eq!(b.acceleration, Vec3::new_zero());
    }

    #[test]
    fn new_checked_rejects_non_positive_and_non_finite_mass() {
        assert!(matches!(
            Body::new_checked(Vec3::new_zero(), -1.),
            Err(SimError::InvalidMass(_))
        ));
        assert!(matches!(
            Body::new_checked(Vec3::new_zero(), 0.),
            Err(SimError::InvalidMass(_))
        ));
        assert!(matches!(
            Body::new_checked(Vec3::new_zero(), f64::NAN),
            Err(SimError::InvalidMass(_))
        ));
    }

    #[test]
    fn new_checked_rejects_non_finite_position() {
        let bad = Vec3::new(f64::INFINITY, 0., 0.);
        assert!(matches!(
            Body::new_checked(bad, 1.),
            Err(SimError::NonFiniteCoordinate)
        ));
    }

    #[test]
    fn new_checked_accepts_valid_input() {
        let b = Body::new_checked(Vec3::new(1., 2., 3.), 5.).unwrap();
        assert_eq!(b.mass, 5.);
    }

    #[test]
    fn radius_grows_with_mass() {
        let small = Body::new(Vec3::new_zero(), 1.);
        let large = Body::new(Vec3::new_zero(), 1e6);
        assert!(large.radius() > small.radius());
    }

    #[test]
    fn rotate_preserves_distance_from_base() {
        let base = Vec3::new(1., 1., 1.);
        let mut b = Body::new(Vec3::new(5., 1., 1.), 1.).with_velocity(Vec3::new(0., 2., 0.));
        let dist_before = (b.position - base).magnitude();
        b.rotate(base, Vec3::new(0., 0., 1.), 1.3);
        let dist_after = (b.position - base).magnitude();
        assert!((dist_before - dist_after).abs() < 1e-9);
    }

    #[test]
    fn trail_records_and_bounds_history() {
        let mut b = Body::new(Vec3::new_zero(), 1.).with_trail(3);
        for i in 0..10 {
            b.velocity = Vec3::new(1., 0., 0.);
            b.update(1e4);
            let _ = i;
        }
        assert_eq!(b.trail().unwrap().len(), 3);
    }
}
