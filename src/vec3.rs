//! Double-precision 3-D vector arithmetic.
//!
//! This mirrors the teacher's habit of carrying its own small vector type
//! rather than depending on a general-purpose linear algebra crate; the
//! extra operations this simulator needs (projection/rejection, arbitrary
//! axis-angle rotation) aren't guaranteed to exist upstream, so we own the
//! type outright.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

#[cfg(feature = "encode")]
use bincode::{Decode, Encode};

/// A point or direction in 3-space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "encode", derive(Encode, Decode))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn new_zero() -> Self {
        Self::new(0., 0., 0.)
    }

    pub fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Unit vector in this direction. A zero vector's unit is itself (no error).
    pub fn unit(self) -> Self {
        let mag = self.magnitude();
        if mag.abs() < f64::EPSILON {
            self
        } else {
            self / mag
        }
    }

    /// Component of `self` along `onto`: `onto · (self·onto / |onto|²)`.
    pub fn project(self, onto: Self) -> Self {
        let denom = onto.magnitude_squared();
        if denom.abs() < f64::EPSILON {
            Self::new_zero()
        } else {
            onto * (self.dot(onto) / denom)
        }
    }

    /// Component of `self` orthogonal to `onto`.
    pub fn reject(self, onto: Self) -> Self {
        self - self.project(onto)
    }

    /// True if every component is finite (not NaN or infinite).
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Rotate this vector about `axis` (through the origin) by `angle` radians,
    /// using Rodrigues' rotation formula. `axis` need not be a unit vector.
    pub fn rotate(self, axis: Self, angle: f64) -> Self {
        let k = axis.unit();
        if k == Self::new_zero() {
            return self;
        }
        let (sin_a, cos_a) = angle.sin_cos();
        self * cos_a + k.cross(self) * sin_a + k * (k.dot(self) * (1. - cos_a))
    }

    /// Rotate a *point* `self` about `axis` through `base` by `angle` radians.
    pub fn rotate_point(self, base: Self, axis: Self, angle: f64) -> Self {
        (self - base).rotate(axis, angle) + base
    }

    /// Rotate a *direction* (velocity, acceleration) about `axis` through
    /// `base` by `angle` radians. Per the documented contract, directions
    /// are translated by `+base`, rotated, then translated back by `-base`
    /// — preserved verbatim even though a pure rotation of a direction
    /// wouldn't otherwise need translation at all.
    pub fn rotate_direction(self, base: Self, axis: Self, angle: f64) -> Self {
        (self + base).rotate(axis, angle) - base
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}
