//! Fixed-point phase-space state
//!
//! Positions and velocities are stored as integer multiples of `1 / scale` in
//! an `i128` accumulator. Every update applied to this state is an integer
//! addition, so applying the negated update restores the previous value
//! exactly. Conversions to and from the floating-point view happen only at the
//! boundaries of the integration kernel.
//!
//! The accumulator is never range-checked. Choosing a `scale` so large that
//! `|x| * scale` or `|v| * scale` approaches `i128::MAX` makes the state wrap
//! around; keeping the scale within range is the caller's responsibility.

use std::ops::{AddAssign, Neg};

use crate::physics::math::{Fixed, Scalar, Vector};
use crate::physics::particle::Particle;

/// Three fixed-point coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedVector {
    pub x: Fixed,
    pub y: Fixed,
    pub z: Fixed,
}

impl FixedVector {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(x: Fixed, y: Fixed, z: Fixed) -> Self {
        Self { x, y, z }
    }

    /// Converts each component to an integer, truncating toward zero.
    ///
    /// Uses Rust's float-to-int `as` conversion: values outside the `i128`
    /// range saturate and NaN becomes zero.
    #[inline]
    pub fn truncate(v: Vector) -> Self {
        Self::new(v.x as Fixed, v.y as Fixed, v.z as Fixed)
    }

    /// Converts each component to the nearest integer, halfway cases away from
    /// zero.
    ///
    /// Like [`FixedVector::truncate`] this is odd-symmetric, so increments
    /// computed with `-dt` are the exact negation of those computed with `dt`.
    /// Unlike truncation it does not shrink every increment toward zero, which
    /// would bias long integrations.
    #[inline]
    pub fn round(v: Vector) -> Self {
        Self::truncate(v.round())
    }

    /// Multiplies a physical vector by `scale` and truncates it.
    #[inline]
    pub fn from_physical(v: Vector, scale: Scalar) -> Self {
        Self::truncate(v * scale)
    }

    /// Divides the integer value by `scale`, recovering physical units.
    #[inline]
    pub fn to_physical(self, scale: Scalar) -> Vector {
        self.as_vector() / scale
    }

    /// The raw integer value reinterpreted as floating point, still in
    /// fixed-point units.
    #[inline]
    pub fn as_vector(self) -> Vector {
        Vector::new(self.x as Scalar, self.y as Scalar, self.z as Scalar)
    }
}

impl AddAssign for FixedVector {
    /// Wrapping addition. Overflow is not detected.
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x = self.x.wrapping_add(rhs.x);
        self.y = self.y.wrapping_add(rhs.y);
        self.z = self.z.wrapping_add(rhs.z);
    }
}

impl Neg for FixedVector {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(
            self.x.wrapping_neg(),
            self.y.wrapping_neg(),
            self.z.wrapping_neg(),
        )
    }
}

/// Shadow state of one particle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedParticle {
    pub position: FixedVector,
    pub velocity: FixedVector,
}

impl FixedParticle {
    pub fn from_particle(particle: &Particle, scale: Scalar) -> Self {
        Self {
            position: FixedVector::from_physical(particle.position, scale),
            velocity: FixedVector::from_physical(particle.velocity, scale),
        }
    }

    /// Writes position and velocity into `particle`, leaving its mass and
    /// acceleration untouched.
    #[inline]
    pub fn write_to(&self, particle: &mut Particle, scale: Scalar) {
        particle.position = self.position.to_physical(scale);
        particle.velocity = self.velocity.to_physical(scale);
    }
}

/// Builds the fixed-point state of every particle.
pub fn to_fixed_point(particles: &[Particle], scale: Scalar) -> Vec<FixedParticle> {
    particles
        .iter()
        .map(|particle| FixedParticle::from_particle(particle, scale))
        .collect()
}

/// Overwrites the floating-point positions and velocities from the
/// fixed-point state. Both slices must have the same length.
pub fn to_floating_point(shadow: &[FixedParticle], particles: &mut [Particle], scale: Scalar) {
    debug_assert_eq!(shadow.len(), particles.len());

    for (fixed, particle) in shadow.iter().zip(particles.iter_mut()) {
        fixed.write_to(particle, scale);
    }
}
