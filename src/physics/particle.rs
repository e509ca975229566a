//! Floating-point particle view shared with the host simulation

use crate::physics::math::{Scalar, Vector};

/// A single particle as seen by force evaluation and diagnostics.
///
/// Integrators that keep their own authoritative state (see
/// [`Janus`](crate::physics::integrators::Janus)) treat this as a derived view
/// that is rewritten at the end of every step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
    pub mass: Scalar,
}

impl Particle {
    pub fn new(mass: Scalar, position: Vector, velocity: Vector) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector::ZERO,
            mass,
        }
    }

    pub fn at_rest(mass: Scalar, position: Vector) -> Self {
        Self::new(mass, position, Vector::ZERO)
    }

    #[inline]
    pub fn kinetic_energy(&self) -> Scalar {
        0.5 * self.mass * self.velocity.length_squared()
    }

    #[inline]
    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass
    }

    /// Angular momentum about the origin, `m (r × v)`
    #[inline]
    pub fn angular_momentum(&self) -> Vector {
        self.position.cross(self.velocity) * self.mass
    }
}

/// Largest per-coordinate difference in position or velocity between two
/// particle sets, compared pairwise.
pub fn max_state_deviation(a: &[Particle], b: &[Particle]) -> Scalar {
    a.iter()
        .zip(b.iter())
        .map(|(p, q)| {
            let position = (p.position - q.position).abs().max_element();
            let velocity = (p.velocity - q.velocity).abs().max_element();
            position.max(velocity)
        })
        .fold(0.0, Scalar::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_particle_has_no_acceleration() {
        let particle = Particle::new(2.0, Vector::X, Vector::Y);
        assert_eq!(particle.acceleration, Vector::ZERO);
        assert_eq!(particle.kinetic_energy(), 1.0);
    }

    #[test]
    fn test_angular_momentum_of_circular_motion() {
        let particle = Particle::new(3.0, Vector::new(2.0, 0.0, 0.0), Vector::new(0.0, 0.5, 0.0));
        assert_eq!(particle.angular_momentum(), Vector::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_max_state_deviation() {
        let a = [Particle::new(1.0, Vector::ZERO, Vector::ZERO)];
        let b = [Particle::new(1.0, Vector::new(0.0, -0.5, 0.0), Vector::splat(0.25))];
        assert_eq!(max_state_deviation(&a, &b), 0.5);
    }
}
