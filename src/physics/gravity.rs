//! Force evaluation collaborators
//!
//! Integrators never compute forces themselves; they ask the host simulation to
//! refresh `Particle::acceleration` through a [`Gravity`] implementation.

use crate::physics::math::{Scalar, Vector};
use crate::physics::particle::Particle;

/// Hint telling a gravity routine which interactions it may skip.
///
/// Some schemes treat part of the interaction analytically and ask for the
/// rest only. Integrators that need every term reset the hint to
/// [`IgnoreTerms::None`] before each evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IgnoreTerms {
    /// Compute every interaction
    #[default]
    None,
    /// Skip the interaction between particles 0 and 1
    FirstPair,
    /// Skip every interaction involving particle 0
    CentralBody,
}

impl IgnoreTerms {
    #[inline]
    fn skips(self, i: usize, j: usize) -> bool {
        match self {
            IgnoreTerms::None => false,
            IgnoreTerms::FirstPair => (i == 0 && j == 1) || (i == 1 && j == 0),
            IgnoreTerms::CentralBody => i == 0 || j == 0,
        }
    }
}

/// Acceleration source for a whole particle set
pub trait Gravity: Send + Sync {
    fn name(&self) -> &str;

    /// Overwrite `acceleration` of every particle from the current positions.
    fn compute(&self, particles: &mut [Particle], ignore: IgnoreTerms);

    /// Potential energy of the configuration, consistent with [`Gravity::compute`].
    fn potential_energy(&self, particles: &[Particle]) -> Scalar;
}

/// Pairwise Newtonian gravity with Plummer softening.
///
/// Pairs are visited in a fixed order so the result depends only on the
/// particle positions and masses, which exact reversal relies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectSummation {
    pub g: Scalar,
    pub softening: Scalar,
}

impl DirectSummation {
    pub fn new(g: Scalar) -> Self {
        Self { g, softening: 0.0 }
    }

    pub fn with_softening(mut self, softening: Scalar) -> Self {
        self.softening = softening;
        self
    }
}

impl Default for DirectSummation {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Gravity for DirectSummation {
    fn name(&self) -> &str {
        "direct_summation"
    }

    fn compute(&self, particles: &mut [Particle], ignore: IgnoreTerms) {
        let softening_squared = self.softening * self.softening;

        for particle in particles.iter_mut() {
            particle.acceleration = Vector::ZERO;
        }

        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                if ignore.skips(i, j) {
                    continue;
                }

                let separation = particles[j].position - particles[i].position;
                let distance_squared = separation.length_squared() + softening_squared;
                if distance_squared <= Scalar::EPSILON * Scalar::EPSILON {
                    continue;
                }

                let distance = libm::sqrt(distance_squared);
                let prefactor = self.g / (distance_squared * distance);

                let mass_i = particles[i].mass;
                let mass_j = particles[j].mass;
                particles[i].acceleration += separation * (prefactor * mass_j);
                particles[j].acceleration -= separation * (prefactor * mass_i);
            }
        }
    }

    fn potential_energy(&self, particles: &[Particle]) -> Scalar {
        let softening_squared = self.softening * self.softening;
        let mut energy = 0.0;

        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let separation = particles[j].position - particles[i].position;
                let distance = libm::sqrt(separation.length_squared() + softening_squared);
                if distance > Scalar::EPSILON {
                    energy -= self.g * particles[i].mass * particles[j].mass / distance;
                }
            }
        }

        energy
    }
}

/// Free motion: every acceleration is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGravity;

impl Gravity for NoGravity {
    fn name(&self) -> &str {
        "none"
    }

    fn compute(&self, particles: &mut [Particle], _ignore: IgnoreTerms) {
        for particle in particles.iter_mut() {
            particle.acceleration = Vector::ZERO;
        }
    }

    fn potential_energy(&self, _particles: &[Particle]) -> Scalar {
        0.0
    }
}
