//! Minimal host simulation
//!
//! Owns the floating-point particles, the clock, the timestep and the gravity
//! collaborator. Integrators borrow it mutably for the duration of a step.

use crate::physics::gravity::{Gravity, IgnoreTerms};
use crate::physics::integrators::Integrator;
use crate::physics::math::{Scalar, Vector};
use crate::physics::particle::Particle;

pub struct Simulation {
    pub particles: Vec<Particle>,
    /// Simulation clock
    pub t: Scalar,
    /// Timestep; may be negative to integrate backwards
    pub dt: Scalar,
    pub gravity_ignore_terms: IgnoreTerms,
    gravity: Box<dyn Gravity>,
}

impl Simulation {
    pub fn new(gravity: Box<dyn Gravity>) -> Self {
        Self {
            particles: Vec::new(),
            t: 0.0,
            dt: 0.01,
            gravity_ignore_terms: IgnoreTerms::None,
            gravity,
        }
    }

    pub fn with_timestep(mut self, dt: Scalar) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_particles(mut self, particles: impl IntoIterator<Item = Particle>) -> Self {
        self.particles.extend(particles);
        self
    }

    pub fn add(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn remove(&mut self, index: usize) -> Particle {
        self.particles.remove(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn gravity(&self) -> &dyn Gravity {
        self.gravity.as_ref()
    }

    /// Recompute every particle's acceleration from the current positions.
    pub fn update_acceleration(&mut self) {
        self.gravity
            .compute(&mut self.particles, self.gravity_ignore_terms);
    }

    /// Advance by one full timestep and finalize.
    pub fn step(&mut self, integrator: &mut dyn Integrator) {
        integrator.step_begin(self);
        integrator.step_end(self);
    }

    pub fn integrate(&mut self, integrator: &mut dyn Integrator, steps: usize) {
        for _ in 0..steps {
            self.step(integrator);
        }
    }

    /// Flip the direction of time.
    pub fn reverse_time(&mut self) {
        self.dt = -self.dt;
    }

    pub fn kinetic_energy(&self) -> Scalar {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    pub fn total_energy(&self) -> Scalar {
        self.kinetic_energy() + self.gravity.potential_energy(&self.particles)
    }

    pub fn angular_momentum(&self) -> Vector {
        self.particles.iter().map(Particle::angular_momentum).sum()
    }

    pub fn momentum(&self) -> Vector {
        self.particles.iter().map(Particle::momentum).sum()
    }

    /// Mass-weighted position and velocity of the system, or `None` when the
    /// total mass vanishes.
    pub fn center_of_mass(&self) -> Option<(Vector, Vector)> {
        let total_mass: Scalar = self.particles.iter().map(|p| p.mass).sum();
        if total_mass.abs() <= Scalar::EPSILON {
            return None;
        }

        let position: Vector = self.particles.iter().map(|p| p.position * p.mass).sum();
        Some((position / total_mass, self.momentum() / total_mass))
    }

    /// Shift every particle into the barycentric frame.
    pub fn move_to_center_of_mass(&mut self) {
        let Some((position, velocity)) = self.center_of_mass() else {
            return;
        };

        for particle in self.particles.iter_mut() {
            particle.position -= position;
            particle.velocity -= velocity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::gravity::{DirectSummation, NoGravity};

    #[test]
    fn test_move_to_center_of_mass() {
        let mut sim = Simulation::new(Box::new(NoGravity)).with_particles([
            Particle::new(1.0, Vector::new(1.0, 0.0, 0.0), Vector::new(0.0, 1.0, 0.0)),
            Particle::new(3.0, Vector::new(5.0, 0.0, 0.0), Vector::ZERO),
        ]);

        sim.move_to_center_of_mass();

        let (position, velocity) = sim.center_of_mass().unwrap();
        assert!(position.length() < 1e-15);
        assert!(velocity.length() < 1e-15);
        assert_eq!(sim.particles[0].position, Vector::new(-3.0, 0.0, 0.0));
    }

    #[test]
    fn test_center_of_mass_of_massless_system() {
        let sim = Simulation::new(Box::new(NoGravity))
            .with_particles([Particle::at_rest(0.0, Vector::ONE)]);
        assert!(sim.center_of_mass().is_none());
    }

    #[test]
    fn test_update_acceleration_honours_hint() {
        let mut sim = Simulation::new(Box::new(DirectSummation::new(1.0))).with_particles([
            Particle::at_rest(1.0, Vector::ZERO),
            Particle::at_rest(1.0, Vector::X),
        ]);

        sim.gravity_ignore_terms = IgnoreTerms::FirstPair;
        sim.update_acceleration();
        assert_eq!(sim.particles[0].acceleration, Vector::ZERO);

        sim.gravity_ignore_terms = IgnoreTerms::None;
        sim.update_acceleration();
        assert_eq!(sim.particles[0].acceleration, Vector::X);
    }

    #[test]
    fn test_total_energy_of_bound_pair() {
        let sim = Simulation::new(Box::new(DirectSummation::new(1.0))).with_particles([
            Particle::new(1.0, Vector::ZERO, Vector::new(0.0, 1.0, 0.0)),
            Particle::at_rest(1.0, Vector::new(2.0, 0.0, 0.0)),
        ]);
        assert!((sim.total_energy() - 0.0).abs() < 1e-15);
    }

    #[test]
    fn test_reverse_time_negates_timestep() {
        let mut sim = Simulation::new(Box::new(NoGravity)).with_timestep(0.25);
        sim.reverse_time();
        assert_eq!(sim.dt, -0.25);
    }
}
