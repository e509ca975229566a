//! Floating-point drift-kick-drift leapfrog

use super::Integrator;
use crate::physics::gravity::IgnoreTerms;
use crate::physics::simulation::Simulation;

/// Second-order symplectic leapfrog operating directly on the floating-point
/// particles.
///
/// Symmetric in exact arithmetic, but every update rounds, so integrating
/// forward and then backward does not return to the starting bits. Useful as
/// a baseline for [`Janus`](super::Janus), which runs the same drift-kick-drift
/// in fixed point.
///
/// # Mathematical Properties
///
/// - **Order of accuracy**: 2
/// - **Force evaluations**: one per timestep
/// - **Symplectic**: Yes
/// - **Time-reversible**: In exact arithmetic only; round-off accumulates
#[derive(Debug, Clone, Default)]
pub struct Leapfrog;

impl Integrator for Leapfrog {
    fn name(&self) -> &'static str {
        "leapfrog"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["drift_kick_drift"]
    }

    fn order(&self) -> usize {
        2
    }

    fn step_begin(&mut self, sim: &mut Simulation) {
        let dt = sim.dt;
        let half_dt = 0.5 * dt;

        for particle in sim.particles.iter_mut() {
            particle.position += particle.velocity * half_dt;
        }

        sim.gravity_ignore_terms = IgnoreTerms::None;
        sim.update_acceleration();

        for particle in sim.particles.iter_mut() {
            particle.velocity += particle.acceleration * dt;
            particle.position += particle.velocity * half_dt;
        }
    }

    fn step_end(&mut self, sim: &mut Simulation) {
        sim.t += sim.dt;
    }

    fn synchronize(&mut self, _sim: &mut Simulation) {}

    fn reset(&mut self) {}

    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(self.clone())
    }
}
