//! Numerical integration schemes for n-body simulation
//!
//! Every scheme plugs into the host [`Simulation`] through the same four
//! operations. A full timestep is `step_begin` followed by `step_end`, and the
//! floating-point particles reflect the new state only once `step_end` ran.

use crate::physics::simulation::Simulation;

pub mod composition;
pub mod janus;
pub mod leapfrog;
pub mod registry;

pub use composition::Composition;
pub use janus::Janus;
pub use leapfrog::Leapfrog;

/// Uniform interface between the host simulation and an integration scheme
pub trait Integrator: Send + Sync {
    /// Canonical name used for lookup in the registry
    fn name(&self) -> &'static str;

    /// Alternative names accepted by the registry
    fn aliases(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Convergence order of the scheme
    fn order(&self) -> usize;

    /// Advance the integrator's state by one full timestep `sim.dt`.
    ///
    /// The floating-point particles are not guaranteed to reflect the new
    /// state until [`Integrator::step_end`] has run.
    fn step_begin(&mut self, sim: &mut Simulation);

    /// Publish the state reached by `step_begin` and advance the clock.
    fn step_end(&mut self, sim: &mut Simulation);

    /// Bring the floating-point particles in line with the integrator's
    /// internal state mid-step.
    fn synchronize(&mut self, sim: &mut Simulation);

    /// Drop all internal state.
    fn reset(&mut self);

    /// Clone into a new box
    fn clone_box(&self) -> Box<dyn Integrator>;
}
