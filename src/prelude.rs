//! Janus prelude module
//!
//! Re-exports the types most callers need to set up and step a simulation.

pub use crate::config::{IntegratorConfig, PhysicsConfig, ScenarioConfig, SimulationConfig};
pub use crate::physics::fixed_point::{FixedParticle, FixedVector};
pub use crate::physics::gravity::{DirectSummation, Gravity, IgnoreTerms, NoGravity};
pub use crate::physics::integrators::registry::IntegratorRegistry;
pub use crate::physics::integrators::{Composition, Integrator, Janus, Leapfrog};
pub use crate::physics::math::{Fixed, Scalar, Vector};
pub use crate::physics::particle::Particle;
pub use crate::physics::scenarios::ScenarioKind;
pub use crate::physics::simulation::Simulation;
