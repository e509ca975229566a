//! Headless scenario runs

use std::fmt;

use bevy::log::debug;

use crate::config::SimulationConfig;
use crate::physics::gravity::DirectSummation;
use crate::physics::integrators::registry::IntegratorRegistry;
use crate::physics::math::{Scalar, length, relative_error};
use crate::physics::particle::max_state_deviation;
use crate::physics::simulation::Simulation;

/// Conservation diagnostics of a finished run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub integrator: String,
    pub body_count: usize,
    pub steps: usize,
    pub final_time: Scalar,
    pub initial_energy: Scalar,
    /// Largest relative energy error seen at any step
    pub max_energy_error: Scalar,
    /// Largest angular momentum deviation relative to the initial magnitude
    pub max_angular_momentum_error: Scalar,
    /// Largest per-coordinate deviation from the initial state after
    /// integrating back to the start, when a reversal was requested
    pub reversal_error: Option<Scalar>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with {} bodies, {} steps to t = {:.6}: max |dE/E| = {:.3e}, max |dL|/|L| = {:.3e}",
            self.integrator,
            self.body_count,
            self.steps,
            self.final_time,
            self.max_energy_error,
            self.max_angular_momentum_error,
        )?;
        if let Some(reversal_error) = self.reversal_error {
            write!(f, ", reversal error = {reversal_error:.3e}")?;
        }
        Ok(())
    }
}

/// Build the configured scenario, integrate it and collect diagnostics.
///
/// With `reverse`, the run continues for the same number of steps with the
/// timestep negated and reports how far the final state is from the initial
/// one.
pub fn run(config: &SimulationConfig, reverse: bool) -> Result<RunSummary, String> {
    config.validate().map_err(|e| e.to_string())?;

    let mut integrator = IntegratorRegistry::new().create(&config.integrator)?;

    let gravity = DirectSummation::new(config.physics.gravitational_constant)
        .with_softening(config.physics.softening);
    let particles = config.scenario.kind.build(
        config.physics.gravitational_constant,
        config.scenario.body_count,
        config.scenario.seed,
    );
    let mut sim = Simulation::new(Box::new(gravity))
        .with_timestep(config.physics.timestep)
        .with_particles(particles);

    let initial_particles = sim.particles.clone();
    let initial_energy = sim.total_energy();
    let initial_angular_momentum = sim.angular_momentum();
    let angular_momentum_norm = length(initial_angular_momentum).max(Scalar::EPSILON);

    let mut max_energy_error: Scalar = 0.0;
    let mut max_angular_momentum_error: Scalar = 0.0;
    let mut record = |sim: &Simulation| {
        let energy_error = relative_error(initial_energy, sim.total_energy());
        let angular_momentum_error =
            length(sim.angular_momentum() - initial_angular_momentum) / angular_momentum_norm;
        max_energy_error = max_energy_error.max(energy_error);
        max_angular_momentum_error = max_angular_momentum_error.max(angular_momentum_error);
    };

    debug!(
        "Running {} bodies with {} for {} steps",
        sim.len(),
        integrator.name(),
        config.scenario.steps
    );

    for _ in 0..config.scenario.steps {
        sim.step(integrator.as_mut());
        record(&sim);
    }
    let final_time = sim.t;

    let reversal_error = if reverse {
        sim.reverse_time();
        for _ in 0..config.scenario.steps {
            sim.step(integrator.as_mut());
            record(&sim);
        }
        Some(max_state_deviation(&initial_particles, &sim.particles))
    } else {
        None
    };

    Ok(RunSummary {
        integrator: integrator.name().to_string(),
        body_count: sim.len(),
        steps: config.scenario.steps,
        final_time,
        initial_energy,
        max_energy_error,
        max_angular_momentum_error,
        reversal_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::scenarios::ScenarioKind;

    fn short_config(kind: ScenarioKind) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.scenario.kind = kind;
        config.scenario.steps = 200;
        config.scenario.body_count = 8;
        config.integrator.scale = 1e12;
        config
    }

    #[test]
    fn test_two_body_run_conserves_energy() {
        let summary = run(&short_config(ScenarioKind::TwoBody), false).unwrap();
        assert_eq!(summary.integrator, "janus");
        assert_eq!(summary.body_count, 2);
        assert!((summary.final_time - 2.0).abs() < 1e-12);
        assert!(summary.max_energy_error < 1e-9, "{summary}");
        assert!(summary.reversal_error.is_none());
    }

    #[test]
    fn test_reverse_run_returns_to_start() {
        let config = short_config(ScenarioKind::RandomCluster);
        let summary = run(&config, true).unwrap();
        let reversal_error = summary.reversal_error.unwrap();
        // Truncation on entry plus rounding of the scaled value
        assert!(
            reversal_error <= 2.0 / config.integrator.scale,
            "reversal error {reversal_error:e}"
        );
    }

    #[test]
    fn test_single_particle_run() {
        let summary = run(&short_config(ScenarioKind::SingleParticle), true).unwrap();
        assert_eq!(summary.reversal_error, Some(0.0));
        assert_eq!(summary.max_energy_error, 0.0);
    }

    #[test]
    fn test_unknown_scheme_is_reported() {
        let mut config = short_config(ScenarioKind::TwoBody);
        config.integrator.scheme = "euler".to_string();
        assert!(run(&config, false).unwrap_err().contains("Unknown integrator"));
    }

    #[test]
    fn test_summary_display_mentions_reversal() {
        let summary = run(&short_config(ScenarioKind::SingleParticle), true).unwrap();
        assert!(summary.to_string().contains("reversal error"));
    }
}
