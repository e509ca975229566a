//! Bitwise reproducibility of seeded runs

use janus::config::SimulationConfig;
use janus::physics::fixed_point::FixedParticle;
use janus::physics::gravity::DirectSummation;
use janus::physics::integrators::{Integrator, Janus};
use janus::physics::scenarios::{ScenarioKind, random_cluster};
use janus::physics::simulation::Simulation;
use janus::runner;

fn run_cluster(seed: u64, steps: usize) -> Vec<FixedParticle> {
    let mut sim = Simulation::new(Box::new(DirectSummation::new(1.0).with_softening(0.05)))
        .with_timestep(2e-3)
        .with_particles(random_cluster(1.0, 24, seed));
    let mut janus = Janus::default();
    sim.integrate(&mut janus, steps);
    janus.shadow_state().to_vec()
}

#[test]
fn test_same_seed_gives_identical_fixed_point_state() {
    let first = run_cluster(42, 300);
    let second = run_cluster(42, 300);
    assert_eq!(first, second, "Seeded runs should be bit-for-bit identical");
}

#[test]
fn test_different_seeds_diverge() {
    assert_ne!(run_cluster(1, 10), run_cluster(2, 10));
}

#[test]
fn test_scenario_generation_is_reproducible() {
    let a = random_cluster(1.0, 50, 1234);
    let b = random_cluster(1.0, 50, 1234);
    assert_eq!(a, b);
    assert_ne!(a, random_cluster(1.0, 50, 4321));
}

#[test]
fn test_clone_mid_run_continues_identically() {
    let mut sim = Simulation::new(Box::new(DirectSummation::default()))
        .with_timestep(1e-3)
        .with_particles(random_cluster(1.0, 10, 8));
    let mut janus = Janus::default();
    sim.integrate(&mut janus, 100);

    let mut twin = Simulation::new(Box::new(DirectSummation::default()))
        .with_timestep(1e-3)
        .with_particles(sim.particles.clone());
    let mut twin_janus = janus.clone_box();

    sim.integrate(&mut janus, 100);
    twin.integrate(twin_janus.as_mut(), 100);

    assert_eq!(sim.particles, twin.particles);
}

#[test]
fn test_runner_summaries_are_reproducible() {
    let mut config = SimulationConfig::default();
    config.scenario.kind = ScenarioKind::RandomCluster;
    config.scenario.body_count = 12;
    config.scenario.steps = 100;
    config.physics.softening = 0.01;

    let first = runner::run(&config, true).unwrap();
    let second = runner::run(&config, true).unwrap();
    assert_eq!(first, second);
}
