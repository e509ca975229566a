//! Long-term conservation on a Kepler orbit
//!
//! A circular two-body orbit is integrated for ten thousand periods. Energy
//! and angular momentum must stay inside a small band, and the error late in
//! the run must be no larger than the error early in the run. The float
//! leapfrog serves as the contrast: its round-trip error grows with run length.

use janus::physics::gravity::DirectSummation;
use janus::physics::integrators::{Integrator, Janus, Leapfrog};
use janus::physics::math::{Scalar, length, relative_error};
use janus::physics::particle::max_state_deviation;
use janus::physics::scenarios::{kepler_period, two_body_circular};
use janus::physics::simulation::Simulation;

const STEPS_PER_PERIOD: usize = 40;

/// Largest relative energy and angular momentum errors seen while
/// integrating `periods` orbits, sampled once per period.
struct ErrorBand {
    energy: Vec<Scalar>,
    angular_momentum: Vec<Scalar>,
}

impl ErrorBand {
    fn max_energy(&self, range: std::ops::Range<usize>) -> Scalar {
        self.energy[range].iter().copied().fold(0.0, Scalar::max)
    }

    fn max_angular_momentum(&self) -> Scalar {
        self.angular_momentum.iter().copied().fold(0.0, Scalar::max)
    }
}

fn kepler_simulation() -> Simulation {
    let g = 1.0;
    let (primary, secondary, separation) = (1.0, 1e-3, 1.0);
    let period = kepler_period(g, primary + secondary, separation);

    Simulation::new(Box::new(DirectSummation::new(g)))
        .with_timestep(period / STEPS_PER_PERIOD as Scalar)
        .with_particles(two_body_circular(g, primary, secondary, separation))
}

/// Steps `steps` forward, reverses, steps back, and returns the largest
/// coordinate deviation from where the forward run started.
fn round_trip_deviation(integrator: &mut dyn Integrator, steps: usize) -> Scalar {
    let mut sim = kepler_simulation();
    sim.step(integrator);
    let start = sim.particles.clone();

    sim.integrate(integrator, steps);
    sim.reverse_time();
    sim.integrate(integrator, steps);

    max_state_deviation(&start, &sim.particles)
}

fn integrate_periods(
    sim: &mut Simulation,
    integrator: &mut dyn Integrator,
    periods: usize,
) -> ErrorBand {
    let initial_energy = sim.total_energy();
    let initial_angular_momentum = sim.angular_momentum();

    let mut band = ErrorBand {
        energy: Vec::with_capacity(periods),
        angular_momentum: Vec::with_capacity(periods),
    };

    for _ in 0..periods {
        sim.integrate(integrator, STEPS_PER_PERIOD);
        band.energy.push(relative_error(initial_energy, sim.total_energy()));
        band.angular_momentum.push(
            length(sim.angular_momentum() - initial_angular_momentum)
                / length(initial_angular_momentum),
        );
    }

    band
}

#[test]
fn test_energy_and_angular_momentum_stay_bounded_for_ten_thousand_periods() {
    const PERIODS: usize = 10_000;
    const WINDOW: usize = 100;

    let mut sim = kepler_simulation();
    let mut janus = Janus::default();

    let band = integrate_periods(&mut sim, &mut janus, PERIODS);

    let overall = band.max_energy(0..PERIODS);
    assert!(overall < 1e-5, "energy error left the band: {overall:e}");

    let early = band.max_energy(0..WINDOW);
    let late = band.max_energy(PERIODS - WINDOW..PERIODS);
    assert!(
        late <= 2.0 * early + 1e-10,
        "energy error grew from {early:e} to {late:e}"
    );

    let angular_momentum = band.max_angular_momentum();
    assert!(
        angular_momentum < 1e-8,
        "angular momentum drifted by {angular_momentum:e}"
    );
}

#[test]
fn test_fourth_order_beats_plain_leapfrog() {
    const PERIODS: usize = 20;

    let mut janus_sim = kepler_simulation();
    let janus_band = integrate_periods(&mut janus_sim, &mut Janus::default(), PERIODS);

    let mut leapfrog_sim = kepler_simulation();
    let leapfrog_band = integrate_periods(&mut leapfrog_sim, &mut Leapfrog, PERIODS);

    let janus_error = janus_band.max_energy(0..PERIODS);
    let leapfrog_error = leapfrog_band.max_energy(0..PERIODS);
    assert!(
        janus_error < leapfrog_error,
        "janus {janus_error:e} vs leapfrog {leapfrog_error:e}"
    );
}

#[test]
fn test_momentum_stays_at_zero_in_barycentric_frame() {
    let mut sim = kepler_simulation();
    let mut janus = Janus::new(1e14);

    sim.integrate(&mut janus, 10 * STEPS_PER_PERIOD);

    let (position, velocity) = sim.center_of_mass().unwrap();
    assert!(length(position) < 1e-8, "barycenter moved to {position}");
    assert!(length(velocity) < 1e-9, "barycenter velocity {velocity}");
}

#[test]
fn test_float_leapfrog_error_grows_with_run_length_while_janus_does_not() {
    const SHORT: usize = 5 * STEPS_PER_PERIOD;
    const LONG: usize = 500 * STEPS_PER_PERIOD;

    let leapfrog_short = round_trip_deviation(&mut Leapfrog, SHORT);
    let leapfrog_long = round_trip_deviation(&mut Leapfrog, LONG);
    assert!(
        leapfrog_long > leapfrog_short,
        "leapfrog round trip error should grow: {leapfrog_short:e} -> {leapfrog_long:e}"
    );

    let janus_short = round_trip_deviation(&mut Janus::default(), SHORT);
    let janus_long = round_trip_deviation(&mut Janus::default(), LONG);
    assert_eq!(janus_short, 0.0);
    assert_eq!(janus_long, 0.0);

    let mut sim = kepler_simulation();
    let band = integrate_periods(&mut sim, &mut Janus::default(), 500);
    let early = band.max_energy(0..50);
    let late = band.max_energy(450..500);
    assert!(
        late <= 2.0 * early + 1e-10,
        "janus energy error trended upwards: {early:e} -> {late:e}"
    );
}
