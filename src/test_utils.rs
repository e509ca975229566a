//! Test utilities shared by unit tests, integration tests and benchmarks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::physics::gravity::{Gravity, IgnoreTerms};
use crate::physics::math::Scalar;
use crate::physics::particle::Particle;

/// Isotropic spring toward the origin: `a = -k x`.
///
/// A conservative field that depends on nothing but each particle's own
/// position, handy for exact-reversal checks.
#[derive(Debug, Clone, Copy)]
pub struct HarmonicField {
    pub k: Scalar,
}

impl HarmonicField {
    pub fn new(k: Scalar) -> Self {
        Self { k }
    }
}

impl Gravity for HarmonicField {
    fn name(&self) -> &str {
        "harmonic"
    }

    fn compute(&self, particles: &mut [Particle], _ignore: IgnoreTerms) {
        for particle in particles.iter_mut() {
            particle.acceleration = -self.k * particle.position;
        }
    }

    fn potential_energy(&self, particles: &[Particle]) -> Scalar {
        particles
            .iter()
            .map(|p| 0.5 * self.k * p.mass * p.position.length_squared())
            .sum()
    }
}

/// Shared record of what a [`CountingGravity`] was asked to do
#[derive(Debug, Default)]
pub struct EvaluationLog {
    evaluations: AtomicUsize,
    hints: Mutex<Vec<IgnoreTerms>>,
}

impl EvaluationLog {
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// The ignore-terms hint passed to every evaluation, in order
    pub fn hints(&self) -> Vec<IgnoreTerms> {
        self.hints.lock().map(|hints| hints.clone()).unwrap_or_default()
    }
}

/// Wraps another [`Gravity`] and records each evaluation.
pub struct CountingGravity<G> {
    inner: G,
    log: Arc<EvaluationLog>,
}

impl<G: Gravity> CountingGravity<G> {
    /// Returns the wrapper and a handle to its log, which stays readable after
    /// the wrapper has been moved into a simulation.
    pub fn new(inner: G) -> (Self, Arc<EvaluationLog>) {
        let log = Arc::new(EvaluationLog::default());
        (
            Self {
                inner,
                log: Arc::clone(&log),
            },
            log,
        )
    }
}

impl<G: Gravity> Gravity for CountingGravity<G> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn compute(&self, particles: &mut [Particle], ignore: IgnoreTerms) {
        self.log.evaluations.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut hints) = self.log.hints.lock() {
            hints.push(ignore);
        }
        self.inner.compute(particles, ignore);
    }

    fn potential_energy(&self, particles: &[Particle]) -> Scalar {
        self.inner.potential_energy(particles)
    }
}
