//! Initial conditions

use std::fmt;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::physics::math::{Scalar, Vector};
use crate::physics::particle::Particle;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Two bodies on a circular orbit
    #[default]
    TwoBody,
    /// Randomly placed, virialized cluster
    RandomCluster,
    /// One particle at rest at the origin
    SingleParticle,
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioKind::TwoBody => "two_body",
            ScenarioKind::RandomCluster => "random_cluster",
            ScenarioKind::SingleParticle => "single_particle",
        };
        f.write_str(name)
    }
}

impl ScenarioKind {
    pub fn build(self, g: Scalar, body_count: usize, seed: u64) -> Vec<Particle> {
        match self {
            ScenarioKind::TwoBody => two_body_circular(g, 1.0, 1e-3, 1.0),
            ScenarioKind::RandomCluster => random_cluster(g, body_count, seed),
            ScenarioKind::SingleParticle => vec![single_particle_at_rest()],
        }
    }
}

/// Orbital period of a Keplerian orbit with semi-major axis `a` around total
/// mass `total_mass`.
pub fn kepler_period(g: Scalar, total_mass: Scalar, a: Scalar) -> Scalar {
    2.0 * std::f64::consts::PI * libm::sqrt(a * a * a / (g * total_mass))
}

/// Two bodies on a circular orbit in the x-y plane, in the barycentric frame.
pub fn two_body_circular(
    g: Scalar,
    primary_mass: Scalar,
    secondary_mass: Scalar,
    separation: Scalar,
) -> Vec<Particle> {
    let total_mass = primary_mass + secondary_mass;
    let relative_speed = libm::sqrt(g * total_mass / separation);

    let primary_fraction = secondary_mass / total_mass;
    let secondary_fraction = primary_mass / total_mass;

    vec![
        Particle::new(
            primary_mass,
            Vector::new(-separation * primary_fraction, 0.0, 0.0),
            Vector::new(0.0, -relative_speed * primary_fraction, 0.0),
        ),
        Particle::new(
            secondary_mass,
            Vector::new(separation * secondary_fraction, 0.0, 0.0),
            Vector::new(0.0, relative_speed * secondary_fraction, 0.0),
        ),
    ]
}

pub fn single_particle_at_rest() -> Particle {
    Particle::at_rest(1.0, Vector::ZERO)
}

fn random_unit_vector(rng: &mut ChaCha8Rng) -> Vector {
    let theta = rng.random_range(0.0..2.0 * std::f64::consts::PI);
    let phi = libm::acos(rng.random_range(-1.0..=1.0));

    Vector::new(
        libm::sin(phi) * libm::cos(theta),
        libm::sin(phi) * libm::sin(theta),
        libm::cos(phi),
    )
}

/// `count` equal-mass bodies of total mass 1 spread uniformly through a unit
/// sphere, with isotropic velocities scaled so the cluster starts in virial
/// equilibrium, shifted into the barycentric frame. The same seed always
/// yields the same bodies.
pub fn random_cluster(g: Scalar, count: usize, seed: u64) -> Vec<Particle> {
    if count == 0 {
        return Vec::new();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mass = 1.0 / count as Scalar;

    let mut particles: Vec<Particle> = (0..count)
        .map(|_| {
            let radius = libm::cbrt(rng.random_range(0.0..1.0));
            let position = random_unit_vector(&mut rng) * radius;
            let velocity = random_unit_vector(&mut rng) * rng.random_range(0.0..1.0);
            Particle::new(mass, position, velocity)
        })
        .collect();

    let total_momentum: Vector = particles.iter().map(Particle::momentum).sum();
    let center: Vector = particles.iter().map(|p| p.position * p.mass).sum();
    for particle in particles.iter_mut() {
        particle.position -= center;
        particle.velocity -= total_momentum;
    }

    // Virial equilibrium: 2T = -U
    let kinetic: Scalar = particles.iter().map(Particle::kinetic_energy).sum();
    let mut potential = 0.0;
    for i in 0..count {
        for j in (i + 1)..count {
            let separation = particles[i].position - particles[j].position;
            let distance = libm::sqrt(separation.length_squared()).max(1e-3);
            potential -= g * particles[i].mass * particles[j].mass / distance;
        }
    }
    if kinetic > 0.0 && potential < 0.0 {
        let factor = libm::sqrt(-potential / (2.0 * kinetic));
        for particle in particles.iter_mut() {
            particle.velocity *= factor;
        }
    }

    particles
}
