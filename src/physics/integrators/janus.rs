//! Janus: a bit-reversible fixed-point symplectic integrator
//!
//! Janus keeps the authoritative phase-space state of every particle in
//! [`FixedParticle`]s and only ever changes it by integer addition. Each
//! sub-step is a drift-kick-drift leapfrog whose increments are rounded once,
//! to the nearest integer, before being added:
//!
//! ```text
//! x += round(dt/2 * v)           (v read as its raw integer value)
//! v += round(scale * dt * a(x))  (a from the host's gravity, physical units)
//! x += round(dt/2 * v)
//! ```
//!
//! Because rounding half away from zero is odd-symmetric, the increments
//! produced with `-dt` are exactly the negation of those produced with `dt` for
//! the same state. Running a sub-step backwards therefore restores the previous integer
//! state bit-for-bit, provided the force evaluation is a deterministic function
//! of the positions. The full timestep is a palindromic [`Composition`] of
//! sub-steps, which makes the whole step reversible as well: integrating `n`
//! steps forward and `n` steps with the timestep negated returns exactly to
//! the starting integers, however large `n` is.
//!
//! The floating-point particles in the host simulation are a derived view.
//! They are rewritten before every force evaluation and at
//! [`Integrator::step_end`], and re-read into the shadow state only when the
//! particle count changes or [`Janus::request_recalculation`] is called.
//!
//! # Choosing the scale
//!
//! Coordinates are stored as integer multiples of `1 / scale`. The scale must
//! leave `|x| * scale` and `|v| * scale` well inside the `i128` range, and
//! ideally inside the 53-bit mantissa of `f64` so the drift product stays
//! exact. Overflow is not detected; it silently wraps. A scale that is too
//! small only costs resolution.
//!
//! # Reference
//!
//! Rein & Tamayo (2018) "JANUS: a bit-wise reversible integrator for N-body
//! dynamics", MNRAS 473(3), 3351-3357.

use bevy::log::{debug, warn};

use super::{Composition, Integrator};
use crate::physics::fixed_point::{FixedParticle, FixedVector, to_fixed_point, to_floating_point};
use crate::physics::gravity::IgnoreTerms;
use crate::physics::math::Scalar;
use crate::physics::simulation::Simulation;

/// Janus integrator - a bit-reversible fixed-point composition of leapfrogs
///
/// Integrates the fixed-point shadow state with a palindromic composition of
/// drift-kick-drift sub-steps. Every update is an integer addition of a
/// rounded increment, so the only floating-point work that can differ between
/// a forward and a backward pass is the force evaluation itself, which sees
/// identical positions on both passes.
///
/// # Algorithm Structure
///
/// One full timestep runs the sub-step once per composition coefficient:
///
/// ```text
/// for γ in [γ1, γ2, γ3, γ4, γ5, γ4, γ3, γ2, γ1]:
///     x += round(γ dt/2 * v)
///     a  = gravity(x / scale)
///     v += round(scale * γ dt * a)
///     x += round(γ dt/2 * v)
/// ```
///
/// The floating-point particles are only written back, and the clock only
/// advanced, in [`Integrator::step_end`].
///
/// # Mathematical Properties
///
/// - **Order of accuracy**: 4 with the default nine-stage composition, 2 with
///   [`Composition::SECOND_ORDER`]
/// - **Force evaluations**: one per sub-step (9 per timestep by default)
/// - **Symplectic**: Yes, up to the rounding of each increment
/// - **Time-reversible**: Exactly, bit for bit, for any number of steps
/// - **Round-off**: unbiased; energy error stays in a fixed band instead of
///   drifting
///
/// # State
///
/// The shadow state is allocated lazily on the first step and re-derived
/// whenever the particle count changes, after [`Janus::request_recalculation`]
/// or [`Janus::set_scale`]. [`Integrator::reset`] drops it.
#[derive(Debug, Clone)]
pub struct Janus {
    scale: Scalar,
    composition: Composition,
    /// One entry per particle once initialized, empty otherwise
    shadow: Vec<FixedParticle>,
    recalculate: bool,
}

impl Janus {
    pub const DEFAULT_SCALE: Scalar = 1e15;

    pub fn new(scale: Scalar) -> Self {
        Self {
            scale,
            composition: Composition::default(),
            shadow: Vec::new(),
            recalculate: false,
        }
    }

    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = composition;
        self
    }

    #[inline]
    pub fn scale(&self) -> Scalar {
        self.scale
    }

    /// Change the scale. The shadow state is re-derived from the
    /// floating-point particles on the next step.
    pub fn set_scale(&mut self, scale: Scalar) {
        self.scale = scale;
        self.recalculate = true;
    }

    #[inline]
    pub fn composition(&self) -> Composition {
        self.composition
    }

    /// The fixed-point state, empty before the first step and after a reset.
    #[inline]
    pub fn shadow_state(&self) -> &[FixedParticle] {
        &self.shadow
    }

    /// Re-derive the shadow state from the floating-point particles on the next
    /// step. Call this after editing particles in place.
    pub fn request_recalculation(&mut self) {
        self.recalculate = true;
    }

    /// Make sure the shadow state covers exactly the simulation's particles,
    /// converting the floating-point view if it does not.
    pub fn prepare(&mut self, sim: &Simulation) {
        let reason = if self.recalculate {
            "recalculation requested"
        } else if self.shadow.len() != sim.len() {
            if self.shadow.is_empty() {
                "first step"
            } else {
                "particle count changed"
            }
        } else {
            return;
        };

        debug!(
            "Initializing fixed-point state for {} particles ({reason})",
            sim.len()
        );

        self.shadow = to_fixed_point(&sim.particles, self.scale);
        self.recalculate = false;
    }

    /// Run a single drift-kick-drift sub-step of length `dt`, preparing the
    /// shadow state first if needed.
    pub fn sub_step(&mut self, sim: &mut Simulation, dt: Scalar) {
        self.prepare(sim);
        self.leapfrog(sim, dt);
    }

    fn leapfrog(&mut self, sim: &mut Simulation, dt: Scalar) {
        let half_dt = dt / 2.0;

        self.drift(half_dt);

        sim.gravity_ignore_terms = IgnoreTerms::None;
        to_floating_point(&self.shadow, &mut sim.particles, self.scale);
        sim.update_acceleration();

        let kick = self.scale * dt;
        for (fixed, particle) in self.shadow.iter_mut().zip(sim.particles.iter()) {
            fixed.velocity += FixedVector::round(particle.acceleration * kick);
        }

        self.drift(half_dt);
    }

    /// Positions move by the raw velocity integers, so no scale factor enters.
    fn drift(&mut self, dt: Scalar) {
        for fixed in self.shadow.iter_mut() {
            fixed.position += FixedVector::round(fixed.velocity.as_vector() * dt);
        }
    }
}

impl Default for Janus {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SCALE)
    }
}

impl Integrator for Janus {
    fn name(&self) -> &'static str {
        "janus"
    }

    fn aliases(&self) -> Vec<&'static str> {
        vec!["fixed_point", "reversible"]
    }

    fn order(&self) -> usize {
        self.composition.order()
    }

    fn step_begin(&mut self, sim: &mut Simulation) {
        sim.gravity_ignore_terms = IgnoreTerms::None;
        self.prepare(sim);

        let composition = self.composition;
        for dt in composition.sub_steps(sim.dt) {
            self.leapfrog(sim, dt);
        }
    }

    fn step_end(&mut self, sim: &mut Simulation) {
        if self.shadow.len() == sim.len() {
            to_floating_point(&self.shadow, &mut sim.particles, self.scale);
        } else {
            warn!(
                "Fixed-point state covers {} particles but the simulation has {}; \
                 leaving particles untouched",
                self.shadow.len(),
                sim.len()
            );
        }
        sim.t += sim.dt;
    }

    fn synchronize(&mut self, _sim: &mut Simulation) {}

    fn reset(&mut self) {
        if !self.shadow.is_empty() {
            debug!("Releasing fixed-point state for {} particles", self.shadow.len());
        }
        self.shadow = Vec::new();
        self.recalculate = false;
    }

    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(self.clone())
    }
}
