//! Janus library
//!
//! A bit-reversible fixed-point symplectic integrator for gravitational
//! N-body simulation, together with the small host simulation, gravity
//! routines and scenarios needed to drive it.

pub mod config;
pub mod physics;
pub mod prelude;
pub mod runner;

// Test utilities are public for integration tests and benchmarks
pub mod test_utils;

// Re-export commonly used items
pub use config::SimulationConfig;
pub use physics::{
    integrators,
    math::{Fixed, Scalar, Vector},
};
