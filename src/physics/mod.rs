//! N-body physics: particles, force evaluation and integration

pub mod fixed_point;
pub mod gravity;
pub mod integrators;
pub mod math;
pub mod particle;
pub mod scenarios;
pub mod simulation;
