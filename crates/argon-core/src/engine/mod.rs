//! # Engine Module
//!
//! The numerical algorithms that drive a simulation: deterministic energy
//! minimization, stochastic dynamics, rigid-body alignment, and the
//! read-only thermodynamic observables they report.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - integrator parameters with validated
//!   defaults
//! - **FIRE Minimizer** ([`fire`]) - velocity-damping relaxation toward a
//!   local energy minimum
//! - **Langevin Dynamics** ([`langevin`]) - thermostatted propagation with
//!   caller-supplied randomness
//! - **Alignment** ([`alignment`]) - Kabsch optimal superposition and its
//!   animated variant
//! - **Observables** ([`observables`]) - temperature, pressure, and related
//!   pure functions over the state
//! - **Progress Monitoring** ([`progress`]) - callback-based progress events
//!   for front ends
//! - **Error Handling** ([`error`]) - fatal error taxonomy shared by every
//!   entry point
//!
//! Everything here is single-threaded and synchronous: integrators block on
//! each force evaluation, own their state exclusively for the duration of a
//! call, and bound execution only through their step limits.

pub mod alignment;
pub mod config;
pub mod error;
pub mod fire;
pub mod langevin;
pub mod observables;
pub mod progress;
