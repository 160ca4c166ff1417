//! # Argon Core Library
//!
//! A classical-mechanics simulation engine for small-to-medium atomic
//! assemblies: pairwise force-field evaluation, FIRE geometry relaxation,
//! Langevin stochastic dynamics, and Kabsch rigid-body alignment.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`AtomicState`, the periodic cell, bonded topology), pure mathematical
//!   primitives (a from-scratch 3×3 SVD), the force-field implementations
//!   (`potentials`, `nonbonded`, `bonded`), and structure I/O utilities.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer drives the
//!   numerical algorithms: the FIRE minimizer, the Langevin propagator, the
//!   Kabsch alignment solver, thermodynamic observables, and the shared
//!   progress-reporting and error machinery.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties `engine` and `core` together into complete procedures (relax a
//!   structure, run thermostatted dynamics, superpose two configurations)
//!   and is what the command-line front end calls into.
//!
//! All quantities use the Å / fs / amu / kcal·mol⁻¹ / e unit system; see
//! [`core::constants`] for the conversion factors.

pub mod core;
pub mod engine;
pub mod workflows;
