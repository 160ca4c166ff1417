//! # Core Module
//!
//! The fundamental building blocks of the simulation engine: canonical data
//! models, pure math, force-field evaluation, and structure I/O.
//!
//! ## Architecture
//!
//! - **Mathematical Primitives** ([`math`]) - 3×3 Jacobi SVD and polar
//!   decomposition used by the alignment solver
//! - **Simulation State** ([`models`]) - `AtomicState`, the periodic cell,
//!   the bonded topology, and the additive energy ledger
//! - **Force Fields** ([`forcefield`]) - Lennard-Jones/Coulomb nonbonded and
//!   harmonic/torsional bonded models behind a single `ForceModel` contract
//! - **Element Data** ([`elements`]) - atomic masses and per-element
//!   Lennard-Jones parameters with a carbon-like fallback
//! - **File I/O** ([`io`]) - XYZ reading/writing preserving array order and
//!   units
//!
//! Everything in this layer is stateless between calls: force models are
//! immutable once constructed and mutate only the state buffers handed to
//! them.

pub mod constants;
pub mod elements;
pub mod forcefield;
pub mod io;
pub mod math;
pub mod models;
