//! # Force Field Module
//!
//! Molecular-mechanics force and energy evaluation over an
//! [`AtomicState`](crate::core::models::state::AtomicState).
//!
//! ## Key Components
//!
//! - [`potentials`] - pure pairwise potential functions (Lennard-Jones,
//!   Coulomb, quintic switching)
//! - [`params`] - immutable parameter structures and TOML loading
//! - [`model`] - the `ForceModel` contract and the composite model
//! - [`nonbonded`] - Lennard-Jones + Coulomb pair evaluation with
//!   Lorentz-Berthelot combining and a smooth cutoff
//! - [`bonded`] - harmonic bonds/angles, periodic torsions, and harmonic
//!   impropers
//!
//! Every model owns its parameters read-only; evaluation mutates only the
//! force buffer and energy ledger of the state it is handed.

pub mod bonded;
pub mod model;
pub mod nonbonded;
pub mod params;
pub mod potentials;
