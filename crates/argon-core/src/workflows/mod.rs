//! # Workflows Module
//!
//! High-level, end-to-end procedures tying the [`core`](crate::core) and
//! [`engine`](crate::engine) layers together. Each workflow loads a
//! structure, assembles force models, runs one engine operation, and writes
//! the result back out. These are the entry points the command-line front
//! end calls.
//!
//! - [`minimize`] - relax a structure with FIRE
//! - [`dynamics`] - propagate a structure with Langevin dynamics
//! - [`align`] - superpose one structure onto another

pub mod align;
pub mod dynamics;
pub mod minimize;

use crate::core::elements;
use crate::core::forcefield::bonded::BondedModel;
use crate::core::forcefield::model::CompositeModel;
use crate::core::forcefield::nonbonded::NonbondedModel;
use crate::core::forcefield::params::{ForceFieldParams, LjParam, ParamLoadError};
use crate::core::io::xyz::XyzError;
use crate::engine::error::EngineError;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Structure(#[from] XyzError),

    #[error(transparent)]
    Params(#[from] ParamLoadError),
}

/// Loads force-field parameters, or falls back to defaults when no file is
/// given, then fills an empty Lennard-Jones table from the element
/// database for the species actually present in the structure.
pub(crate) fn resolve_forcefield(
    path: Option<&Path>,
    species_symbols: &[String],
) -> Result<ForceFieldParams, WorkflowError> {
    let mut params = match path {
        Some(p) => ForceFieldParams::load(p)?,
        None => ForceFieldParams::default(),
    };

    if params.nonbonded.lj.is_empty() {
        params.nonbonded.lj = species_symbols
            .iter()
            .map(|symbol| {
                let element = elements::lookup(symbol);
                LjParam {
                    sigma: element.lj_sigma,
                    epsilon: element.lj_epsilon,
                }
            })
            .collect();
        info!(
            species = species_symbols.len(),
            "Lennard-Jones table seeded from the element database"
        );
    }
    Ok(params)
}

/// Builds the composite force model for a parameter set: nonbonded always,
/// bonded only when terms are present.
pub(crate) fn build_model(params: &ForceFieldParams) -> CompositeModel {
    let mut model = CompositeModel::new(vec![Box::new(NonbondedModel::new(
        params.nonbonded.clone(),
    ))]);
    let bonded = &params.bonded;
    if !(bonded.bonds.is_empty()
        && bonded.angles.is_empty()
        && bonded.torsions.is_empty()
        && bonded.impropers.is_empty())
    {
        model.push(Box::new(BondedModel::new(bonded.clone())));
    }
    model
}
