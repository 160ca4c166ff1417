use crate::core::models::energy::EnergyBreakdown;
use crate::core::models::state::AtomicState;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForceError {
    #[error("non-finite force component on atom {atom} (numerical blow-up)")]
    NonFiniteForce { atom: usize },
    #[error("species {species} has no Lennard-Jones parameters (table holds {table_len})")]
    MissingLjParam { species: usize, table_len: usize },
    #[error("bonded term references atom {atom} but the state holds {n} atoms")]
    AtomIndexOutOfRange { atom: usize, n: usize },
}

/// Contract for force and energy evaluation over an [`AtomicState`].
///
/// [`evaluate`](ForceModel::evaluate) is a pure function of the state's
/// positions, charges, species, topology, and the model's immutable
/// parameters. It owns zeroing the force buffer and resetting the energy
/// ledger (stale values are never read) and rejects non-finite output
/// immediately rather than letting a blow-up propagate into subsequent
/// integration steps.
pub trait ForceModel {
    /// Adds this model's forces and energies into the state's buffers
    /// without clearing them first.
    fn accumulate(&self, state: &mut AtomicState) -> Result<(), ForceError>;

    /// Full evaluation: clear, accumulate, verify finiteness.
    fn evaluate(&self, state: &mut AtomicState) -> Result<(), ForceError> {
        state.clear_forces();
        state.energy = EnergyBreakdown::default();
        self.accumulate(state)?;
        if let Some(atom) = state
            .forces
            .iter()
            .position(|f| !(f.x.is_finite() && f.y.is_finite() && f.z.is_finite()))
        {
            return Err(ForceError::NonFiniteForce { atom });
        }
        Ok(())
    }
}

/// Runs several force models over a single cleared force/energy buffer.
#[derive(Default)]
pub struct CompositeModel {
    models: Vec<Box<dyn ForceModel>>,
}

impl CompositeModel {
    pub fn new(models: Vec<Box<dyn ForceModel>>) -> Self {
        Self { models }
    }

    pub fn push(&mut self, model: Box<dyn ForceModel>) {
        self.models.push(model);
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ForceModel for CompositeModel {
    fn accumulate(&self, state: &mut AtomicState) -> Result<(), ForceError> {
        for model in &self.models {
            model.accumulate(state)?;
        }
        Ok(())
    }
}
