use super::energy::EnergyBreakdown;
use super::pbc::SimulationBox;
use super::topology::Topology;
use nalgebra::Vector3;
use thiserror::Error;

/// Violations of the state sanity invariant.
///
/// A state is sane only if every parallel array has length `n` and `n > 0`.
/// Integrator entry points validate this and abort rather than silently
/// truncating.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SanityError {
    #[error("state holds no atoms")]
    Empty,
    #[error("{array} length {len} does not match atom count {n}")]
    LengthMismatch {
        array: &'static str,
        len: usize,
        n: usize,
    },
    #[error("atom {atom} has non-positive mass")]
    NonpositiveMass { atom: usize },
}

/// The canonical simulation state: one mutable aggregate of parallel arrays.
///
/// All arrays are indexed by the dense atom index `0..n`. Positions are in
/// Å, velocities in Å/fs, forces in kcal/(mol·Å), charges in elementary
/// charges, masses in amu. `species` indexes the force-field parameter
/// tables. Force models overwrite `forces` and `energy` on every
/// evaluation; integrators advance `positions` and `velocities` in place.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicState {
    n: usize,
    pub positions: Vec<Vector3<f64>>,
    pub velocities: Vec<Vector3<f64>>,
    pub forces: Vec<Vector3<f64>>,
    pub charges: Vec<f64>,
    pub masses: Vec<f64>,
    pub species: Vec<usize>,
    pub topology: Topology,
    pub energy: EnergyBreakdown,
    pub cell: SimulationBox,
}

impl AtomicState {
    /// Creates a zero-initialized state for `n` atoms with unit masses, no
    /// bonds, and periodicity disabled.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            positions: vec![Vector3::zeros(); n],
            velocities: vec![Vector3::zeros(); n],
            forces: vec![Vector3::zeros(); n],
            charges: vec![0.0; n],
            masses: vec![1.0; n],
            species: vec![0; n],
            topology: Topology::empty(n),
            energy: EnergyBreakdown::default(),
            cell: SimulationBox::disabled(),
        }
    }

    /// The authoritative atom count for all parallel arrays.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Checks the sanity invariant: `n > 0` and every array of length `n`.
    pub fn validate(&self) -> Result<(), SanityError> {
        if self.n == 0 {
            return Err(SanityError::Empty);
        }
        let checks: [(&'static str, usize); 6] = [
            ("positions", self.positions.len()),
            ("velocities", self.velocities.len()),
            ("forces", self.forces.len()),
            ("charges", self.charges.len()),
            ("masses", self.masses.len()),
            ("species", self.species.len()),
        ];
        for (array, len) in checks {
            if len != self.n {
                return Err(SanityError::LengthMismatch {
                    array,
                    len,
                    n: self.n,
                });
            }
        }
        Ok(())
    }

    /// Extends [`validate`](AtomicState::validate) with a positive-mass
    /// check, required wherever accelerations are computed.
    pub fn validate_masses(&self) -> Result<(), SanityError> {
        self.validate()?;
        for (atom, &m) in self.masses.iter().enumerate() {
            if m <= 0.0 {
                return Err(SanityError::NonpositiveMass { atom });
            }
        }
        Ok(())
    }

    pub fn clear_forces(&mut self) {
        for f in &mut self.forces {
            *f = Vector3::zeros();
        }
    }

    /// Mass-weighted center of mass; falls back to the geometric centroid
    /// when the total mass vanishes.
    pub fn center_of_mass(&self) -> Vector3<f64> {
        let total_mass: f64 = self.masses.iter().sum();
        if total_mass > 0.0 {
            self.positions
                .iter()
                .zip(&self.masses)
                .map(|(r, &m)| r * m)
                .sum::<Vector3<f64>>()
                / total_mass
        } else if self.n > 0 {
            self.positions.iter().sum::<Vector3<f64>>() / self.n as f64
        } else {
            Vector3::zeros()
        }
    }
}
