//! Read-only thermodynamic observables over an [`AtomicState`].
//!
//! Pure functions; none of them mutate the state or depend on anything but
//! the current arrays.

use crate::core::constants::{ATM_PER_KCAL_MOL_A3, BOLTZMANN, KCAL_MOL_TO_AMU_A2_FS2};
use crate::core::models::state::AtomicState;
use nalgebra::Vector3;

/// Total kinetic energy in kcal/mol.
pub fn kinetic_energy(state: &AtomicState) -> f64 {
    let native: f64 = state
        .velocities
        .iter()
        .zip(&state.masses)
        .map(|(v, &m)| 0.5 * m * v.norm_squared())
        .sum();
    native / KCAL_MOL_TO_AMU_A2_FS2
}

/// Instantaneous kinetic temperature `2·KE / (3N·k_B)` in K.
pub fn temperature(state: &AtomicState) -> f64 {
    if state.is_empty() {
        return 0.0;
    }
    2.0 * kinetic_energy(state) / (3.0 * state.len() as f64 * BOLTZMANN)
}

/// Atomic virial `Σ r·f` in kcal/mol over the current forces.
pub fn virial(state: &AtomicState) -> f64 {
    state
        .positions
        .iter()
        .zip(&state.forces)
        .map(|(r, f)| r.dot(f))
        .sum()
}

/// Virial pressure estimate `(N·k_B·T + W/3) / V` in atm.
///
/// Requires an enabled periodic cell; `None` otherwise.
pub fn pressure(state: &AtomicState) -> Option<f64> {
    let volume = state.cell.volume()?;
    let ideal = state.len() as f64 * BOLTZMANN * temperature(state);
    Some((ideal + virial(state) / 3.0) / volume * ATM_PER_KCAL_MOL_A3)
}

/// Mass-weighted radius of gyration in Å.
pub fn radius_of_gyration(state: &AtomicState) -> f64 {
    let total_mass: f64 = state.masses.iter().sum();
    if total_mass <= 0.0 {
        return 0.0;
    }
    let com = state.center_of_mass();
    let weighted: f64 = state
        .positions
        .iter()
        .zip(&state.masses)
        .map(|(r, &m)| m * (r - com).norm_squared())
        .sum();
    (weighted / total_mass).sqrt()
}

/// Net linear momentum `Σ m·v` in amu·Å/fs.
pub fn net_momentum(state: &AtomicState) -> Vector3<f64> {
    state
        .velocities
        .iter()
        .zip(&state.masses)
        .map(|(v, &m)| v * m)
        .sum()
}
