use super::model::{ForceError, ForceModel};
use super::params::{LjParam, NonbondedParams};
use super::potentials;
use crate::core::models::state::AtomicState;

/// Pairs closer than this (in Å) are skipped to avoid a singular force.
const MIN_PAIR_DISTANCE: f64 = 0.1;
/// Fraction of the cutoff radius where the switching region begins.
const SWITCH_START_FRACTION: f64 = 0.9;

/// Lennard-Jones + Coulomb evaluation over all unordered atom pairs.
///
/// Per-species σ/ε are combined with Lorentz-Berthelot rules; interactions
/// use the minimum-image displacement when the cell is periodic and are
/// switched smoothly to zero over the outer 10% of the cutoff radius so
/// both the pair energy and its derivative vanish at `cutoff`.
pub struct NonbondedModel {
    params: NonbondedParams,
}

impl NonbondedModel {
    pub fn new(params: NonbondedParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &NonbondedParams {
        &self.params
    }

    fn lj_for(&self, species: usize) -> Result<LjParam, ForceError> {
        self.params
            .lj
            .get(species)
            .copied()
            .ok_or(ForceError::MissingLjParam {
                species,
                table_len: self.params.lj.len(),
            })
    }
}

impl ForceModel for NonbondedModel {
    fn accumulate(&self, state: &mut AtomicState) -> Result<(), ForceError> {
        let rc = self.params.cutoff;
        let rc_sq = rc * rc;
        let switch_start = SWITCH_START_FRACTION * rc;
        let switch_width = rc - switch_start;
        let coulomb_scale = self.params.coulomb_scale;
        let n = state.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let d = state.cell.delta(&state.positions[i], &state.positions[j]);
                let r_sq = d.norm_squared();
                if r_sq > rc_sq {
                    continue;
                }
                let r = r_sq.sqrt();
                if r < MIN_PAIR_DISTANCE {
                    continue;
                }

                let lj_i = self.lj_for(state.species[i])?;
                let lj_j = self.lj_for(state.species[j])?;
                let sigma = 0.5 * (lj_i.sigma + lj_j.sigma);
                let epsilon = (lj_i.epsilon * lj_j.epsilon).sqrt();

                let e_vdw = potentials::lennard_jones(r, sigma, epsilon);
                let f_vdw = potentials::lennard_jones_force(r, sigma, epsilon);
                let e_coul = coulomb_scale
                    * potentials::coulomb(r, state.charges[i], state.charges[j], self.params.dielectric);
                let f_coul = coulomb_scale
                    * potentials::coulomb_force(r, state.charges[i], state.charges[j], self.params.dielectric);

                let (s, ds_dr) = if r > switch_start {
                    let x = (r - switch_start) / switch_width;
                    (
                        potentials::switch_value(x),
                        potentials::switch_derivative(x) / switch_width,
                    )
                } else {
                    (1.0, 0.0)
                };

                // -d(S·U)/dr = S·F - U·dS/dr, applied to the combined pair term.
                let pair_force = s * (f_vdw + f_coul) - (e_vdw + e_coul) * ds_dr;
                state.energy.vdw += s * e_vdw;
                state.energy.coulomb += s * e_coul;

                let unit = d / r;
                state.forces[i] -= unit * pair_force;
                state.forces[j] += unit * pair_force;
            }
        }
        Ok(())
    }
}
