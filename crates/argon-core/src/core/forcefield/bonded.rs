use super::model::{ForceError, ForceModel};
use super::params::BondedParams;
use crate::core::models::state::AtomicState;
use nalgebra::Vector3;
use std::f64::consts::PI;

const DEGENERATE_LENGTH: f64 = 1e-8;
const DEGENERATE_SIN: f64 = 1e-8;
const DEGENERATE_NORMAL_SQ: f64 = 1e-12;

/// Harmonic bonds and angles, periodic torsions, and harmonic impropers.
///
/// Term lists are immutable configuration referencing atoms by index.
/// Degenerate geometry (coincident atoms, straight angles, collinear
/// dihedral frames) skips the offending term's force contribution locally
/// instead of producing a singular force.
pub struct BondedModel {
    params: BondedParams,
}

/// Dihedral angle and its analytic gradient for the four participating
/// atoms, from the Blondel-Karplus closed form.
struct DihedralFrame {
    phi: f64,
    grad_i: Vector3<f64>,
    grad_j: Vector3<f64>,
    grad_k: Vector3<f64>,
    grad_l: Vector3<f64>,
}

impl BondedModel {
    pub fn new(params: BondedParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BondedParams {
        &self.params
    }

    fn check_atom(&self, atom: usize, n: usize) -> Result<(), ForceError> {
        if atom >= n {
            return Err(ForceError::AtomIndexOutOfRange { atom, n });
        }
        Ok(())
    }

    fn accumulate_bonds(&self, state: &mut AtomicState) -> Result<(), ForceError> {
        let n = state.len();
        for term in &self.params.bonds {
            self.check_atom(term.i, n)?;
            self.check_atom(term.j, n)?;

            let d = state.cell.delta(&state.positions[term.i], &state.positions[term.j]);
            let r = d.norm();
            let stretch = r - term.r0;
            state.energy.bond += term.k_b * stretch * stretch;

            if r < DEGENERATE_LENGTH {
                continue;
            }
            let du_dr = 2.0 * term.k_b * stretch;
            let f = d * (du_dr / r);
            state.forces[term.i] += f;
            state.forces[term.j] -= f;
        }
        Ok(())
    }

    fn accumulate_angles(&self, state: &mut AtomicState) -> Result<(), ForceError> {
        let n = state.len();
        for term in &self.params.angles {
            self.check_atom(term.i, n)?;
            self.check_atom(term.j, n)?;
            self.check_atom(term.k, n)?;

            let rji = state.cell.delta(&state.positions[term.j], &state.positions[term.i]);
            let rjk = state.cell.delta(&state.positions[term.j], &state.positions[term.k]);
            let r1 = rji.norm();
            let r2 = rjk.norm();
            if r1 < DEGENERATE_LENGTH || r2 < DEGENERATE_LENGTH {
                continue;
            }

            let cos_theta = (rji.dot(&rjk) / (r1 * r2)).clamp(-1.0, 1.0);
            let theta = cos_theta.acos();
            let bend = theta - term.theta0;
            state.energy.angle += term.k_theta * bend * bend;

            // Near θ=π the angle gradient denominator vanishes.
            let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
            if sin_theta < DEGENERATE_SIN {
                continue;
            }

            let du_dtheta = 2.0 * term.k_theta * bend;
            let u1 = rji / r1;
            let u2 = rjk / r2;
            let f_i = (u1 * cos_theta - u2) * (-du_dtheta / (r1 * sin_theta));
            let f_k = (u2 * cos_theta - u1) * (-du_dtheta / (r2 * sin_theta));
            state.forces[term.i] += f_i;
            state.forces[term.k] += f_k;
            state.forces[term.j] -= f_i + f_k;
        }
        Ok(())
    }

    fn accumulate_torsions(&self, state: &mut AtomicState) -> Result<(), ForceError> {
        let n = state.len();
        for term in &self.params.torsions {
            self.check_atom(term.i, n)?;
            self.check_atom(term.j, n)?;
            self.check_atom(term.k, n)?;
            self.check_atom(term.l, n)?;

            let Some(frame) = dihedral_frame(state, term.i, term.j, term.k, term.l) else {
                continue;
            };

            let periodicity = f64::from(term.n);
            let arg = periodicity * frame.phi - term.gamma;
            state.energy.torsion += term.v_n * (1.0 + arg.cos());

            let du_dphi = -term.v_n * periodicity * arg.sin();
            frame.apply(state, du_dphi, term.i, term.j, term.k, term.l);
        }
        Ok(())
    }

    fn accumulate_impropers(&self, state: &mut AtomicState) -> Result<(), ForceError> {
        let n = state.len();
        for term in &self.params.impropers {
            self.check_atom(term.i, n)?;
            self.check_atom(term.j, n)?;
            self.check_atom(term.k, n)?;
            self.check_atom(term.l, n)?;

            let Some(frame) = dihedral_frame(state, term.i, term.j, term.k, term.l) else {
                continue;
            };

            let deviation = wrap_angle(frame.phi - term.phi0);
            state.energy.improper += term.k_imp * deviation * deviation;

            let du_dphi = 2.0 * term.k_imp * deviation;
            frame.apply(state, du_dphi, term.i, term.j, term.k, term.l);
        }
        Ok(())
    }
}

impl ForceModel for BondedModel {
    fn accumulate(&self, state: &mut AtomicState) -> Result<(), ForceError> {
        self.accumulate_bonds(state)?;
        self.accumulate_angles(state)?;
        self.accumulate_torsions(state)?;
        self.accumulate_impropers(state)?;
        Ok(())
    }
}

impl DihedralFrame {
    /// Distributes `F = -dU/dφ·∇φ` onto the four atoms.
    fn apply(&self, state: &mut AtomicState, du_dphi: f64, i: usize, j: usize, k: usize, l: usize) {
        state.forces[i] -= self.grad_i * du_dphi;
        state.forces[j] -= self.grad_j * du_dphi;
        state.forces[k] -= self.grad_k * du_dphi;
        state.forces[l] -= self.grad_l * du_dphi;
    }
}

/// Signed dihedral φ over atoms i-j-k-l and its gradient.
///
/// φ is the atan2 of a signed triple product; the per-atom gradients are
/// the Blondel-Karplus closed form, with the two middle atoms expressed
/// through the bond-projection coefficients. Returns `None` when either
/// plane normal (or the central bond) is too short to define the angle.
fn dihedral_frame(state: &AtomicState, i: usize, j: usize, k: usize, l: usize) -> Option<DihedralFrame> {
    let b1 = state.cell.delta(&state.positions[i], &state.positions[j]);
    let b2 = state.cell.delta(&state.positions[j], &state.positions[k]);
    let b3 = state.cell.delta(&state.positions[k], &state.positions[l]);

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    let n1_sq = n1.norm_squared();
    let n2_sq = n2.norm_squared();
    let g = b2.norm();
    if n1_sq < DEGENERATE_NORMAL_SQ || n2_sq < DEGENERATE_NORMAL_SQ || g < DEGENERATE_LENGTH {
        return None;
    }

    let phi = (n1.cross(&n2).dot(&b2) / g).atan2(n1.dot(&n2));

    let grad_i = n1 * (-g / n1_sq);
    let grad_l = n2 * (g / n2_sq);
    let s1 = b1.dot(&b2) / (g * g);
    let s2 = b3.dot(&b2) / (g * g);
    let grad_j = grad_i * (s1 - 1.0) - grad_l * s2;
    let grad_k = grad_l * (s2 - 1.0) - grad_i * s1;

    Some(DihedralFrame {
        phi,
        grad_i,
        grad_j,
        grad_k,
        grad_l,
    })
}

/// Wraps an angle into (−π, π].
fn wrap_angle(angle: f64) -> f64 {
    let mut wrapped = angle - 2.0 * PI * (angle / (2.0 * PI)).round();
    if wrapped <= -PI {
        wrapped += 2.0 * PI;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::{AngleTerm, BondTerm, ImproperTerm, TorsionTerm};
    use std::f64::consts::FRAC_PI_2;

    fn state_with_positions(positions: &[[f64; 3]]) -> AtomicState {
        let mut state = AtomicState::new(positions.len());
        for (idx, p) in positions.iter().enumerate() {
            state.positions[idx] = Vector3::new(p[0], p[1], p[2]);
        }
        state
    }

    /// Central-difference force check: F[atom][axis] ≈ -dU/dx.
    fn assert_forces_match_numerical_gradient(model: &BondedModel, state: &AtomicState) {
        let h = 1e-6;
        let mut reference = state.clone();
        model.evaluate(&mut reference).unwrap();

        for atom in 0..state.len() {
            for axis in 0..3 {
                let mut plus = state.clone();
                plus.positions[atom][axis] += h;
                model.evaluate(&mut plus).unwrap();

                let mut minus = state.clone();
                minus.positions[atom][axis] -= h;
                model.evaluate(&mut minus).unwrap();

                let numeric = -(plus.energy.total() - minus.energy.total()) / (2.0 * h);
                let analytic = reference.forces[atom][axis];
                assert!(
                    (numeric - analytic).abs() < 1e-4,
                    "atom {atom} axis {axis}: analytic {analytic} vs numeric {numeric}"
                );
            }
        }
    }

    #[test]
    fn bond_at_equilibrium_has_no_energy_or_force() {
        let state_template = state_with_positions(&[[0.0, 0.0, 0.0], [1.5, 0.0, 0.0]]);
        let model = BondedModel::new(BondedParams {
            bonds: vec![BondTerm {
                i: 0,
                j: 1,
                k_b: 300.0,
                r0: 1.5,
            }],
            ..Default::default()
        });

        let mut state = state_template;
        model.evaluate(&mut state).unwrap();
        assert!(state.energy.total().abs() < 1e-12);
        assert!(state.forces[0].norm() < 1e-12);
    }

    #[test]
    fn stretched_bond_pulls_atoms_back_together() {
        let mut state = state_with_positions(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let model = BondedModel::new(BondedParams {
            bonds: vec![BondTerm {
                i: 0,
                j: 1,
                k_b: 100.0,
                r0: 1.5,
            }],
            ..Default::default()
        });
        model.evaluate(&mut state).unwrap();

        assert!((state.energy.bond - 100.0 * 0.25).abs() < 1e-9);
        assert!(state.forces[0].x > 0.0);
        assert!(state.forces[1].x < 0.0);
        assert!((state.forces[0] + state.forces[1]).norm() < 1e-12);
    }

    #[test]
    fn bond_forces_match_numerical_gradient() {
        let state = state_with_positions(&[[0.1, -0.2, 0.3], [1.9, 0.4, -0.6]]);
        let model = BondedModel::new(BondedParams {
            bonds: vec![BondTerm {
                i: 0,
                j: 1,
                k_b: 120.0,
                r0: 1.5,
            }],
            ..Default::default()
        });
        assert_forces_match_numerical_gradient(&model, &state);
    }

    #[test]
    fn angle_at_equilibrium_has_no_energy_or_force() {
        let mut state =
            state_with_positions(&[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let model = BondedModel::new(BondedParams {
            angles: vec![AngleTerm {
                i: 0,
                j: 1,
                k: 2,
                k_theta: 50.0,
                theta0: FRAC_PI_2,
            }],
            ..Default::default()
        });
        model.evaluate(&mut state).unwrap();
        assert!(state.energy.total().abs() < 1e-12);
        assert!(state.forces.iter().all(|f| f.norm() < 1e-10));
    }

    #[test]
    fn bent_angle_forces_sum_to_zero_and_match_numerical_gradient() {
        let state =
            state_with_positions(&[[1.0, 0.1, -0.2], [0.0, 0.0, 0.0], [0.2, 1.1, 0.3]]);
        let model = BondedModel::new(BondedParams {
            angles: vec![AngleTerm {
                i: 0,
                j: 1,
                k: 2,
                k_theta: 35.0,
                theta0: 1.9,
            }],
            ..Default::default()
        });

        let mut evaluated = state.clone();
        model.evaluate(&mut evaluated).unwrap();
        let net: Vector3<f64> = evaluated.forces.iter().sum();
        assert!(net.norm() < 1e-10);
        assert!(evaluated.energy.angle > 0.0);

        assert_forces_match_numerical_gradient(&model, &state);
    }

    #[test]
    fn straight_angle_skips_the_singular_force_but_keeps_the_energy() {
        let mut state =
            state_with_positions(&[[-1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        let model = BondedModel::new(BondedParams {
            angles: vec![AngleTerm {
                i: 0,
                j: 1,
                k: 2,
                k_theta: 50.0,
                theta0: 1.9,
            }],
            ..Default::default()
        });
        model.evaluate(&mut state).unwrap();

        let expected = 50.0 * (PI - 1.9) * (PI - 1.9);
        assert!((state.energy.angle - expected).abs() < 1e-9);
        assert!(state.forces.iter().all(|f| f.norm() == 0.0));
    }

    #[test]
    fn trans_torsion_sits_at_its_energy_minimum() {
        // i-j-k-l planar trans: φ = π.
        let mut state = state_with_positions(&[
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, -1.0, 0.0],
        ]);
        let model = BondedModel::new(BondedParams {
            torsions: vec![TorsionTerm {
                i: 0,
                j: 1,
                k: 2,
                l: 3,
                v_n: 2.0,
                n: 1,
                gamma: 0.0,
            }],
            ..Default::default()
        });
        model.evaluate(&mut state).unwrap();
        assert!(state.energy.torsion.abs() < 1e-12);
        assert!(state.forces.iter().all(|f| f.norm() < 1e-9));
    }

    #[test]
    fn perpendicular_torsion_carries_the_full_barrier_gradient() {
        // φ = π/2 for this frame.
        let state = state_with_positions(&[
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
        ]);
        let model = BondedModel::new(BondedParams {
            torsions: vec![TorsionTerm {
                i: 0,
                j: 1,
                k: 2,
                l: 3,
                v_n: 1.5,
                n: 1,
                gamma: 0.0,
            }],
            ..Default::default()
        });

        let mut evaluated = state.clone();
        model.evaluate(&mut evaluated).unwrap();
        assert!((evaluated.energy.torsion - 1.5).abs() < 1e-9);
        let net: Vector3<f64> = evaluated.forces.iter().sum();
        assert!(net.norm() < 1e-10);

        assert_forces_match_numerical_gradient(&model, &state);
    }

    #[test]
    fn multi_term_torsion_accumulates_fourier_components() {
        let mut state = state_with_positions(&[
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
        ]);
        let shared = |v_n, n| TorsionTerm {
            i: 0,
            j: 1,
            k: 2,
            l: 3,
            v_n,
            n,
            gamma: 0.0,
        };
        let model = BondedModel::new(BondedParams {
            torsions: vec![shared(1.0, 1), shared(0.5, 2)],
            ..Default::default()
        });
        model.evaluate(&mut state).unwrap();
        // V1(1+cos(π/2)) + V2(1+cos(π)) = 1.0 + 0.0
        assert!((state.energy.torsion - 1.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_dihedral_frame_is_skipped_without_blowing_up() {
        let mut state = state_with_positions(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [3.0, 0.0, 0.0],
        ]);
        let model = BondedModel::new(BondedParams {
            torsions: vec![TorsionTerm {
                i: 0,
                j: 1,
                k: 2,
                l: 3,
                v_n: 2.0,
                n: 3,
                gamma: 0.0,
            }],
            ..Default::default()
        });
        model.evaluate(&mut state).unwrap();
        assert_eq!(state.energy.total(), 0.0);
        assert!(state.forces.iter().all(|f| f.norm() == 0.0));
    }

    #[test]
    fn improper_deviation_is_wrapped_before_squaring() {
        let state = state_with_positions(&[
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
        ]);
        // φ = π/2; the raw deviation is nearly 2π and must wrap to ±0.1.
        let model = BondedModel::new(BondedParams {
            impropers: vec![ImproperTerm {
                i: 0,
                j: 1,
                k: 2,
                l: 3,
                k_imp: 10.0,
                phi0: FRAC_PI_2 - 2.0 * PI + 0.1,
            }],
            ..Default::default()
        });
        let mut evaluated = state.clone();
        model.evaluate(&mut evaluated).unwrap();
        assert!((evaluated.energy.improper - 10.0 * 0.1 * 0.1).abs() < 1e-9);

        assert_forces_match_numerical_gradient(&model, &state);
    }

    #[test]
    fn out_of_range_term_index_is_an_error() {
        let mut state = state_with_positions(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
        let model = BondedModel::new(BondedParams {
            bonds: vec![BondTerm {
                i: 0,
                j: 7,
                k_b: 1.0,
                r0: 1.0,
            }],
            ..Default::default()
        });
        let result = model.evaluate(&mut state);
        assert_eq!(result, Err(ForceError::AtomIndexOutOfRange { atom: 7, n: 2 }));
    }
}
