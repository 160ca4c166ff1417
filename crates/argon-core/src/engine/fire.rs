use super::config::FireConfig;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::forcefield::model::ForceModel;
use crate::core::models::state::AtomicState;
use nalgebra::Vector3;
use tracing::{debug, info, instrument};

/// Telemetry returned by a FIRE run, converged or exhausted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireReport {
    pub steps: u64,
    pub converged: bool,
    /// Final potential energy in kcal/mol.
    pub energy: f64,
    /// Final RMS force in kcal/(mol·Å).
    pub f_rms: f64,
    /// Mixing weight at termination.
    pub alpha: f64,
    /// Adaptive step size at termination in fs.
    pub dt: f64,
}

/// Fast Inertial Relaxation Engine.
///
/// A discrete-time feedback controller, not a fixed-point iteration: the
/// step size and mixing weight adapt to the sign of the power `P = V·F`,
/// and energy decreases on average rather than monotonically. Velocities
/// here are descent state, not physical velocities; masses never enter.
pub struct Fire {
    config: FireConfig,
}

impl Fire {
    pub fn new(config: FireConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    /// Relaxes the state toward a local minimum of the model's energy.
    ///
    /// The state must be sane; forces need not be initialized. Exhausting
    /// `max_steps` is not an error: the report carries `converged: false`
    /// and the final telemetry either way.
    #[instrument(skip_all, name = "fire_minimize")]
    pub fn minimize(
        &self,
        state: &mut AtomicState,
        model: &dyn ForceModel,
        reporter: &ProgressReporter,
    ) -> Result<FireReport, EngineError> {
        state.validate()?;
        let c = &self.config;
        let n = state.len() as f64;

        let mut dt = c.dt;
        let mut alpha = c.alpha;
        let mut n_positive = 0u32;

        // Seed descent velocities along the force so the first power check
        // is positive and the controller cannot deadlock on step one.
        model.evaluate(state)?;
        for (v, f) in state.velocities.iter_mut().zip(&state.forces) {
            *v = f * dt;
        }
        let mut prev_energy = state.energy.total();

        reporter.report(Progress::TaskStart {
            total_steps: c.max_steps,
        });

        let mut steps = 0u64;
        let mut converged = false;
        let mut f_rms = f64::INFINITY;

        for step in 1..=c.max_steps {
            steps = step;
            model.evaluate(state)?;
            let energy = state.energy.total();
            f_rms = rms_force(&state.forces);

            reporter.report(Progress::TaskIncrement);
            reporter.report(Progress::StepMetrics {
                step,
                energy,
                f_rms,
            });

            if step > 2 {
                let energy_change = (energy - prev_energy).abs() / n;
                if f_rms < c.eps_force || energy_change < c.eps_energy {
                    converged = true;
                    prev_energy = energy;
                    break;
                }
            }
            prev_energy = energy;

            let power: f64 = state
                .velocities
                .iter()
                .zip(&state.forces)
                .map(|(v, f)| v.dot(f))
                .sum();

            if power > 0.0 {
                n_positive += 1;
                if n_positive > c.n_min {
                    dt = (dt * c.f_inc).min(c.dt_max);
                    alpha *= c.f_alpha;
                }
            } else {
                n_positive = 0;
                dt *= c.f_dec;
                alpha = c.alpha;
                for v in &mut state.velocities {
                    *v = Vector3::zeros();
                }
                debug!(step, "uphill step: velocities zeroed, dt reduced");
            }

            // Inertial kick, then steer the velocity toward the force.
            for (v, f) in state.velocities.iter_mut().zip(&state.forces) {
                *v += f * dt;
            }
            let v_norm = global_norm(&state.velocities);
            let f_norm = global_norm(&state.forces);
            if f_norm > 0.0 {
                let mix = alpha * v_norm / f_norm;
                for (v, f) in state.velocities.iter_mut().zip(&state.forces) {
                    *v = *v * (1.0 - alpha) + f * mix;
                }
            }

            for (x, v) in state.positions.iter_mut().zip(&state.velocities) {
                *x += v * dt;
            }
        }

        reporter.report(Progress::TaskFinish);
        let report = FireReport {
            steps,
            converged,
            energy: prev_energy,
            f_rms,
            alpha,
            dt,
        };
        info!(
            steps = report.steps,
            converged = report.converged,
            energy = report.energy,
            f_rms = report.f_rms,
            "FIRE minimization finished"
        );
        Ok(report)
    }
}

fn rms_force(forces: &[Vector3<f64>]) -> f64 {
    if forces.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = forces.iter().map(|f| f.norm_squared()).sum();
    (sum_sq / forces.len() as f64).sqrt()
}

fn global_norm(vectors: &[Vector3<f64>]) -> f64 {
    vectors
        .iter()
        .map(|v| v.norm_squared())
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::nonbonded::NonbondedModel;
    use crate::core::forcefield::params::{LjParam, NonbondedParams};
    use crate::core::models::state::SanityError;

    const ARGON_SIGMA: f64 = 3.4;
    const ARGON_EPSILON: f64 = 0.238;

    fn argon_model() -> NonbondedModel {
        NonbondedModel::new(NonbondedParams {
            lj: vec![LjParam {
                sigma: ARGON_SIGMA,
                epsilon: ARGON_EPSILON,
            }],
            ..Default::default()
        })
    }

    fn argon_pair(separation: f64) -> AtomicState {
        let mut state = AtomicState::new(2);
        state.positions[1] = Vector3::new(separation, 0.0, 0.0);
        state.masses = vec![39.948, 39.948];
        state
    }

    #[test]
    fn two_atom_lennard_jones_pair_relaxes_to_the_well_minimum() {
        let mut state = argon_pair(4.4);
        let fire = Fire::new(FireConfig::default()).unwrap();
        let report = fire
            .minimize(&mut state, &argon_model(), &ProgressReporter::default())
            .unwrap();

        assert!(report.converged, "expected convergence, got {report:?}");
        assert!(report.steps <= 1000);
        assert!(report.f_rms < 0.1);

        let r_min = 2.0_f64.powf(1.0 / 6.0) * ARGON_SIGMA;
        let separation = (state.positions[1] - state.positions[0]).norm();
        assert!(
            (separation - r_min).abs() < 5e-2,
            "separation {separation} vs expected {r_min}"
        );
        assert!(report.energy < 0.0);
    }

    #[test]
    fn compressed_pair_relaxes_outward() {
        let mut state = argon_pair(3.0);
        let fire = Fire::new(FireConfig::default()).unwrap();
        let report = fire
            .minimize(&mut state, &argon_model(), &ProgressReporter::default())
            .unwrap();

        assert!(report.converged);
        let separation = (state.positions[1] - state.positions[0]).norm();
        assert!(separation > 3.0);
    }

    #[test]
    fn insane_state_is_rejected_before_any_evaluation() {
        let mut state = argon_pair(4.0);
        state.species.pop();
        let fire = Fire::new(FireConfig::default()).unwrap();
        let result = fire.minimize(&mut state, &argon_model(), &ProgressReporter::default());
        assert!(matches!(
            result,
            Err(EngineError::InvalidState {
                source: SanityError::LengthMismatch { array: "species", .. }
            })
        ));
    }

    #[test]
    fn exhaustion_still_returns_telemetry() {
        let mut state = argon_pair(4.4);
        let config = FireConfig {
            max_steps: 3,
            eps_force: 1e-12,
            eps_energy: 1e-16,
            ..Default::default()
        };
        let fire = Fire::new(config).unwrap();
        let report = fire
            .minimize(&mut state, &argon_model(), &ProgressReporter::default())
            .unwrap();
        assert!(!report.converged);
        assert_eq!(report.steps, 3);
        assert!(report.f_rms.is_finite());
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = FireConfig {
            dt: -0.1,
            ..Default::default()
        };
        assert!(Fire::new(config).is_err());
    }
}
