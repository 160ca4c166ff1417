use super::config::LangevinConfig;
use super::error::EngineError;
use super::observables;
use super::progress::{Progress, ProgressReporter};
use crate::core::constants::{BOLTZMANN, KCAL_MOL_TO_AMU_A2_FS2};
use crate::core::forcefield::model::ForceModel;
use crate::core::models::state::AtomicState;
use nalgebra::Vector3;
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::{info, instrument, trace};

/// Welford running mean/variance accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// One telemetry sample of a dynamics trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSample {
    pub step: u64,
    pub temperature: f64,
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

/// Aggregate statistics reported at the end of a Langevin run.
#[derive(Debug, Clone, PartialEq)]
pub struct LangevinReport {
    pub steps: u64,
    pub mean_temperature: f64,
    pub temperature_std_dev: f64,
    pub mean_kinetic: f64,
    pub mean_potential: f64,
    pub mean_total: f64,
    pub final_temperature: f64,
    pub final_total_energy: f64,
    /// Samples taken every `print_freq` steps (empty when `print_freq` is 0).
    pub samples: Vec<StepSample>,
}

/// Langevin stochastic dynamics with an Ornstein-Uhlenbeck velocity
/// thermostat.
///
/// Per step and per atom: deterministic kick from the current forces, then
/// `v ← a·v + b·R` with `a = exp(-γ·dt)` and `b` the thermal amplitude at
/// the target temperature, then an explicit position update. The random
/// source is owned by the caller and passed in explicitly, so runs are
/// reproducible by seeding.
pub struct Langevin {
    config: LangevinConfig,
}

impl Langevin {
    pub fn new(config: LangevinConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LangevinConfig {
        &self.config
    }

    /// Propagates the state for `n_steps`, returning trajectory statistics.
    ///
    /// After transient equilibration the running mean temperature converges
    /// to `t_target` regardless of the initial velocities, with
    /// central-limit fluctuations shrinking as the system grows.
    #[instrument(skip_all, name = "langevin_run")]
    pub fn run<R: Rng>(
        &self,
        state: &mut AtomicState,
        model: &dyn ForceModel,
        rng: &mut R,
        reporter: &ProgressReporter,
    ) -> Result<LangevinReport, EngineError> {
        state.validate_masses()?;
        let c = &self.config;
        let n = state.len();

        let a = (-c.gamma * c.dt).exp();
        // Thermal amplitude per atom: sqrt(k_B·T/m·(1-a²)), converted from
        // kcal/mol into the native velocity unit.
        let noise_scale = BOLTZMANN * c.t_target * (1.0 - a * a) * KCAL_MOL_TO_AMU_A2_FS2;
        let inv_masses: Vec<f64> = state.masses.iter().map(|&m| 1.0 / m).collect();
        let b: Vec<f64> = inv_masses.iter().map(|&im| (noise_scale * im).sqrt()).collect();

        let mut temperature_stats = RunningStats::default();
        let mut kinetic_stats = RunningStats::default();
        let mut potential_stats = RunningStats::default();
        let mut total_stats = RunningStats::default();
        let mut samples = Vec::new();

        reporter.report(Progress::TaskStart {
            total_steps: c.n_steps,
        });

        for step in 1..=c.n_steps {
            model.evaluate(state)?;

            for i in 0..n {
                let kick = state.forces[i] * (inv_masses[i] * KCAL_MOL_TO_AMU_A2_FS2 * c.dt);
                let noise = Vector3::new(
                    rng.sample(StandardNormal),
                    rng.sample(StandardNormal),
                    rng.sample(StandardNormal),
                );
                state.velocities[i] = (state.velocities[i] + kick) * a + noise * b[i];
                let displacement = state.velocities[i] * c.dt;
                state.positions[i] += displacement;
            }

            let temperature = observables::temperature(state);
            let kinetic = observables::kinetic_energy(state);
            let potential = state.energy.total();
            temperature_stats.push(temperature);
            kinetic_stats.push(kinetic);
            potential_stats.push(potential);
            total_stats.push(kinetic + potential);

            reporter.report(Progress::TaskIncrement);
            if c.verbose {
                trace!(step, temperature, kinetic, potential, "dynamics step");
            }
            if c.print_freq > 0 && step % c.print_freq == 0 {
                info!(
                    step,
                    temperature,
                    total_energy = kinetic + potential,
                    mean_temperature = temperature_stats.mean(),
                    "dynamics progress"
                );
                reporter.report(Progress::StepMetrics {
                    step,
                    energy: kinetic + potential,
                    f_rms: 0.0,
                });
                samples.push(StepSample {
                    step,
                    temperature,
                    kinetic,
                    potential,
                    total: kinetic + potential,
                });
            }
        }

        reporter.report(Progress::TaskFinish);

        let report = LangevinReport {
            steps: c.n_steps,
            mean_temperature: temperature_stats.mean(),
            temperature_std_dev: temperature_stats.std_dev(),
            mean_kinetic: kinetic_stats.mean(),
            mean_potential: potential_stats.mean(),
            mean_total: total_stats.mean(),
            final_temperature: observables::temperature(state),
            final_total_energy: observables::kinetic_energy(state) + state.energy.total(),
            samples,
        };
        info!(
            steps = report.steps,
            mean_temperature = report.mean_temperature,
            temperature_std_dev = report.temperature_std_dev,
            "Langevin dynamics finished"
        );
        Ok(report)
    }
}
