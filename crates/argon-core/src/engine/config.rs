use super::error::ConfigError;
use serde::Deserialize;

/// Parameters of the FIRE minimizer.
///
/// Time quantities are in fs, forces in kcal/(mol·Å), energies in kcal/mol.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Initial integration step.
    pub dt: f64,
    /// Upper bound the adaptive step may grow to.
    pub dt_max: f64,
    /// Initial velocity-mixing weight.
    pub alpha: f64,
    /// Step growth factor applied after sustained downhill motion.
    pub f_inc: f64,
    /// Step shrink factor applied on uphill motion.
    pub f_dec: f64,
    /// Mixing-weight decay factor.
    pub f_alpha: f64,
    /// Downhill steps required before the step size may grow.
    pub n_min: u32,
    /// Convergence threshold on the RMS force.
    pub eps_force: f64,
    /// Convergence threshold on the per-atom energy change.
    pub eps_energy: f64,
    /// Iteration budget; exhaustion is reported, not an error.
    pub max_steps: u64,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            dt_max: 1.0,
            alpha: 0.1,
            f_inc: 1.1,
            f_dec: 0.5,
            f_alpha: 0.99,
            n_min: 5,
            eps_force: 1e-4,
            eps_energy: 1e-8,
            max_steps: 1000,
        }
    }
}

impl FireConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("dt", self.dt),
            ("dt_max", self.dt_max),
            ("eps_force", self.eps_force),
            ("eps_energy", self.eps_energy),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if self.max_steps == 0 {
            return Err(ConfigError::NonPositive("max_steps"));
        }
        if self.dt > self.dt_max {
            return Err(ConfigError::OutOfRange("dt"));
        }
        if !(0.0..1.0).contains(&self.alpha) || self.alpha == 0.0 {
            return Err(ConfigError::OutOfRange("alpha"));
        }
        if self.f_inc <= 1.0 {
            return Err(ConfigError::OutOfRange("f_inc"));
        }
        if !(0.0..1.0).contains(&self.f_dec) || self.f_dec == 0.0 {
            return Err(ConfigError::OutOfRange("f_dec"));
        }
        if !(0.0..1.0).contains(&self.f_alpha) || self.f_alpha == 0.0 {
            return Err(ConfigError::OutOfRange("f_alpha"));
        }
        Ok(())
    }
}

/// Parameters of the Langevin propagator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LangevinConfig {
    /// Integration step in fs.
    pub dt: f64,
    /// Number of steps to run; reaching it is completion, not failure.
    pub n_steps: u64,
    /// Thermostat target temperature in K.
    pub t_target: f64,
    /// Friction coefficient in 1/fs.
    pub gamma: f64,
    /// Steps between progress log lines and telemetry samples; 0 disables
    /// both. Reporting cadence only; never affects the trajectory.
    pub print_freq: u64,
    /// Emit per-step trace logging in addition to the periodic summaries.
    pub verbose: bool,
}

impl Default for LangevinConfig {
    fn default() -> Self {
        Self {
            dt: 1.0,
            n_steps: 1000,
            t_target: 300.0,
            gamma: 0.01,
            print_freq: 100,
            verbose: false,
        }
    }
}

impl LangevinConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("dt", self.dt),
            ("t_target", self.t_target),
            ("gamma", self.gamma),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive(name));
            }
        }
        if self.n_steps == 0 {
            return Err(ConfigError::NonPositive("n_steps"));
        }
        Ok(())
    }
}
