use crate::core::forcefield::model::ForceError;
use crate::core::models::state::SanityError;
use thiserror::Error;

/// Fatal failures of an engine entry point.
///
/// Both variants abort the calling operation immediately: an insane state
/// must never be silently truncated, and a non-finite force must never
/// propagate into subsequent integration steps. Degenerate geometry and
/// convergence exhaustion are deliberately absent: the former is recovered
/// locally inside the force models, the latter is reported as ordinary
/// telemetry.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid state: {source}")]
    InvalidState {
        #[from]
        source: SanityError,
    },

    #[error("Force evaluation failed: {source}")]
    Force {
        #[from]
        source: ForceError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Rejected integrator configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("parameter '{0}' must be positive")]
    NonPositive(&'static str),
    #[error("parameter '{0}' is outside its valid range")]
    OutOfRange(&'static str),
}
