use crate::core::models::topology::Topology;
use nalgebra::Vector3;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Per-species Lennard-Jones parameters (σ in Å, ε in kcal/mol).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LjParam {
    pub sigma: f64,
    pub epsilon: f64,
}

/// Nonbonded interaction parameters.
///
/// `lj` is indexed by the per-atom species id. Interactions are truncated at
/// `cutoff` with a quintic switch active over the outer 10% of the range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NonbondedParams {
    /// Truncation radius in Å.
    pub cutoff: f64,
    /// Relative permittivity dividing the Coulomb term.
    pub dielectric: f64,
    /// Scale applied to Coulomb energy and forces. Defaults to 0.0:
    /// electrostatics stay off until the coupling with the integrators is
    /// stable for the shipped parameter sets. Set to 1.0 for full-strength
    /// electrostatics.
    pub coulomb_scale: f64,
    /// Lennard-Jones table indexed by species id.
    pub lj: Vec<LjParam>,
}

impl Default for NonbondedParams {
    fn default() -> Self {
        Self {
            cutoff: 10.0,
            dielectric: 1.0,
            coulomb_scale: 0.0,
            lj: Vec::new(),
        }
    }
}

/// Harmonic bond `U = k_b (r - r0)²`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BondTerm {
    pub i: usize,
    pub j: usize,
    /// Force constant in kcal/(mol·Å²).
    pub k_b: f64,
    /// Equilibrium length in Å.
    pub r0: f64,
}

/// Harmonic angle `U = k_theta (θ - θ0)²` with vertex atom `j`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AngleTerm {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    /// Force constant in kcal/(mol·rad²).
    pub k_theta: f64,
    /// Equilibrium angle in radians.
    pub theta0: f64,
}

/// One Fourier component of a periodic torsion
/// `U = v_n (1 + cos(n·φ - gamma))`.
///
/// Several terms may share the same atom quadruple; their contributions
/// add.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TorsionTerm {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub l: usize,
    /// Barrier height in kcal/mol.
    pub v_n: f64,
    /// Periodicity.
    pub n: u32,
    /// Phase offset in radians.
    pub gamma: f64,
}

/// Harmonic out-of-plane improper `U = k_imp (Δφ)²`, Δφ wrapped into
/// (−π, π].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ImproperTerm {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub l: usize,
    /// Force constant in kcal/(mol·rad²).
    pub k_imp: f64,
    /// Reference angle in radians.
    pub phi0: f64,
}

/// Immutable bonded-term tables referenced read-only during evaluation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BondedParams {
    pub bonds: Vec<BondTerm>,
    pub angles: Vec<AngleTerm>,
    pub torsions: Vec<TorsionTerm>,
    pub impropers: Vec<ImproperTerm>,
}

/// Uniform force constants for topology-derived bonded terms.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct UniformConstants {
    pub k_b: f64,
    pub k_theta: f64,
    pub v_torsion: f64,
    pub torsion_n: u32,
    pub torsion_gamma: f64,
}

impl Default for UniformConstants {
    fn default() -> Self {
        Self {
            k_b: 300.0,
            k_theta: 50.0,
            v_torsion: 1.0,
            torsion_n: 3,
            torsion_gamma: 0.0,
        }
    }
}

impl BondedParams {
    /// Derives a full bonded-term set from a bare bond topology.
    ///
    /// Equilibrium lengths and angles are taken from the current geometry
    /// and every term of a kind shares the same force constant. Intended
    /// for quick testing, not for production force fields.
    pub fn uniform_from_topology(
        topology: &Topology,
        positions: &[Vector3<f64>],
        constants: &UniformConstants,
    ) -> Self {
        let bonds = topology
            .edges()
            .iter()
            .map(|&[i, j]| BondTerm {
                i,
                j,
                k_b: constants.k_b,
                r0: (positions[j] - positions[i]).norm(),
            })
            .collect();

        let angles = topology
            .derive_angles()
            .into_iter()
            .map(|[i, j, k]| {
                let a = (positions[i] - positions[j]).normalize();
                let b = (positions[k] - positions[j]).normalize();
                AngleTerm {
                    i,
                    j,
                    k,
                    k_theta: constants.k_theta,
                    theta0: a.dot(&b).clamp(-1.0, 1.0).acos(),
                }
            })
            .collect();

        let torsions = topology
            .derive_dihedrals()
            .into_iter()
            .map(|[i, j, k, l]| TorsionTerm {
                i,
                j,
                k,
                l,
                v_n: constants.v_torsion,
                n: constants.torsion_n,
                gamma: constants.torsion_gamma,
            })
            .collect();

        Self {
            bonds,
            angles,
            torsions,
            impropers: Vec::new(),
        }
    }
}

/// Complete force-field parameterization loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ForceFieldParams {
    pub nonbonded: NonbondedParams,
    pub bonded: BondedParams,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl ForceFieldParams {
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}
