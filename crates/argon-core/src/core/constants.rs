//! Physical constants for the Å / fs / amu / kcal·mol⁻¹ / e unit system.

/// Boltzmann constant in kcal/(mol·K).
pub const BOLTZMANN: f64 = 1.987204259e-3;

/// Coulomb constant in kcal·Å/(mol·e²).
pub const COULOMB_CONSTANT: f64 = 332.0637;

/// Converts kcal/mol into the native kinetic unit amu·Å²/fs².
///
/// Dividing a kinetic energy expressed in amu·Å²/fs² by this factor yields
/// kcal/mol; multiplying an acceleration in kcal/(mol·Å·amu) by it yields
/// Å/fs².
pub const KCAL_MOL_TO_AMU_A2_FS2: f64 = 4.184e-4;

/// Converts a pressure in kcal/(mol·Å³) into atmospheres.
pub const ATM_PER_KCAL_MOL_A3: f64 = 68_568.415;
