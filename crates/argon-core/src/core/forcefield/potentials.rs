use crate::core::constants::COULOMB_CONSTANT;

#[inline]
pub fn lennard_jones(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    let sr6 = (sigma / dist).powi(6);
    4.0 * epsilon * (sr6 * sr6 - sr6)
}

/// Radial force `-dU/dr` of the 12-6 potential; positive is repulsive.
#[inline]
pub fn lennard_jones_force(dist: f64, sigma: f64, epsilon: f64) -> f64 {
    let sr6 = (sigma / dist).powi(6);
    24.0 * epsilon * (2.0 * sr6 * sr6 - sr6) / dist
}

#[inline]
pub fn coulomb(dist: f64, q1: f64, q2: f64, dielectric: f64) -> f64 {
    COULOMB_CONSTANT * q1 * q2 / (dielectric * dist)
}

/// Radial force `-dU/dr` of the Coulomb potential.
#[inline]
pub fn coulomb_force(dist: f64, q1: f64, q2: f64, dielectric: f64) -> f64 {
    COULOMB_CONSTANT * q1 * q2 / (dielectric * dist * dist)
}

/// Quintic switching polynomial `S(x) = 1 - 10x³ + 15x⁴ - 6x⁵`.
///
/// `S(0) = 1`, `S(1) = 0`, with vanishing first derivative at both ends, so
/// a potential multiplied by `S` goes to zero smoothly at the cutoff.
#[inline]
pub fn switch_value(x: f64) -> f64 {
    1.0 - x * x * x * (10.0 - 15.0 * x + 6.0 * x * x)
}

/// Derivative `dS/dx = -30x²(1-x)²` of the switching polynomial.
#[inline]
pub fn switch_derivative(x: f64) -> f64 {
    let one_minus = 1.0 - x;
    -30.0 * x * x * one_minus * one_minus
}
