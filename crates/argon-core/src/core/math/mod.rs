//! Small dense linear algebra on top of [`nalgebra`]'s fixed-size types.

pub mod svd;

pub use svd::{Svd3, polar_rotation, svd3};
