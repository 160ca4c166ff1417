//! Structure file I/O.
//!
//! The boundary contract is narrow: readers and writers preserve array
//! order and units (Å for positions, elementary charges, amu for masses,
//! Å/fs for velocities). [`traits::StructureFile`] is the common interface;
//! [`xyz`] implements the XYZ format with optional charge/velocity columns.

pub mod traits;
pub mod xyz;
