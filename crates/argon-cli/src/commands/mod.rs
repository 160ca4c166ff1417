pub mod align;
pub mod dynamics;
pub mod minimize;
