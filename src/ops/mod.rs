//! High-level operations on the numbers.

pub mod consts;
pub mod series;
mod sqrt;
