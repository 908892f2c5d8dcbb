//! Algorithms computing π.

pub mod chudnovsky;
pub mod machin;

pub use chudnovsky::chudnovsky;
pub use chudnovsky::FactorialAccumulators;
pub use machin::machin;
