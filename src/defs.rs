//! Definitions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest number of fractional digits a calculation accepts.
pub const MIN_DIGITS: usize = 3;

/// Largest number of fractional digits a calculation accepts.
pub const MAX_DIGITS: usize = 1000;

/// Default rounding mode.
pub const DEFAULT_RM: RoundingMode = RoundingMode::HalfUp;

/// π with 100 fractional digits. Used to validate computed values, never returned
/// in place of a computation.
pub const PI_REFERENCE: &str = "3.1415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679";

/// Number of fractional digits stored in `PI_REFERENCE`.
pub const PI_REFERENCE_DIGITS: usize = PI_REFERENCE.len() - 2;

/// Sign.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Sign {
    /// Negative.
    Neg = -1,

    /// Positive.
    Pos = 1,
}

impl Sign {
    /// Changes the sign to the opposite.
    pub fn invert(&self) -> Self {
        match *self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }

    /// Returns true if `self` is positive.
    pub fn is_positive(&self) -> bool {
        *self == Sign::Pos
    }
}

/// Possible errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The algorithm name is not one of the supported ones.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Square root of a negative number.
    #[error("square root of a negative number")]
    Domain,

    /// Divizor is zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The two cross-validated algorithms produced different digits.
    #[error("validation mismatch at digit {position}: machin {machin}, binomial series {binomial}")]
    ValidationMismatch {
        /// Value produced by Machin's formula.
        machin: String,
        /// Value produced by the binomial series.
        binomial: String,
        /// Index of the first differing character.
        position: usize,
    },

    /// The computed value does not match the reference value of π.
    #[error("calculation integrity error at digit {position}: computed {computed}, expected {expected}")]
    Integrity {
        /// Computed digits.
        computed: String,
        /// Reference digits.
        expected: String,
        /// Index of the first differing character.
        position: usize,
    },

    /// The worker thread could not be started.
    #[error("failed to start worker: {0}")]
    Spawn(String),
}

/// Rounding modes.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RoundingMode {
    /// Round half away from zero.
    HalfUp,

    /// Discard the extra digits.
    ToZero,
}
