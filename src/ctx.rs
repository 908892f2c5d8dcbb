//! All operations of a calculation are performed in some context.

use crate::defs::RoundingMode;
use crate::defs::DEFAULT_RM;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Precision context of a calculation: the working precision and the rounding mode used by every
/// arithmetic operation performed during one algorithm call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    p: usize,
    rm: RoundingMode,
}

impl Context {
    /// Create a new context.
    pub fn new(p: usize, rm: RoundingMode) -> Self {
        Context { p, rm }
    }

    /// Returns the precision of the context in significant decimal digits.
    pub fn precision(&self) -> usize {
        self.p
    }

    /// Returns the rounding mode of the context.
    pub fn rounding_mode(&self) -> RoundingMode {
        self.rm
    }
}

/// Rule for sizing the working precision from the number of requested digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrecisionBudget {
    /// Digits added on top of the requested ones.
    pub margin: usize,

    /// The working precision never goes below this value.
    pub floor: usize,
}

impl PrecisionBudget {
    /// Budget of Machin's formula.
    pub const MACHIN: PrecisionBudget = PrecisionBudget {
        margin: 200,
        floor: 500,
    };

    /// Budget of the binomial series, which divides by rapidly growing factorials.
    pub const BINOMIAL: PrecisionBudget = PrecisionBudget {
        margin: 300,
        floor: 600,
    };

    /// Returns the working precision for `digits` requested digits.
    pub fn precision_for(&self, digits: usize) -> usize {
        (digits + self.margin).max(self.floor)
    }

    /// Returns the context for `digits` requested digits.
    pub fn context_for(&self, digits: usize) -> Context {
        Context::new(self.precision_for(digits), DEFAULT_RM)
    }
}

/// Tunable parameters of a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalcConfig {
    /// Working precision of Machin's formula.
    pub machin: PrecisionBudget,

    /// Working precision of the binomial series.
    pub binomial: PrecisionBudget,

    /// Arctangent series stop once a term is below 10^-(digits + arctan_margin).
    pub arctan_margin: usize,

    /// Binomial series stop once a term is below 10^-(digits + binomial_margin).
    pub binomial_margin: usize,

    /// Number of series iterations between two progress reports.
    pub progress_interval: usize,

    /// Square root iteration stops once the step is below 10^-(precision - sqrt_offset).
    pub sqrt_offset: usize,

    /// Emit partial values of the binomial series through `digits_update`.
    pub preview: bool,

    /// Number of binomial series terms between two partial values.
    pub preview_interval: usize,
}

impl Default for CalcConfig {
    fn default() -> Self {
        CalcConfig {
            machin: PrecisionBudget::MACHIN,
            binomial: PrecisionBudget::BINOMIAL,
            arctan_margin: 50,
            binomial_margin: 100,
            progress_interval: 100,
            sqrt_offset: 10,
            preview: true,
            preview_interval: 4,
        }
    }
}
