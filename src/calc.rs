//! Calculation requests and their dispatch to the algorithms.

use crate::common::util::first_difference;
use crate::ctx::CalcConfig;
use crate::defs::Error;
use crate::defs::MAX_DIGITS;
use crate::defs::MIN_DIGITS;
use crate::format::present;
use crate::format::round_digits;
use crate::observer::Observer;
use crate::observer::Progress;
use crate::observer::Span;
use crate::ops::consts::chudnovsky;
use crate::ops::consts::machin;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Algorithm computing π.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    /// Machin's arctangent formula.
    Machin,

    /// Chudnovsky binomial series.
    BinomialSeries,

    /// Both of the above, which must agree.
    CrossValidation,
}

impl Algorithm {
    /// Name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Machin => "machin",
            Algorithm::BinomialSeries => "binomial-series",
            Algorithm::CrossValidation => "cross-validation",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "machin" => Ok(Algorithm::Machin),
            "chudnovsky" | "binomial" | "binomial-series" => Ok(Algorithm::BinomialSeries),
            "cross-validation" | "crossvalidation" => Ok(Algorithm::CrossValidation),
            _ => Err(Error::UnsupportedAlgorithm(s.to_owned())),
        }
    }
}

/// Request to compute `digits` fractional digits of π with `algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculationRequest {
    algorithm: Algorithm,
    digits: usize,
}

impl CalculationRequest {
    /// Create a request.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: `digits` is outside of `[MIN_DIGITS, MAX_DIGITS]`.
    pub fn new(algorithm: Algorithm, digits: usize) -> Result<Self, Error> {
        let r = CalculationRequest { algorithm, digits };
        r.check()?;
        Ok(r)
    }

    /// Requested algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Requested number of fractional digits.
    pub fn digits(&self) -> usize {
        self.digits
    }

    // a deserialized request bypasses `new`
    fn check(&self) -> Result<(), Error> {
        if (MIN_DIGITS..=MAX_DIGITS).contains(&self.digits) {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "number of digits must be in [{MIN_DIGITS}, {MAX_DIGITS}], got {}",
                self.digits
            )))
        }
    }
}

/// Outcome of a successful calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculationResult {
    /// Algorithm used.
    pub algorithm: Algorithm,

    /// Number of fractional digits.
    pub digits: usize,

    /// "3." followed by exactly `digits` fractional digits.
    pub value: String,

    /// True if two algorithms produced the same digits.
    pub cross_validated: bool,
}

/// Runs calculations with a given configuration.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    cfg: CalcConfig,
}

impl Calculator {
    /// Create a calculator using configuration `cfg`.
    pub fn new(cfg: CalcConfig) -> Self {
        Calculator { cfg }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CalcConfig {
        &self.cfg
    }

    /// Runs `request` reporting progress to `observer`. Neither `complete` nor `error`
    /// of `observer` is called. Returns `None` if the calculation was stopped.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: the number of digits is out of range.
    ///  - ValidationMismatch: the cross-validated algorithms disagree.
    ///  - Integrity: the computed value differs from the reference.
    pub fn try_run(&self, request: &CalculationRequest, observer: &mut dyn Observer) -> Result<Option<CalculationResult>, Error> {
        if observer.is_stopped() {
            return Ok(None);
        }

        request.check()?;

        let digits = request.digits;
        let mut progress = Progress::new(observer);

        let computed = match request.algorithm {
            Algorithm::Machin => machin(digits, &self.cfg, &mut progress, Span::FULL)?,
            Algorithm::BinomialSeries => chudnovsky(digits, &self.cfg, &mut progress, Span::FULL)?,
            Algorithm::CrossValidation => return self.cross_validate(digits, &mut progress),
        };

        let Some(computed) = computed else {
            return Ok(None);
        };

        if progress.is_stopped() {
            return Ok(None);
        }

        let value = present(&computed, digits)?;

        Ok(Some(CalculationResult {
            algorithm: request.algorithm,
            digits,
            value,
            cross_validated: false,
        }))
    }

    /// Runs `request` and notifies `observer` of the outcome: `complete` with the value, or
    /// `error` with the description of the failure. Nothing is notified if the calculation
    /// was stopped.
    pub fn run(&self, request: &CalculationRequest, observer: &mut dyn Observer) -> Option<CalculationResult> {
        if observer.is_stopped() {
            return None;
        }

        match self.try_run(request, observer) {
            Ok(Some(result)) => {
                tracing::info!(algorithm = %result.algorithm, digits = result.digits, cross_validated = result.cross_validated, "calculation completed");
                observer.complete(&result.value);
                Some(result)
            }
            Ok(None) => {
                tracing::debug!(algorithm = %request.algorithm, "calculation stopped");
                None
            }
            Err(e) => {
                tracing::warn!(algorithm = %request.algorithm, error = %e, "calculation failed");
                observer.error(&e.to_string());
                None
            }
        }
    }

    /// Runs the algorithm named `name` for `digits` digits. An unknown name or an invalid
    /// number of digits is reported through `error` of `observer`.
    pub fn run_named(&self, name: &str, digits: usize, observer: &mut dyn Observer) -> Option<CalculationResult> {
        if observer.is_stopped() {
            return None;
        }

        let request = match name.parse::<Algorithm>().and_then(|a| CalculationRequest::new(a, digits)) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(name, digits, error = %e, "calculation rejected");
                observer.error(&e.to_string());
                return None;
            }
        };

        self.run(&request, observer)
    }

    fn cross_validate(&self, digits: usize, progress: &mut Progress<'_>) -> Result<Option<CalculationResult>, Error> {
        let _guard = tracing::debug_span!("cross_validation", digits).entered();

        progress.report(0.05);

        let Some(m) = machin(digits, &self.cfg, progress, Span::new(0.05, 0.5))? else {
            return Ok(None);
        };

        let Some(b) = chudnovsky(digits, &self.cfg, progress, Span::new(0.5, 0.9))? else {
            return Ok(None);
        };

        progress.report(0.9);

        if progress.is_stopped() {
            return Ok(None);
        }

        let machin = round_digits(&m, digits);
        let binomial = round_digits(&b, digits);

        if let Some(position) = first_difference(&machin, &binomial) {
            tracing::warn!(position, "algorithms disagree");
            return Err(Error::ValidationMismatch {
                machin,
                binomial,
                position,
            });
        }

        let value = present(&m, digits)?;

        progress.report(1.0);

        Ok(Some(CalculationResult {
            algorithm: Algorithm::CrossValidation,
            digits,
            value,
            cross_validated: true,
        }))
    }
}
