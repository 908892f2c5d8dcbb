//! Computes decimal digits of π with two independent algorithms and cross-checks them.
//!
//! Algorithms:
//!
//! | Name               | Method                                      | Working precision      |
//! |:-------------------|:--------------------------------------------|:-----------------------|
//! | `machin`           | 16·arctan(1/5) - 4·arctan(1/239)            | max(d + 200, 500)      |
//! | `binomial-series`  | Chudnovsky series, C = 426880·√10005        | max(d + 300, 600)      |
//! | `cross-validation` | both of the above, digits must be identical | as above               |
//!
//! Every result is validated against 100 stored digits of π before it is reported.
//!
//! ## Examples
//!
//! ```
//! use pi_digits::{Algorithm, CalculationRequest, Calculator, NoopObserver};
//!
//! let calc = Calculator::default();
//! let req = CalculationRequest::new(Algorithm::CrossValidation, 10).unwrap();
//!
//! let result = calc.run(&req, &mut NoopObserver).unwrap();
//!
//! assert_eq!(result.value, "3.1415926535");
//! assert!(result.cross_validated);
//! ```
//!
//! A calculation reports its progress through the [`Observer`] trait and can be stopped at any time.
//! A stopped calculation calls neither `complete` nor `error`.
//! [`Worker`] runs a calculation on a dedicated thread.

#![deny(missing_docs)]
#![deny(clippy::suspicious)]

mod common;
mod defs;
mod num;
mod ops;

#[cfg(feature = "serde")]
mod for_3rd;

pub mod calc;
pub mod ctx;
pub mod format;
pub mod observer;
pub mod worker;

pub use crate::defs::Error;
pub use crate::defs::RoundingMode;
pub use crate::defs::Sign;
pub use crate::defs::DEFAULT_RM;
pub use crate::defs::MAX_DIGITS;
pub use crate::defs::MIN_DIGITS;
pub use crate::defs::PI_REFERENCE;
pub use crate::defs::PI_REFERENCE_DIGITS;

pub use crate::num::Decimal;

pub use crate::calc::Algorithm;
pub use crate::calc::CalculationRequest;
pub use crate::calc::CalculationResult;
pub use crate::calc::Calculator;
pub use crate::ctx::CalcConfig;
pub use crate::ctx::Context;
pub use crate::ctx::PrecisionBudget;
pub use crate::observer::NoopObserver;
pub use crate::observer::Observer;
pub use crate::observer::Progress;
pub use crate::observer::Span;
pub use crate::observer::StopFlag;
pub use crate::worker::ChannelObserver;
pub use crate::worker::Event;
pub use crate::worker::Worker;

pub use crate::ops::consts::chudnovsky;
pub use crate::ops::consts::machin;
pub use crate::ops::consts::FactorialAccumulators;
pub use crate::ops::series::atan_inv;
pub use crate::ops::series::series_run;
pub use crate::ops::series::SeriesLimits;
pub use crate::ops::series::SeriesState;
pub use crate::ops::series::SeriesTerms;
