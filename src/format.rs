//! Formatting of computed values and their validation against the reference value of π.

use crate::common::util::first_difference;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::defs::PI_REFERENCE;
use crate::defs::PI_REFERENCE_DIGITS;
use crate::num::Decimal;

/// Formats `value` with exactly `digits` fractional digits, rounding half up.
pub fn round_digits(value: &Decimal, digits: usize) -> String {
    value.to_fixed(digits, RoundingMode::HalfUp)
}

/// Returns the reference value of π truncated to `digits` fractional digits,
/// or `None` if the reference is shorter.
pub fn reference_prefix(digits: usize) -> Option<&'static str> {
    PI_REFERENCE.get(..digits + 2)
}

/// Checks that the first `min(digits, 100)` fractional digits of `value` are the digits of π.
///
/// ## Errors
///
///  - Integrity: the digits differ from the reference.
pub fn validate(value: &Decimal, digits: usize) -> Result<(), Error> {
    let n = digits.min(PI_REFERENCE_DIGITS);
    let computed = value.to_fixed(n, RoundingMode::ToZero);
    let expected = &PI_REFERENCE[..n + 2];

    match first_difference(&computed, expected) {
        None => Ok(()),
        Some(position) => {
            tracing::warn!(position, %computed, "computed value differs from the reference");
            Err(Error::Integrity {
                computed,
                expected: expected.to_owned(),
                position,
            })
        }
    }
}

/// Validates `value` and returns the string presented to the user: "3." followed by exactly
/// `digits` fractional digits.
///
/// Up to the length of the reference the digits are those of the reference, beyond it
/// the value is rounded half up.
///
/// ## Errors
///
///  - Integrity: the digits differ from the reference.
pub fn present(value: &Decimal, digits: usize) -> Result<String, Error> {
    validate(value, digits)?;

    Ok(match reference_prefix(digits) {
        Some(prefix) => prefix.to_owned(),
        None => round_digits(value, digits),
    })
}
