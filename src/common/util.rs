//! Auxiliary functions.

use crate::common::consts::TEN_POWERS;
use num_bigint::BigUint;
use num_traits::Zero;

/// log10(2)
const LOG10_2: f64 = 0.301_029_995_663_981_2;

/// Returns 10^n.
pub fn pow10(n: u64) -> BigUint {
    match TEN_POWERS.get(n as usize) {
        Some(v) => v.clone(),
        None => BigUint::from(10u32).pow(n as u32),
    }
}

/// Number of decimal digits of `n`. Zero has one digit.
pub fn count_digits(n: &BigUint) -> u64 {
    if n.is_zero() {
        return 1;
    }
    // 2^(bits-1) <= n < 2^bits, so the estimate is off by at most one.
    let est = ((n.bits() - 1) as f64 * LOG10_2) as u64 + 1;
    if *n >= pow10(est) {
        est + 1
    } else {
        est
    }
}

/// Index of the first character at which `a` and `b` differ, or `None` if they are equal.
pub fn first_difference(a: &str, b: &str) -> Option<usize> {
    use itertools::EitherOrBoth;
    use itertools::Itertools;

    a.chars().zip_longest(b.chars()).position(|pair| match pair {
        EitherOrBoth::Both(x, y) => x != y,
        _ => true,
    })
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::random;

    #[test]
    fn test_count_digits() {
        assert_eq!(count_digits(&BigUint::zero()), 1);
        assert_eq!(count_digits(&BigUint::from(9u32)), 1);
        assert_eq!(count_digits(&BigUint::from(10u32)), 2);
        assert_eq!(count_digits(&BigUint::from(99u32)), 2);
        assert_eq!(count_digits(&BigUint::from(100u32)), 3);
        assert_eq!(count_digits(&pow10(250)), 251);
        assert_eq!(count_digits(&(pow10(250) - 1u32)), 250);

        for _ in 0..1000 {
            let n = random::<u64>();
            assert_eq!(count_digits(&BigUint::from(n)), n.to_string().len() as u64);
        }
    }

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), BigUint::from(1u32));
        assert_eq!(pow10(3), BigUint::from(1000u32));
        assert_eq!(pow10(200).to_string().len(), 201);
    }

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("3.1415", "3.1415"), None);
        assert_eq!(first_difference("3.1415", "3.1416"), Some(5));
        assert_eq!(first_difference("3.14", "3.1415"), Some(4));
        assert_eq!(first_difference("", "3"), Some(0));
    }
}
