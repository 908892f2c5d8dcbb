//! Decimal number of arbitrary precision.
//!
//! A value is stored as `m * 10^e`, where `m` is an integer of any size.
//! Arithmetic operations receive the precision `p`, the number of significant decimal digits
//! of the result, and the rounding mode.

use crate::common::util::count_digits;
use crate::common::util::pow10;
use crate::defs::Error;
use crate::defs::RoundingMode;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use num_bigint::BigInt;
use num_bigint::BigUint;
use num_bigint::Sign as IntSign;
use num_integer::Integer;
use num_traits::Signed;
use num_traits::Zero;

/// Decimal number `m * 10^e`.
#[derive(Clone, Debug)]
pub struct Decimal {
    m: BigInt,
    e: i64,
}

impl Decimal {
    /// Returns zero.
    pub fn zero() -> Self {
        Decimal {
            m: BigInt::zero(),
            e: 0,
        }
    }

    /// Constructs a number from an unsigned integer.
    pub fn from_u64(v: u64) -> Self {
        Decimal {
            m: BigInt::from(v),
            e: 0,
        }
    }

    /// Constructs a number from a signed integer.
    pub fn from_i64(v: i64) -> Self {
        Decimal {
            m: BigInt::from(v),
            e: 0,
        }
    }

    fn from_parts(s: IntSign, mag: BigUint, e: i64) -> Self {
        Decimal {
            m: BigInt::from_biguint(s, mag),
            e,
        }
    }

    /// Returns true if the number is zero.
    pub fn is_zero(&self) -> bool {
        self.m.is_zero()
    }

    /// Returns true if the number is less than zero.
    pub fn is_negative(&self) -> bool {
        self.m.is_negative()
    }

    /// Changes the sign of the number to the opposite.
    pub fn inv_sign(&mut self) {
        self.m = -core::mem::take(&mut self.m);
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        Decimal {
            m: self.m.abs(),
            e: self.e,
        }
    }

    /// Number of significant digits stored in the mantissa.
    pub fn digits(&self) -> u64 {
        count_digits(self.m.magnitude())
    }

    /// The smallest `k` such that `|self| < 10^k`.
    /// For zero returns `i64::MIN`.
    pub fn order(&self) -> i64 {
        if self.m.is_zero() {
            i64::MIN
        } else {
            self.digits() as i64 + self.e
        }
    }

    /// Returns true if `|self| < 10^k`.
    pub fn is_below_exp10(&self, k: i64) -> bool {
        self.order() <= k
    }

    /// Returns the number rounded to `p` significant digits.
    pub fn round(&self, p: usize, rm: RoundingMode) -> Self {
        if self.m.is_zero() {
            return self.clone();
        }

        let p = p.max(1) as u64;
        let n = self.digits();
        if n <= p {
            return self.clone();
        }

        let drop = n - p;
        let mut e = self.e + drop as i64;
        let mut mag = round_mag(self.m.magnitude(), drop, rm);

        // carry turned 99..9 into 100..0
        if mag == pow10(p) {
            mag = pow10(p - 1);
            e += 1;
        }

        Self::from_parts(self.m.sign(), mag, e)
    }

    /// Returns the number rounded to a multiple of `10^exp`.
    pub fn round_at(&self, exp: i64, rm: RoundingMode) -> Self {
        if self.e >= exp {
            return self.clone();
        }

        let drop = (exp - self.e) as u64;
        let mag = round_mag(self.m.magnitude(), drop, rm);

        Self::from_parts(self.m.sign(), mag, exp)
    }

    // mantissa of the number represented with exponent `e`, e <= self.e.
    fn scaled_mantissa(&self, e: i64) -> BigInt {
        debug_assert!(e <= self.e);
        if self.e == e {
            self.m.clone()
        } else {
            &self.m * BigInt::from(pow10((self.e - e) as u64))
        }
    }

    fn add_sub(&self, d2: &Self, negate: bool, p: usize, rm: RoundingMode) -> Self {
        if d2.m.is_zero() {
            return self.round(p, rm);
        }

        if self.m.is_zero() {
            let mut ret = d2.round(p, rm);
            if negate {
                ret.inv_sign();
            }
            return ret;
        }

        let e = self.e.min(d2.e);
        let m1 = self.scaled_mantissa(e);
        let m2 = d2.scaled_mantissa(e);
        let m = if negate { m1 - m2 } else { m1 + m2 };

        Decimal { m, e }.round(p, rm)
    }

    /// Adds `d2` to `self` and returns the result rounded to `p` digits.
    pub fn add(&self, d2: &Self, p: usize, rm: RoundingMode) -> Self {
        self.add_sub(d2, false, p, rm)
    }

    /// Subtracts `d2` from `self` and returns the result rounded to `p` digits.
    pub fn sub(&self, d2: &Self, p: usize, rm: RoundingMode) -> Self {
        self.add_sub(d2, true, p, rm)
    }

    /// Multiplies `self` by `d2` and returns the result rounded to `p` digits.
    pub fn mul(&self, d2: &Self, p: usize, rm: RoundingMode) -> Self {
        Decimal {
            m: &self.m * &d2.m,
            e: self.e + d2.e,
        }
        .round(p, rm)
    }

    /// Divides `self` by `d2` and returns the result rounded to `p` digits.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `d2` is zero.
    pub fn div(&self, d2: &Self, p: usize, rm: RoundingMode) -> Result<Self, Error> {
        if d2.m.is_zero() {
            return Err(Error::DivisionByZero);
        }

        if self.m.is_zero() {
            return Ok(Self::zero());
        }

        let p = p.max(1);
        let n1 = self.digits() as i64;
        let n2 = d2.digits() as i64;

        // the quotient of mantissas gets at least p + 1 digits
        let shift = (p as i64 + 1 + n2 - n1).max(0) as u64;
        let num = self.m.magnitude() * pow10(shift);
        let (q, r) = num.div_rem(d2.m.magnitude());

        let mut e = self.e - d2.e - shift as i64;

        // sticky digit separates an inexact quotient from a tie
        let q = if r.is_zero() {
            q
        } else {
            e -= 1;
            q * 10u32 + 1u32
        };

        let s = if self.m.sign() == d2.m.sign() {
            IntSign::Plus
        } else {
            IntSign::Minus
        };

        Ok(Self::from_parts(s, q, e).round(p, rm))
    }

    /// Raises `self` to the integer power `n` and returns the result rounded to `p` digits.
    pub fn pow(&self, n: u32, p: usize, rm: RoundingMode) -> Self {
        Decimal {
            m: self.m.pow(n),
            e: self.e * n as i64,
        }
        .round(p, rm)
    }

    /// Formats the number with exactly `frac` digits after the decimal point.
    pub fn to_fixed(&self, frac: usize, rm: RoundingMode) -> String {
        let exp = -(frac as i64);
        let m = self.round_at(exp, rm).scaled_mantissa_at_least(exp);
        let digits = m.magnitude().to_string();

        let mut ret = String::with_capacity(digits.len() + 3);
        if m.is_negative() {
            ret.push('-');
        }

        if digits.len() > frac {
            let (int, fract) = digits.split_at(digits.len() - frac);
            ret.push_str(int);
            if frac > 0 {
                ret.push('.');
                ret.push_str(fract);
            }
        } else {
            ret.push('0');
            if frac > 0 {
                ret.push('.');
                ret.extend(core::iter::repeat('0').take(frac - digits.len()));
                ret.push_str(&digits);
            }
        }

        ret
    }

    // mantissa at exponent `e` for a number with self.e >= e.
    fn scaled_mantissa_at_least(&self, e: i64) -> BigInt {
        if self.m.is_zero() {
            BigInt::zero()
        } else {
            self.scaled_mantissa(e)
        }
    }
}

// rounds `mag` dropping the `drop` least significant digits.
fn round_mag(mag: &BigUint, drop: u64, rm: RoundingMode) -> BigUint {
    if drop == 0 {
        return mag.clone();
    }

    let d = pow10(drop);
    let (q, r) = mag.div_rem(&d);
    let r2 = r * 2u32;

    let up = match rm {
        RoundingMode::ToZero => false,
        RoundingMode::HalfUp => r2 >= d,
    };

    if up {
        q + 1u32
    } else {
        q
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.m.is_zero() || other.m.is_zero() || self.m.sign() != other.m.sign() {
            return self.m.sign().cmp(&other.m.sign());
        }
        let e = self.e.min(other.e);
        self.scaled_mantissa(e).cmp(&other.scaled_mantissa(e))
    }
}

impl From<BigInt> for Decimal {
    fn from(m: BigInt) -> Self {
        Decimal { m, e: 0 }
    }
}

impl From<u64> for Decimal {
    fn from(v: u64) -> Self {
        Decimal::from_u64(v)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frac = if self.e < 0 { self.e.unsigned_abs() as usize } else { 0 };
        f.write_str(&self.to_fixed(frac, RoundingMode::ToZero))
    }
}

impl FromStr for Decimal {
    type Err = Error;

    /// Parses a plain or scientific decimal string, e.g. `-12.5`, `1e-30`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument(format!("not a decimal number: {s:?}"));

        let s = s.trim();
        let (mant, exp) = match s.find(|c| c == 'e' || c == 'E') {
            Some(pos) => {
                let exp = s[pos + 1..].parse::<i64>().map_err(|_| invalid())?;
                (&s[..pos], exp)
            }
            None => (s, 0),
        };

        let (neg, mant) = match mant.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mant.strip_prefix('+').unwrap_or(mant)),
        };

        let (int, fract) = match mant.split_once('.') {
            Some((int, fract)) => (int, fract),
            None => (mant, ""),
        };

        let is_digits = |v: &str| v.bytes().all(|b| b.is_ascii_digit());
        if (int.is_empty() && fract.is_empty()) || !is_digits(int) || !is_digits(fract) {
            return Err(invalid());
        }

        let mut buf = String::with_capacity(int.len() + fract.len());
        buf.push_str(int);
        buf.push_str(fract);

        let mag = BigUint::parse_bytes(buf.as_bytes(), 10).ok_or_else(invalid)?;
        let s = if neg { IntSign::Minus } else { IntSign::Plus };

        Ok(Self::from_parts(s, mag, exp - fract.len() as i64))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::random;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(d("3.14").to_string(), "3.14");
        assert_eq!(d("-0.0025").to_string(), "-0.0025");
        assert_eq!(d("1e-5").to_string(), "0.00001");
        assert_eq!(d("12E2").to_string(), "1200");
        assert_eq!(d("+7").to_string(), "7");
        assert_eq!(d(".5").to_string(), "0.5");
        assert_eq!(Decimal::zero().to_string(), "0");

        assert!("".parse::<Decimal>().is_err());
        assert!("3.1.4".parse::<Decimal>().is_err());
        assert!("1e".parse::<Decimal>().is_err());
        assert!("abc".parse::<Decimal>().is_err());
        assert!("-".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_rounding() {
        let rm = RoundingMode::HalfUp;
        assert_eq!(d("2.5").round(1, rm), d("3"));
        assert_eq!(d("-2.5").round(1, rm), d("-3"));
        assert_eq!(d("2.49").round(1, rm), d("2"));
        assert_eq!(d("9.96").round(2, rm), d("10"));
        assert_eq!(d("9.96").round(2, rm).digits(), 2);

        let rm = RoundingMode::ToZero;
        assert_eq!(d("2.99").round(1, rm), d("2"));
        assert_eq!(d("-2.99").round(1, rm), d("-2"));
        assert_eq!(d("1.23456").round(6, rm), d("1.23456"));
    }

    #[test]
    fn test_add_sub_mul() {
        let p = 10;
        let rm = RoundingMode::HalfUp;

        assert_eq!(d("1.5").add(&d("2.25"), p, rm), d("3.75"));
        assert_eq!(d("1.5").sub(&d("2.25"), p, rm), d("-0.75"));
        assert_eq!(d("0").sub(&d("2.25"), p, rm), d("-2.25"));
        assert_eq!(d("1e10").add(&d("1e-10"), p, rm), d("1e10"));
        assert_eq!(d("1e10").add(&d("1e-10"), 21, rm), d("10000000000.0000000001"));
        assert_eq!(d("1.5").mul(&d("-1.5"), p, rm), d("-2.25"));
        assert_eq!(d("1.5").mul(&d("1.5"), 2, rm), d("2.3"));
        assert_eq!(d("16").mul(&d("0"), p, rm), Decimal::zero());
    }

    #[test]
    fn test_div() {
        let rm = RoundingMode::HalfUp;

        assert_eq!(d("1").div(&d("3"), 10, rm).unwrap(), d("0.3333333333"));
        assert_eq!(d("2").div(&d("3"), 10, rm).unwrap(), d("0.6666666667"));
        assert_eq!(d("-2").div(&d("3"), 10, rm).unwrap(), d("-0.6666666667"));
        assert_eq!(d("1").div(&d("8"), 2, rm).unwrap(), d("0.13"));
        assert_eq!(d("1").div(&d("239"), 5, rm).unwrap(), d("0.0041841"));
        assert_eq!(d("10").div(&d("4"), 10, rm).unwrap(), d("2.5"));
        assert_eq!(d("2").div(&d("3"), 10, RoundingMode::ToZero).unwrap(), d("0.6666666666"));
        assert_eq!(d("1").div(&d("0"), 10, rm).unwrap_err(), Error::DivisionByZero);
        assert_eq!(d("0").div(&d("7"), 10, rm).unwrap(), Decimal::zero());

        // exact division restores the operand
        for _ in 0..1000 {
            let a = Decimal::from_u64(random::<u64>());
            let b = Decimal::from_u64(random::<u64>() | 1);
            let ab = a.mul(&b, 100, rm);
            assert_eq!(ab.div(&b, 100, rm).unwrap(), a);
        }
    }

    #[test]
    fn test_pow() {
        let rm = RoundingMode::HalfUp;
        assert_eq!(d("640320").pow(3, 100, rm), d("262537412640768000"));
        assert_eq!(d("0.2").pow(3, 100, rm), d("0.008"));
        assert_eq!(d("2").pow(10, 2, rm), d("1000"));
    }

    #[test]
    fn test_order() {
        assert_eq!(d("0.00123").order(), -2);
        assert_eq!(d("999").order(), 3);
        assert_eq!(d("1000").order(), 4);
        assert!(d("0.0009").is_below_exp10(-3));
        assert!(!d("0.001").is_below_exp10(-3));
        assert!(Decimal::zero().is_below_exp10(-1000));
    }

    #[test]
    fn test_to_fixed() {
        let rm = RoundingMode::HalfUp;
        assert_eq!(d("3.14159").to_fixed(4, rm), "3.1416");
        assert_eq!(d("3.14159").to_fixed(4, RoundingMode::ToZero), "3.1415");
        assert_eq!(d("3.14159").to_fixed(8, rm), "3.14159000");
        assert_eq!(d("0.0042").to_fixed(3, rm), "0.004");
        assert_eq!(d("0.0042").to_fixed(6, rm), "0.004200");
        assert_eq!(d("-1.005").to_fixed(2, rm), "-1.01");
        assert_eq!(d("2.5").to_fixed(0, rm), "3");
        assert_eq!(Decimal::zero().to_fixed(3, rm), "0.000");
    }

    #[test]
    fn test_cmp() {
        assert!(d("1.5") > d("1.49"));
        assert!(d("-1.5") < d("-1.49"));
        assert!(d("-1") < d("0"));
        assert!(d("0") < d("1e-100"));
        assert_eq!(d("1.50"), d("1.5"));
        assert_eq!(d("-3").abs(), d("3"));

        let mut n = d("2");
        n.inv_sign();
        assert!(n.is_negative());
        assert_eq!(n, d("-2"));
    }
}
