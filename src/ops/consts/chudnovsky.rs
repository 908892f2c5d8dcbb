//! π by the Chudnovsky binomial series:
//! π = 426880·√10005 / Σ (-1)^k (6k)! (A + B·k) / ((3k)! (k!)³ K^(3k)).

use crate::common::consts::C10005;
use crate::common::consts::C426880;
use crate::ctx::CalcConfig;
use crate::defs::Error;
use crate::defs::RoundingMode;
use crate::num::Decimal;
use crate::observer::Progress;
use crate::observer::Span;
use num_bigint::BigInt;
use num_traits::One;
use smallvec::SmallVec;

/// Constant term of the series numerator.
pub const A: u64 = 13591409;

/// Linear coefficient of the series numerator.
pub const B: u64 = 545140134;

/// Base of the power in the series denominator.
pub const K: u64 = 640320;

/// Each term of the series contributes about this many correct digits.
const DIGITS_PER_TERM: usize = 14;

/// Factorials and powers of the series term for index `k`, advanced by multiplying in only
/// the new factors.
#[derive(Debug, Clone)]
pub struct FactorialAccumulators {
    k: u64,
    fact_6k: BigInt,
    fact_3k: BigInt,
    fact_k: BigInt,
    pow_k3k: BigInt,
    k_cubed: BigInt,
}

impl FactorialAccumulators {
    /// Accumulators for k = 0.
    pub fn new() -> Self {
        FactorialAccumulators {
            k: 0,
            fact_6k: BigInt::one(),
            fact_3k: BigInt::one(),
            fact_k: BigInt::one(),
            pow_k3k: BigInt::one(),
            k_cubed: BigInt::from(K).pow(3),
        }
    }

    /// Current index.
    pub fn k(&self) -> u64 {
        self.k
    }

    /// (6k)!
    pub fn fact_6k(&self) -> &BigInt {
        &self.fact_6k
    }

    /// (3k)!
    pub fn fact_3k(&self) -> &BigInt {
        &self.fact_3k
    }

    /// k!
    pub fn fact_k(&self) -> &BigInt {
        &self.fact_k
    }

    /// K^(3k)
    pub fn pow_k3k(&self) -> &BigInt {
        &self.pow_k3k
    }

    /// Moves from `k` to `k + 1`.
    pub fn advance(&mut self) {
        let k = self.k;

        mul_factors(&mut self.fact_6k, &new_factors(6 * k, 6));
        mul_factors(&mut self.fact_3k, &new_factors(3 * k, 3));
        self.fact_k *= k + 1;
        self.pow_k3k *= &self.k_cubed;

        self.k = k + 1;
    }

    /// Signed numerator (-1)^k (6k)! (A + B·k).
    pub fn numerator(&self) -> BigInt {
        let n = &self.fact_6k * BigInt::from(A + B * self.k);
        if self.k & 1 != 0 {
            -n
        } else {
            n
        }
    }

    /// Denominator (3k)! (k!)³ K^(3k).
    pub fn denominator(&self) -> BigInt {
        &self.fact_3k * self.fact_k.pow(3) * &self.pow_k3k
    }
}

impl Default for FactorialAccumulators {
    fn default() -> Self {
        Self::new()
    }
}

// factors start + 1 ..= start + n
fn new_factors(start: u64, n: u64) -> SmallVec<[u64; 6]> {
    (1..=n).map(|i| start + i).collect()
}

fn mul_factors(acc: &mut BigInt, factors: &[u64]) {
    for f in factors {
        *acc *= *f;
    }
}

/// Number of series terms used for `digits` requested digits.
pub fn iteration_cap(digits: usize) -> usize {
    digits / DIGITS_PER_TERM + 5
}

/// Computes π for `digits` requested digits with the working precision of `cfg.binomial`.
/// Progress is reported within `span`. Returns `None` if the calculation was stopped.
pub fn chudnovsky(digits: usize, cfg: &CalcConfig, progress: &mut Progress<'_>, span: Span) -> Result<Option<Decimal>, Error> {
    let ctx = cfg.binomial.context_for(digits);
    let (p, rm) = (ctx.precision(), ctx.rounding_mode());

    let _guard = tracing::debug_span!("binomial", digits, precision = p).entered();

    progress.report_in(span, 0.1);

    let c = C426880.mul(&C10005.sqrt(&ctx, cfg.sqrt_offset)?, p, rm);

    let max_iter = iteration_cap(digits);
    let threshold = -((digits + cfg.binomial_margin) as i64);

    let preview_interval = cfg.preview_interval.max(1);

    let mut acc = FactorialAccumulators::new();
    let mut sum = Decimal::zero();

    for k in 0..max_iter {
        if progress.is_stopped() {
            tracing::debug!(k, "series stopped");
            return Ok(None);
        }

        progress.report_in(span, 0.1 + 0.8 * k as f64 / max_iter as f64);

        let term = Decimal::from(acc.numerator()).div(&Decimal::from(acc.denominator()), p, rm)?;
        sum = sum.add(&term, p, rm);

        if cfg.preview && k % preview_interval == 0 {
            let partial = c.div(&sum, p, rm)?;
            progress.preview(&partial.to_fixed(digits, RoundingMode::ToZero));
        }

        if term.abs().is_below_exp10(threshold) {
            tracing::debug!(terms = k + 1, "series converged");
            break;
        }

        acc.advance();
    }

    let pi = c.div(&sum, p, rm)?;

    progress.report_in(span, 1.0);

    Ok(Some(pi))
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::defs::PI_REFERENCE;
    use crate::observer::NoopObserver;
    use crate::observer::Observer;
    use crate::observer::StopFlag;

    fn factorial(n: u64) -> BigInt {
        (1..=n).fold(BigInt::one(), |acc, i| acc * i)
    }

    #[test]
    fn test_accumulators() {
        let mut acc = FactorialAccumulators::new();
        for k in 0..25u64 {
            assert_eq!(acc.k(), k);
            assert_eq!(*acc.fact_6k(), factorial(6 * k));
            assert_eq!(*acc.fact_3k(), factorial(3 * k));
            assert_eq!(*acc.fact_k(), factorial(k));
            assert_eq!(*acc.pow_k3k(), BigInt::from(K).pow(3 * k as u32));
            acc.advance();
        }

        let acc = FactorialAccumulators::new();
        assert_eq!(acc.numerator(), BigInt::from(A));
        assert_eq!(acc.denominator(), BigInt::one());

        let mut acc = FactorialAccumulators::new();
        acc.advance();
        assert_eq!(acc.numerator(), BigInt::from(-720 * (A + B) as i64));
        assert_eq!(acc.denominator(), BigInt::from(6u64) * BigInt::from(K).pow(3));
        assert_eq!(*acc.fact_6k(), BigInt::from(720));

        acc.advance();
        assert_eq!(*acc.fact_6k(), BigInt::from(479001600u64));
        assert_eq!(acc.numerator(), BigInt::from(479001600u64) * BigInt::from(A + 2 * B));
    }

    #[test]
    fn test_chudnovsky() {
        let cfg = CalcConfig::default();
        for digits in [3, 10, 14, 15, 28, 50, 100] {
            let mut obs = NoopObserver;
            let mut progress = Progress::new(&mut obs);
            let pi = chudnovsky(digits, &cfg, &mut progress, Span::FULL).unwrap().unwrap();
            assert_eq!(pi.to_fixed(digits, RoundingMode::ToZero), &PI_REFERENCE[..digits + 2]);
        }
    }

    #[test]
    fn test_preview_interval() {
        for (interval, expected) in [(1, 12), (4, 3), (100, 1)] {
            let cfg = CalcConfig {
                preview_interval: interval,
                ..CalcConfig::default()
            };
            let mut obs = StopAfter {
                flag: StopFlag::new(),
                previews: 0,
                limit: usize::MAX,
            };
            {
                let mut progress = Progress::new(&mut obs);
                chudnovsky(100, &cfg, &mut progress, Span::FULL).unwrap().unwrap();
            }
            assert_eq!(obs.previews, expected);
        }

        let cfg = CalcConfig {
            preview: false,
            ..CalcConfig::default()
        };
        let mut obs = StopAfter {
            flag: StopFlag::new(),
            previews: 0,
            limit: usize::MAX,
        };
        {
            let mut progress = Progress::new(&mut obs);
            chudnovsky(100, &cfg, &mut progress, Span::FULL).unwrap().unwrap();
        }
        assert_eq!(obs.previews, 0);
    }

    #[test]
    fn test_iteration_cap() {
        assert_eq!(iteration_cap(3), 5);
        assert_eq!(iteration_cap(14), 6);
        assert_eq!(iteration_cap(100), 12);
    }

    struct StopAfter {
        flag: StopFlag,
        previews: usize,
        limit: usize,
    }

    impl Observer for StopAfter {
        fn progress(&mut self, _fraction: f64) {}

        fn digits_update(&mut self, partial: &str) {
            assert!(partial.starts_with("3.14159"));
            self.previews += 1;
            if self.previews >= self.limit {
                self.flag.stop();
            }
        }

        fn complete(&mut self, _result: &str) {}

        fn error(&mut self, _message: &str) {}

        fn is_stopped(&self) -> bool {
            self.flag.is_stopped()
        }
    }

    #[test]
    fn test_stop_keeps_next_run_clean() {
        let cfg = CalcConfig::default();
        let mut obs = StopAfter {
            flag: StopFlag::new(),
            previews: 0,
            limit: 2,
        };
        {
            let mut progress = Progress::new(&mut obs);
            assert!(chudnovsky(80, &cfg, &mut progress, Span::FULL).unwrap().is_none());
        }
        assert_eq!(obs.previews, 2);

        let mut obs = NoopObserver;
        let mut progress = Progress::new(&mut obs);
        let pi = chudnovsky(80, &cfg, &mut progress, Span::FULL).unwrap().unwrap();
        assert_eq!(pi.to_fixed(80, RoundingMode::ToZero), &PI_REFERENCE[..82]);
    }
}
