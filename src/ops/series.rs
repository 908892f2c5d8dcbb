//! Alternating series computation appliance.

use crate::common::consts::ONE;
use crate::ctx::CalcConfig;
use crate::ctx::Context;
use crate::defs::Error;
use crate::defs::Sign;
use crate::num::Decimal;
use crate::observer::Progress;
use crate::observer::Span;

//
// Public part
//

/// Generator of series terms.
pub trait SeriesTerms {
    /// Returns the magnitude of the term with index 0.
    fn first(&mut self, ctx: &Context) -> Result<Decimal, Error>;

    /// Returns the magnitude of the term with index `k + 1`.
    fn next(&mut self, k: usize, ctx: &Context) -> Result<Decimal, Error>;

    /// Estimated number of terms until convergence.
    fn estimated_terms(&self) -> usize;
}

/// Stop conditions of a series run.
#[derive(Debug, Clone, Copy)]
pub struct SeriesLimits {
    /// The run stops once the next term is below 10^threshold.
    pub threshold: i64,

    /// Maximum number of terms.
    pub max_terms: usize,

    /// Number of iterations between two progress reports.
    pub progress_interval: usize,
}

/// State of a series run.
#[derive(Debug, Clone)]
pub struct SeriesState {
    /// Partial sum.
    pub sum: Decimal,

    /// Magnitude of the term to add next.
    pub term: Decimal,

    /// Index of `term`.
    pub index: usize,

    /// Sign of `term`.
    pub sign: Sign,
}

impl SeriesState {
    fn new(first: Decimal) -> Self {
        SeriesState {
            sum: Decimal::zero(),
            term: first,
            index: 0,
            sign: Sign::Pos,
        }
    }

    fn accumulate(&mut self, ctx: &Context) {
        let (p, rm) = (ctx.precision(), ctx.rounding_mode());
        self.sum = if self.sign.is_positive() {
            self.sum.add(&self.term, p, rm)
        } else {
            self.sum.sub(&self.term, p, rm)
        };
    }

    fn advance(&mut self, next: Decimal) {
        self.term = next;
        self.index += 1;
        self.sign = self.sign.invert();
    }
}

/// Sums the alternating series `t0 - t1 + t2 - ...` produced by `gen`.
///
/// Terms are added until the next one is below `10^limits.threshold` or `limits.max_terms`
/// terms were added. The returned state holds the sum and the first term not added.
/// Returns `None` if the calculation was stopped.
pub fn series_run<T: SeriesTerms>(
    gen: &mut T,
    ctx: &Context,
    limits: &SeriesLimits,
    progress: &mut Progress<'_>,
    span: Span,
) -> Result<Option<SeriesState>, Error> {
    let mut state = SeriesState::new(gen.first(ctx)?);
    let expected = gen.estimated_terms().max(1) as f64;
    let interval = limits.progress_interval.max(1);

    loop {
        if progress.is_stopped() {
            tracing::debug!(index = state.index, "series stopped");
            return Ok(None);
        }

        if state.index % interval == 0 {
            progress.report_in(span, state.index as f64 / expected);
        }

        state.accumulate(ctx);

        let next = gen.next(state.index, ctx)?;
        state.advance(next);

        if state.term.is_below_exp10(limits.threshold) {
            break;
        }

        if state.index >= limits.max_terms {
            tracing::warn!(terms = state.index, "series reached the iteration cap before convergence");
            break;
        }
    }

    tracing::debug!(terms = state.index, "series converged");
    progress.report_in(span, 1.0);

    Ok(Some(state))
}

/// Computes arctan(1/n) with terms down to 10^-(digits + cfg.arctan_margin).
/// Returns the final series state, or `None` if the calculation was stopped.
pub fn atan_inv_series(
    n: u64,
    digits: usize,
    ctx: &Context,
    cfg: &CalcConfig,
    progress: &mut Progress<'_>,
    span: Span,
) -> Result<Option<SeriesState>, Error> {
    let threshold = digits + cfg.arctan_margin;
    let mut gen = AtanTerms::new(n, threshold, ctx)?;
    let limits = SeriesLimits {
        threshold: -(threshold as i64),
        max_terms: (ctx.precision() + 100).max(digits * 10),
        progress_interval: cfg.progress_interval,
    };

    series_run(&mut gen, ctx, &limits, progress, span)
}

/// Computes arctan(1/n). Returns `None` if the calculation was stopped.
pub fn atan_inv(
    n: u64,
    digits: usize,
    ctx: &Context,
    cfg: &CalcConfig,
    progress: &mut Progress<'_>,
    span: Span,
) -> Result<Option<Decimal>, Error> {
    Ok(atan_inv_series(n, digits, ctx, cfg, progress, span)?.map(|s| s.sum))
}

//
// Private part
//

// Terms x^(2k+1) / (2k+1) of arctan(x), x = 1/n.
struct AtanTerms {
    x_pow: Decimal,
    x2: Decimal,
    expected: usize,
}

impl AtanTerms {
    fn new(n: u64, threshold: usize, ctx: &Context) -> Result<Self, Error> {
        let (p, rm) = (ctx.precision(), ctx.rounding_mode());
        let x = ONE.div(&Decimal::from_u64(n), p, rm)?;
        let x2 = x.mul(&x, p, rm);

        // each term is about 2*log10(n) digits smaller than the previous one
        let expected = (threshold as f64 / (2.0 * (n.max(2) as f64).log10())).ceil() as usize + 1;

        Ok(AtanTerms {
            x_pow: x,
            x2,
            expected,
        })
    }
}

impl SeriesTerms for AtanTerms {
    fn first(&mut self, _ctx: &Context) -> Result<Decimal, Error> {
        Ok(self.x_pow.clone())
    }

    fn next(&mut self, k: usize, ctx: &Context) -> Result<Decimal, Error> {
        let (p, rm) = (ctx.precision(), ctx.rounding_mode());
        self.x_pow = self.x_pow.mul(&self.x2, p, rm);
        self.x_pow.div(&Decimal::from_u64(2 * k as u64 + 3), p, rm)
    }

    fn estimated_terms(&self) -> usize {
        self.expected
    }
}
