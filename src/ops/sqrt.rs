//! Square root.

use crate::common::consts::TWO;
use crate::ctx::Context;
use crate::defs::Error;
use crate::num::Decimal;

/// Upper bound on Newton iterations.
const MAX_ITER: usize = 1000;

impl Decimal {
    /// Computes the square root of a number with the precision and rounding mode of `ctx`.
    /// The iteration stops once the step is below `10^-(precision - offset)`, scaled by the
    /// magnitude of the root when it is 10 or above.
    ///
    /// ## Errors
    ///
    ///  - Domain: argument is negative.
    pub fn sqrt(&self, ctx: &Context, offset: usize) -> Result<Self, Error> {
        self.sqrt_iterations(ctx, offset).map(|(x, _)| x)
    }

    // square root and the number of Newton iterations performed.
    pub(crate) fn sqrt_iterations(&self, ctx: &Context, offset: usize) -> Result<(Self, usize), Error> {
        if self.is_negative() {
            return Err(Error::Domain);
        }

        if self.is_zero() {
            return Ok((Decimal::zero(), 0));
        }

        let (p, rm) = (ctx.precision(), ctx.rounding_mode());
        let tolerance = offset as i64 - p as i64;

        let mut x = self.round(p, rm);
        let mut iters = 0;

        // Newton's method: x' = (x + v/x) / 2
        loop {
            let q = self.div(&x, p, rm)?;
            let x2 = x.add(&q, p, rm).div(&TWO, p, rm)?;
            let step = x2.sub(&x, p, rm);
            iters += 1;

            let scale = (x2.order() - 1).max(0);
            let done = step.is_zero() || step.is_below_exp10(scale + tolerance) || iters >= MAX_ITER;
            x = x2;

            if done {
                break;
            }
        }

        tracing::debug!(iterations = iters, precision = p, "square root converged");

        Ok((x, iters))
    }
}
