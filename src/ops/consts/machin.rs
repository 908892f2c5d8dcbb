//! π by Machin's formula: π = 16·arctan(1/5) - 4·arctan(1/239).

use crate::common::consts::FOUR;
use crate::common::consts::SIXTEEN;
use crate::ctx::CalcConfig;
use crate::defs::Error;
use crate::num::Decimal;
use crate::observer::Progress;
use crate::observer::Span;
use crate::ops::series::atan_inv;

/// Computes π for `digits` requested digits with the working precision of `cfg.machin`.
/// Progress is reported within `span`. Returns `None` if the calculation was stopped.
pub fn machin(digits: usize, cfg: &CalcConfig, progress: &mut Progress<'_>, span: Span) -> Result<Option<Decimal>, Error> {
    let ctx = cfg.machin.context_for(digits);
    let (p, rm) = (ctx.precision(), ctx.rounding_mode());

    let _guard = tracing::debug_span!("machin", digits, precision = p).entered();

    progress.report_in(span, 0.1);

    let Some(a5) = atan_inv(5, digits, &ctx, cfg, progress, span.sub(0.1, 0.4))? else {
        return Ok(None);
    };

    progress.report_in(span, 0.5);

    let Some(a239) = atan_inv(239, digits, &ctx, cfg, progress, span.sub(0.5, 0.9))? else {
        return Ok(None);
    };

    let pi = SIXTEEN.mul(&a5, p, rm).sub(&FOUR.mul(&a239, p, rm), p, rm);

    progress.report_in(span, 1.0);

    Ok(Some(pi))
}
