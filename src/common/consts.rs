//! Static constants.

use crate::num::Decimal;
use lazy_static::lazy_static;
use num_bigint::BigUint;

/// Number of cached powers of ten.
const TEN_POWERS_LEN: u32 = 128;

lazy_static! {

    /// 10^0 .. 10^127
    pub(crate) static ref TEN_POWERS: Vec<BigUint> = (0..TEN_POWERS_LEN).map(|n| BigUint::from(10u32).pow(n)).collect();

    /// 1
    pub(crate) static ref ONE: Decimal = Decimal::from_u64(1);

    /// 2
    pub(crate) static ref TWO: Decimal = Decimal::from_u64(2);

    /// 4
    pub(crate) static ref FOUR: Decimal = Decimal::from_u64(4);

    /// 16
    pub(crate) static ref SIXTEEN: Decimal = Decimal::from_u64(16);

    /// 426880
    pub(crate) static ref C426880: Decimal = Decimal::from_u64(426880);

    /// 10005
    pub(crate) static ref C10005: Decimal = Decimal::from_u64(10005);
}
