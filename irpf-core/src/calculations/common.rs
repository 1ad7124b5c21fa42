//! Rounding rules shared by the payroll calculations.
//!
//! Money is rounded to cents, half away from zero. Withholding rates are
//! floored to four decimals, so a rate never rounds up into a higher
//! withholding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to cents; a trailing 5 rounds away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use irpf_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(4937.995)), dec!(4938.00));
/// assert_eq!(round_half_up(dec!(4937.994)), dec!(4937.99));
/// assert_eq!(round_half_up(dec!(-12.345)), dec!(-12.35));
/// ```
pub fn round_half_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a withholding rate to four decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use irpf_core::calculations::common::truncate_rate;
///
/// assert_eq!(truncate_rate(dec!(0.16465)), dec!(0.1646));
/// assert_eq!(truncate_rate(dec!(0.16469999)), dec!(0.1646));
/// ```
pub fn truncate_rate(rate: Decimal) -> Decimal {
    rate.round_dp_with_strategy(4, RoundingStrategy::ToNegativeInfinity)
}

pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    a.max(b)
}
