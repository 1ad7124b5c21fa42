//! Quota of the withholding scale for a liquidable base.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::TaxBracket;

/// Finds the bracket whose `[min_base, max_base)` interval contains `amount`.
pub fn bracket_for(
    amount: Decimal,
    brackets: &[TaxBracket],
) -> Option<&TaxBracket> {
    brackets.iter().find(|bracket| bracket.contains(amount))
}

/// Scale quota: the bracket's base quota plus the marginal rate applied to
/// the part of `amount` above the bracket's lower bound.
///
/// Amounts outside every bracket (only negative ones with a scale starting
/// at zero) are charged with the first bracket.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use irpf_core::calculations::liability::liability;
/// use irpf_core::TABLES;
///
/// // 4225.50 + (26095 - 20200) * 0.30
/// assert_eq!(liability(dec!(26095), TABLES.brackets), dec!(5994.00));
/// ```
pub fn liability(
    amount: Decimal,
    brackets: &[TaxBracket],
) -> Decimal {
    let bracket = match bracket_for(amount, brackets) {
        Some(bracket) => bracket,
        None => {
            warn!(
                amount = %amount,
                "Amount outside the withholding scale; using the first bracket"
            );
            match brackets.first() {
                Some(first) => first,
                None => return Decimal::ZERO,
            }
        }
    };
    bracket.base_quota + (amount - bracket.min_base) * bracket.rate
}
