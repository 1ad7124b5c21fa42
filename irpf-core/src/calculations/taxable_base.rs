//! Taxable base: net employment yield less the statutory reductions.

use rust_decimal::Decimal;

use super::common::{max, round_half_up};
use super::family_situation::qualifying_descendants;
use crate::models::{Dependent, DisabilityDegree};
use crate::tables::NetYieldReduction;

const LARGE_FAMILY_DESCENDANTS: usize = 3;

/// Total reduction of the net yield, excluding the large-family bonus.
///
/// The tapering part is full below `lower_threshold`, decreases linearly up
/// to `upper_threshold` and is zero above it. Geographic mobility doubles
/// the tapering part.
pub fn net_yield_reduction(
    net_yield: Decimal,
    geographic_mobility: bool,
    disability: Option<DisabilityDegree>,
    table: &NetYieldReduction,
) -> Decimal {
    let tapering = if net_yield < table.lower_threshold {
        table.additional
    } else if net_yield < table.upper_threshold {
        table.additional - table.taper_coefficient * (net_yield - table.lower_threshold)
    } else {
        Decimal::ZERO
    };
    let mobility = if geographic_mobility {
        tapering
    } else {
        Decimal::ZERO
    };
    let disability = disability.map_or(Decimal::ZERO, |degree| table.disability(degree));

    table.common + tapering + mobility + disability
}

/// Computes the taxable base, floored at zero and rounded to cents.
pub fn taxable_base(
    children: &[Dependent],
    gross_annual: Decimal,
    annual_contribution: Decimal,
    geographic_mobility: bool,
    disability: Option<DisabilityDegree>,
    table: &NetYieldReduction,
) -> Decimal {
    let net_yield = gross_annual - annual_contribution;
    let mut reduction = net_yield_reduction(net_yield, geographic_mobility, disability, table);
    if qualifying_descendants(children) >= LARGE_FAMILY_DESCENDANTS {
        reduction += table.large_family;
    }
    round_half_up(max(net_yield - reduction, Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::tables::TABLES;

    fn table() -> &'static NetYieldReduction {
        &TABLES.net_yield_reduction
    }

    // =========================================================================
    // net_yield_reduction tests
    // =========================================================================

    #[test]
    fn reduction_is_full_below_lower_threshold() {
        let result = net_yield_reduction(dec!(11249.99), false, None, table());

        assert_eq!(result, dec!(5700));
    }

    #[test]
    fn reduction_tapers_between_thresholds() {
        let result = net_yield_reduction(dec!(12000), false, None, table());

        // 2000 + 3700 - 1.15625 * 750
        assert_eq!(result, dec!(4832.8125));
    }

    #[test]
    fn reduction_is_common_only_above_upper_threshold() {
        let result = net_yield_reduction(dec!(14450), false, None, table());

        assert_eq!(result, dec!(2000));
    }

    #[test]
    fn geographic_mobility_doubles_tapering_part() {
        let result = net_yield_reduction(dec!(12000), true, None, table());

        assert_eq!(result, dec!(7665.625));
    }

    #[test]
    fn geographic_mobility_adds_nothing_above_upper_threshold() {
        let result = net_yield_reduction(dec!(28095), true, None, table());

        assert_eq!(result, dec!(2000));
    }

    #[test]
    fn disability_adds_flat_increment_by_degree() {
        let moderate =
            net_yield_reduction(dec!(28095), false, Some(DisabilityDegree::Moderate), table());
        let severe =
            net_yield_reduction(dec!(28095), false, Some(DisabilityDegree::Severe), table());

        assert_eq!(moderate, dec!(5500));
        assert_eq!(severe, dec!(9750));
    }

    // =========================================================================
    // taxable_base tests
    // =========================================================================

    #[test]
    fn taxable_base_subtracts_contribution_and_reduction() {
        let result = taxable_base(&[], dec!(30000), dec!(1905), false, None, table());

        assert_eq!(result, dec!(26095.00));
    }

    #[test]
    fn taxable_base_rounds_to_cents() {
        let result = taxable_base(&[], dec!(12000), dec!(1117.473), false, None, table());

        assert_eq!(result, dec!(5182.53));
    }

    #[test]
    fn taxable_base_is_floored_at_zero() {
        let result = taxable_base(
            &[],
            dec!(6000),
            dec!(1117.473),
            false,
            Some(DisabilityDegree::Severe),
            table(),
        );

        assert_eq!(result, dec!(0));
    }

    #[test]
    fn large_family_reduces_base() {
        let children = [Dependent::new(2), Dependent::new(8), Dependent::new(30)];
        let large = [Dependent::new(2), Dependent::new(8), Dependent::new(20)];

        let two_qualifying = taxable_base(&children, dec!(30000), dec!(1905), false, None, table());
        let three_qualifying = taxable_base(&large, dec!(30000), dec!(1905), false, None, table());

        assert_eq!(two_qualifying, dec!(26095.00));
        assert_eq!(three_qualifying, dec!(25495.00));
    }
}
