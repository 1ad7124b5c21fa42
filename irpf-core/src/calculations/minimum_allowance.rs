//! Personal and family minimum.
//!
//! The minimum is the sum of eight independent terms. Descendant terms are
//! halved unless the taxpayer has exclusive custody; ascendant terms are
//! split between everyone entitled to them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::common::round_half_up;
use super::family_situation::qualifying_descendants;
use crate::models::{Dependent, DisabilityDegree, TaxpayerProfile};
use crate::tables::{
    AscendantMinimum, DescendantMinimum, DisabilityMinimum, MinimumTables, PersonalMinimum,
};

/// The eight terms of the personal and family minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MinimumAllowance {
    pub personal: Decimal,
    pub descendants: Decimal,
    pub descendants_under_3: Decimal,
    pub ascendants_65_to_74: Decimal,
    pub ascendants_over_75: Decimal,
    pub descendant_disability: Decimal,
    pub ascendant_disability: Decimal,
    pub taxpayer_disability: Decimal,
}

impl MinimumAllowance {
    /// Sum of all terms, rounded to cents.
    pub fn total(&self) -> Decimal {
        round_half_up(
            self.personal
                + self.descendants
                + self.descendants_under_3
                + self.ascendants_65_to_74
                + self.ascendants_over_75
                + self.descendant_disability
                + self.ascendant_disability
                + self.taxpayer_disability,
        )
    }
}

/// Computes every term of the minimum for a profile.
pub fn minimum_allowance(
    profile: &TaxpayerProfile,
    tables: &MinimumTables,
) -> MinimumAllowance {
    let children = &profile.children;
    let ascendants = &profile.ascendants;
    let custody = profile.exclusive_custody;
    let sharers = profile.ascendant_sharing_count;

    let under_3 = children.iter().filter(|child| child.age < 3).count();
    let ascendants_65_to_74 = ascendants
        .iter()
        .filter(|asc| (asc.age >= 65 || asc.is_disabled()) && asc.age < 75)
        .count();
    let ascendants_over_75 = ascendants.iter().filter(|asc| asc.age >= 75).count();

    MinimumAllowance {
        personal: personal_minimum(profile.age, &tables.personal),
        descendants: descendant_minimum(
            qualifying_descendants(children),
            custody,
            &tables.descendants,
        ),
        descendants_under_3: under_3_minimum(under_3, custody, &tables.descendants),
        ascendants_65_to_74: ascendant_minimum_65_to_74(
            ascendants_65_to_74,
            sharers,
            &tables.ascendants,
        ),
        ascendants_over_75: ascendant_minimum_over_75(
            ascendants_over_75,
            sharers,
            &tables.ascendants,
        ),
        descendant_disability: descendant_disability_minimum(
            children,
            custody,
            &tables.disability,
        ),
        ascendant_disability: ascendant_disability_minimum(
            ascendants,
            sharers,
            &tables.disability,
        ),
        taxpayer_disability: taxpayer_disability_minimum(profile.disability, &tables.disability),
    }
}

/// Base amount, plus the over-65 and over-75 increments (cumulative).
pub fn personal_minimum(
    age: u32,
    table: &PersonalMinimum,
) -> Decimal {
    let mut total = table.base;
    if age >= 65 {
        total += table.over_65;
    }
    if age >= 75 {
        total += table.over_75;
    }
    total
}

/// Tiered amount for qualifying descendants.
pub fn descendant_minimum(
    qualifying: usize,
    exclusive_custody: bool,
    table: &DescendantMinimum,
) -> Decimal {
    let tiers = [table.first, table.second, table.third];
    let mut total: Decimal = tiers.iter().take(qualifying).sum();
    if qualifying > tiers.len() {
        total += table.each_additional * Decimal::from(qualifying - tiers.len());
    }
    halve_unless(exclusive_custody, total)
}

/// Flat amount per descendant under 3, halved unless exclusive custody.
pub fn under_3_minimum(
    under_3: usize,
    exclusive_custody: bool,
    table: &DescendantMinimum,
) -> Decimal {
    halve_unless(exclusive_custody, table.under_3 * Decimal::from(under_3))
}

/// Flat amount per ascendant aged 65 to 74 (or disabled and under 75),
/// split between the sharers.
pub fn ascendant_minimum_65_to_74(
    count: usize,
    sharers: u32,
    table: &AscendantMinimum,
) -> Decimal {
    table.over_65 * Decimal::from(count) / Decimal::from(sharers)
}

/// Over-65 plus over-75 amounts per ascendant aged 75 or more, split between
/// the sharers.
pub fn ascendant_minimum_over_75(
    count: usize,
    sharers: u32,
    table: &AscendantMinimum,
) -> Decimal {
    (table.over_65 + table.over_75) * Decimal::from(count) / Decimal::from(sharers)
}

/// Amount per disabled descendant by degree, halved unless exclusive custody.
pub fn descendant_disability_minimum(
    children: &[Dependent],
    exclusive_custody: bool,
    table: &DisabilityMinimum,
) -> Decimal {
    halve_unless(exclusive_custody, disability_total(children, table))
}

/// Ascendant disability is divided by one more than the number of sharers.
pub fn ascendant_disability_minimum(
    ascendants: &[Dependent],
    sharers: u32,
    table: &DisabilityMinimum,
) -> Decimal {
    disability_total(ascendants, table) / (Decimal::from(sharers) + Decimal::ONE)
}

/// Amount for the taxpayer's own disability degree; zero when not disabled.
pub fn taxpayer_disability_minimum(
    disability: Option<DisabilityDegree>,
    table: &DisabilityMinimum,
) -> Decimal {
    disability.map_or(Decimal::ZERO, |degree| table.amount(degree))
}

fn disability_total(
    people: &[Dependent],
    table: &DisabilityMinimum,
) -> Decimal {
    people
        .iter()
        .filter_map(|person| person.disability)
        .map(|degree| table.amount(degree))
        .sum()
}

fn halve_unless(
    exclusive_custody: bool,
    amount: Decimal,
) -> Decimal {
    if exclusive_custody {
        amount
    } else {
        amount / dec!(2)
    }
}
