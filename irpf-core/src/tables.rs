//! Statutory constants for the modeled year.
//!
//! Figures follow the Spanish tax agency's 2021 withholding algorithm for
//! employment income and the 2021 social security contribution bases. They
//! are exposed as read-only statics; callers wanting different figures build
//! their own [`WithholdingTables`] and pass it to
//! [`SalaryCalculator::new`](crate::SalaryCalculator::new).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::models::{
    ContractType, DisabilityDegree, FamilySituation, ProfessionalCategory, TaxBracket,
};

/// Reductions applied to net employment yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetYieldReduction {
    /// Flat deduction for other expenses, always applied.
    pub common: Decimal,
    /// Full reduction below `lower_threshold`.
    pub additional: Decimal,
    pub lower_threshold: Decimal,
    /// Net yield from which the reduction reaches zero.
    pub upper_threshold: Decimal,
    /// Taper per unit of net yield above `lower_threshold`.
    pub taper_coefficient: Decimal,
    pub moderate_disability: Decimal,
    pub severe_disability: Decimal,
    pub large_family: Decimal,
}

impl NetYieldReduction {
    pub fn disability(
        &self,
        degree: DisabilityDegree,
    ) -> Decimal {
        match degree {
            DisabilityDegree::Moderate => self.moderate_disability,
            DisabilityDegree::Severe => self.severe_disability,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonalMinimum {
    pub base: Decimal,
    pub over_65: Decimal,
    /// Added on top of `over_65`.
    pub over_75: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DescendantMinimum {
    pub under_3: Decimal,
    pub first: Decimal,
    pub second: Decimal,
    pub third: Decimal,
    pub each_additional: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AscendantMinimum {
    pub over_65: Decimal,
    /// Added on top of `over_65`.
    pub over_75: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisabilityMinimum {
    pub moderate: Decimal,
    pub severe: Decimal,
}

impl DisabilityMinimum {
    pub fn amount(
        &self,
        degree: DisabilityDegree,
    ) -> Decimal {
        match degree {
            DisabilityDegree::Moderate => self.moderate,
            DisabilityDegree::Severe => self.severe,
        }
    }
}

/// Constants behind the personal and family minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinimumTables {
    pub personal: PersonalMinimum,
    pub descendants: DescendantMinimum,
    pub ascendants: AscendantMinimum,
    pub disability: DisabilityMinimum,
}

/// Gross income below which nothing is withheld, indexed by the number of
/// qualifying descendants (0, 1, 2 or more).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FamilyThresholds {
    pub single_parent: [Decimal; 3],
    pub dependent_spouse: [Decimal; 3],
    pub other: [Decimal; 3],
}

impl FamilyThresholds {
    pub fn threshold(
        &self,
        situation: FamilySituation,
        qualifying_descendants: usize,
    ) -> Decimal {
        let row = match situation {
            FamilySituation::SingleParent => &self.single_parent,
            FamilySituation::DependentSpouse => &self.dependent_spouse,
            FamilySituation::Other => &self.other,
        };
        row[qualifying_descendants.min(row.len() - 1)]
    }
}

/// Monthly contribution base limits for one professional category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContributionBase {
    pub floor: Decimal,
    pub ceiling: Decimal,
}

/// Employee contribution rate per contract type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractRates {
    /// Common contingencies 4.70% + training 0.10% + unemployment 1.55%.
    pub general: Decimal,
    /// Common contingencies 4.70% + training 0.10% + unemployment 1.60%.
    pub temporary: Decimal,
}

impl ContractRates {
    pub fn rate(
        &self,
        contract: ContractType,
    ) -> Decimal {
        match contract {
            ContractType::General => self.general,
            ContractType::Temporary => self.temporary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SocialSecurityTables {
    /// Indexed by [`ProfessionalCategory::index`].
    pub contribution_bases: [ContributionBase; ProfessionalCategory::COUNT],
    pub contract_rates: ContractRates,
}

impl SocialSecurityTables {
    pub fn contribution_base(
        &self,
        category: ProfessionalCategory,
    ) -> ContributionBase {
        self.contribution_bases[category.index()]
    }
}

/// Every constant the calculator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WithholdingTables {
    /// Year the figures apply to; shown alongside computed results.
    pub tax_year: i32,
    pub net_yield_reduction: NetYieldReduction,
    pub minimums: MinimumTables,
    /// Contiguous, ascending, starting at zero; the last one is unbounded.
    pub brackets: &'static [TaxBracket],
    pub family_thresholds: FamilyThresholds,
    pub social_security: SocialSecurityTables,
    /// Withholding rate applied at least on temporary contracts.
    pub temporary_contract_min_rate: Decimal,
    /// One-off deduction from the withholding amount; zero in most years.
    pub special_deduction: Decimal,
}

const fn bracket(
    min_base: Decimal,
    max_base: Option<Decimal>,
    base_quota: Decimal,
    rate: Decimal,
) -> TaxBracket {
    TaxBracket {
        min_base,
        max_base,
        base_quota,
        rate,
    }
}

pub static WITHHOLDING_BRACKETS: [TaxBracket; 6] = [
    bracket(dec!(0), Some(dec!(12450)), dec!(0), dec!(0.19)),
    bracket(dec!(12450), Some(dec!(20200)), dec!(2365.50), dec!(0.24)),
    bracket(dec!(20200), Some(dec!(35200)), dec!(4225.50), dec!(0.30)),
    bracket(dec!(35200), Some(dec!(60000)), dec!(8725.50), dec!(0.37)),
    bracket(dec!(60000), Some(dec!(300000)), dec!(17901.50), dec!(0.45)),
    bracket(dec!(300000), None, dec!(125901.50), dec!(0.47)),
];

const fn base(
    floor: Decimal,
    ceiling: Decimal,
) -> ContributionBase {
    ContributionBase { floor, ceiling }
}

const BASE_CEILING: Decimal = dec!(4070.10);
const BASE_FLOOR_GENERAL: Decimal = dec!(1049.95);

pub static TABLES: WithholdingTables = WithholdingTables {
    tax_year: 2021,
    net_yield_reduction: NetYieldReduction {
        common: dec!(2000),
        additional: dec!(3700),
        lower_threshold: dec!(11250),
        upper_threshold: dec!(14450),
        taper_coefficient: dec!(1.15625),
        moderate_disability: dec!(3500),
        severe_disability: dec!(7750),
        large_family: dec!(600),
    },
    minimums: MinimumTables {
        personal: PersonalMinimum {
            base: dec!(5550),
            over_65: dec!(1150),
            over_75: dec!(1400),
        },
        descendants: DescendantMinimum {
            under_3: dec!(2800),
            first: dec!(2400),
            second: dec!(2700),
            third: dec!(4000),
            each_additional: dec!(4500),
        },
        ascendants: AscendantMinimum {
            over_65: dec!(1150),
            over_75: dec!(1400),
        },
        disability: DisabilityMinimum {
            moderate: dec!(3000),
            severe: dec!(12000),
        },
    },
    brackets: &WITHHOLDING_BRACKETS,
    family_thresholds: FamilyThresholds {
        single_parent: [dec!(0), dec!(14266), dec!(15803)],
        dependent_spouse: [dec!(13696), dec!(14985), dec!(17138)],
        other: [dec!(12000), dec!(12607), dec!(13275)],
    },
    social_security: SocialSecurityTables {
        contribution_bases: [
            base(dec!(1466.50), BASE_CEILING),
            base(dec!(1216.00), BASE_CEILING),
            base(dec!(1057.77), BASE_CEILING),
            base(BASE_FLOOR_GENERAL, BASE_CEILING),
            base(BASE_FLOOR_GENERAL, BASE_CEILING),
            base(BASE_FLOOR_GENERAL, BASE_CEILING),
            base(BASE_FLOOR_GENERAL, BASE_CEILING),
            base(BASE_FLOOR_GENERAL, BASE_CEILING),
            base(BASE_FLOOR_GENERAL, BASE_CEILING),
            base(BASE_FLOOR_GENERAL, BASE_CEILING),
            base(BASE_FLOOR_GENERAL, BASE_CEILING),
        ],
        contract_rates: ContractRates {
            general: dec!(0.0635),
            temporary: dec!(0.0640),
        },
    },
    temporary_contract_min_rate: dec!(0.02),
    special_deduction: dec!(0),
};

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn brackets_are_contiguous_and_ascending() {
        let brackets = TABLES.brackets;

        assert_eq!(brackets[0].min_base, dec!(0));
        for pair in brackets.windows(2) {
            assert_eq!(pair[0].max_base, Some(pair[1].min_base));
            assert!(pair[0].rate < pair[1].rate);
        }
        assert_eq!(brackets.last().and_then(|b| b.max_base), None);
    }

    #[test]
    fn bracket_quotas_accumulate_previous_brackets() {
        for pair in TABLES.brackets.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            let width = upper.min_base - lower.min_base;

            assert_eq!(lower.base_quota + width * lower.rate, upper.base_quota);
        }
    }

    #[test]
    fn family_threshold_caps_descendant_index() {
        let thresholds = TABLES.family_thresholds;

        assert_eq!(thresholds.threshold(FamilySituation::Other, 0), dec!(12000));
        assert_eq!(
            thresholds.threshold(FamilySituation::DependentSpouse, 1),
            dec!(14985)
        );
        assert_eq!(
            thresholds.threshold(FamilySituation::SingleParent, 7),
            dec!(15803)
        );
    }

    #[test]
    fn contribution_base_is_indexed_by_category() {
        let social_security = TABLES.social_security;

        assert_eq!(
            social_security.contribution_base(ProfessionalCategory::EngineersAndGraduates),
            base(dec!(1466.50), dec!(4070.10))
        );
        assert_eq!(
            social_security
                .contribution_base(ProfessionalCategory::AdministrativeManagers)
                .floor,
            dec!(1057.77)
        );
        assert_eq!(
            social_security
                .contribution_base(ProfessionalCategory::UnderEighteen)
                .floor,
            dec!(1049.95)
        );
    }
}
