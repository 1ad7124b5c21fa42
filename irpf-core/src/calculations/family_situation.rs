//! Family situation classification and the minimum-income exemption.

use rust_decimal::Decimal;

use crate::models::{ContractType, Dependent, FamilySituation, MaritalStatus};
use crate::tables::{FamilyThresholds, WithholdingTables};

/// Descendants that count for family purposes: under 25, or disabled at any
/// age.
pub fn qualifying_descendants(children: &[Dependent]) -> usize {
    children
        .iter()
        .filter(|child| child.age < 25 || child.is_disabled())
        .count()
}

/// Classifies the taxpayer into family situation A, B or C.
pub fn classify(
    marital_status: MaritalStatus,
    spouse_earns_over_1500: bool,
    qualifying_descendants: usize,
) -> FamilySituation {
    let married = marital_status.is_married();
    if !married && qualifying_descendants > 0 {
        FamilySituation::SingleParent
    } else if married && !spouse_earns_over_1500 {
        FamilySituation::DependentSpouse
    } else {
        FamilySituation::Other
    }
}

/// Gross income below which nothing is withheld for this family situation.
pub fn minimum_income_threshold(
    situation: FamilySituation,
    qualifying_descendants: usize,
    thresholds: &FamilyThresholds,
) -> Decimal {
    thresholds.threshold(situation, qualifying_descendants)
}

/// Applies the exemption threshold and the temporary-contract floor to a
/// computed withholding rate.
pub fn adjusted_rate(
    rate: Decimal,
    situation: FamilySituation,
    qualifying_descendants: usize,
    gross_annual: Decimal,
    contract: ContractType,
    tables: &WithholdingTables,
) -> Decimal {
    let threshold =
        minimum_income_threshold(situation, qualifying_descendants, &tables.family_thresholds);
    let mut rate = if gross_annual < threshold {
        Decimal::ZERO
    } else {
        rate.max(Decimal::ZERO)
    };
    if contract == ContractType::Temporary && rate < tables.temporary_contract_min_rate {
        rate = tables.temporary_contract_min_rate;
    }
    rate
}
