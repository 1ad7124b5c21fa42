//! Employee social security contribution.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{ContractType, ProfessionalCategory};
use crate::tables::SocialSecurityTables;

const MONTHS: Decimal = dec!(12);

/// Monthly contribution: gross / 12 clamped to the category's contribution
/// base limits, times the contract's rate.
pub fn monthly_contribution(
    gross_annual: Decimal,
    category: ProfessionalCategory,
    contract: ContractType,
    tables: &SocialSecurityTables,
) -> Decimal {
    let limits = tables.contribution_base(category);
    let base = (gross_annual / MONTHS).clamp(limits.floor, limits.ceiling);
    base * tables.contract_rates.rate(contract)
}

/// Contribution accumulated over twelve months.
pub fn annual_contribution(
    gross_annual: Decimal,
    category: ProfessionalCategory,
    contract: ContractType,
    tables: &SocialSecurityTables,
) -> Decimal {
    monthly_contribution(gross_annual, category, contract, tables) * MONTHS
}
