use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payroll figures for one gross salary.
///
/// `net_annual = gross_annual - social_security - withholding_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryResult {
    pub gross_annual: Decimal,
    pub net_annual: Decimal,
    pub net_monthly: Decimal,
    /// More than twelve pay periods a year.
    pub has_bonus_pay_periods: bool,
    /// Amount of each bonus pay period.
    pub bonus_pay_period_amount: Decimal,
    pub withholding_amount: Decimal,
    pub withholding_rate: Decimal,
    /// Annual social security contribution paid by the employee.
    pub social_security: Decimal,
}

/// Outcome of solving for the gross salary behind a net monthly target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossSalaryResult {
    #[serde(flatten)]
    pub salary: SalaryResult,
    /// Search steps taken after the initial guess.
    pub iterations: u32,
}
