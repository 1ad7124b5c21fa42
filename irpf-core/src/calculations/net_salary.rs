//! Forward computation: gross annual salary to net pay.
//!
//! The steps run in a fixed order:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Qualifying descendants and family situation |
//! | 2    | Annual social security contribution |
//! | 3    | Taxable base |
//! | 4    | Personal and family minimum |
//! | 5    | Withholding quota: scale(base) - scale(minimum) |
//! | 6    | Provisional withholding amount, rounded to cents |
//! | 7    | Withholding rate, truncated to four decimals, never negative |
//! | 8    | Family-situation exemption and temporary-contract floor |
//! | 9    | Withholding amount, net annual and net monthly pay |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use super::common::{max, round_half_up, truncate_rate};
use super::family_situation::{adjusted_rate, classify, qualifying_descendants};
use super::liability::liability;
use super::minimum_allowance::minimum_allowance;
use super::social_security::annual_contribution;
use super::taxable_base::taxable_base;
use crate::models::{SalaryResult, TaxpayerProfile};
use crate::tables::{TABLES, WithholdingTables};
use crate::validation::{ValidationError, validate_for_net};

const STANDARD_PAY_PERIODS: u32 = 12;

/// Payroll calculator bound to one set of statutory tables.
///
/// The calculator holds no mutable state; one instance can serve any number
/// of computations, from any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct SalaryCalculator<'a> {
    tables: &'a WithholdingTables,
}

impl Default for SalaryCalculator<'static> {
    fn default() -> Self {
        Self::new(&TABLES)
    }
}

impl<'a> SalaryCalculator<'a> {
    pub fn new(tables: &'a WithholdingTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a WithholdingTables {
        self.tables
    }

    /// Computes withholding, social security and net pay for the profile's
    /// gross annual salary.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violated rule when the gross
    /// salary is missing or not positive, there are fewer than 12 pay periods,
    /// the taxpayer is under 16, or the ascendant sharing count is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use irpf_core::{MaritalStatus, SalaryCalculator, TaxpayerProfile};
    ///
    /// let profile = TaxpayerProfile {
    ///     pay_periods: 14,
    ///     age: 45,
    ///     marital_status: MaritalStatus::Single,
    ///     ..TaxpayerProfile::default()
    /// }
    /// .with_gross_annual(dec!(30000));
    ///
    /// let result = SalaryCalculator::default().compute_net_salary(&profile).unwrap();
    ///
    /// assert_eq!(result.social_security, dec!(1905));
    /// assert_eq!(result.withholding_rate, dec!(0.1646));
    /// assert_eq!(result.net_annual, dec!(23157));
    /// ```
    pub fn compute_net_salary(
        &self,
        profile: &TaxpayerProfile,
    ) -> Result<SalaryResult, ValidationError> {
        let gross_annual = validate_for_net(profile)?;
        Ok(self.net_salary_for(profile, gross_annual))
    }

    /// Runs the forward computation for `gross_annual`, ignoring the
    /// profile's own salary fields. The profile must already be validated
    /// and `gross_annual` must be positive.
    pub(crate) fn net_salary_for(
        &self,
        profile: &TaxpayerProfile,
        gross_annual: Decimal,
    ) -> SalaryResult {
        let tables = self.tables;

        // Step 1: family situation
        let qualifying = qualifying_descendants(&profile.children);
        let situation = classify(
            profile.marital_status,
            profile.spouse_earns_over_1500,
            qualifying,
        );

        // Step 2: social security
        let social_security = annual_contribution(
            gross_annual,
            profile.professional_category,
            profile.contract_type,
            &tables.social_security,
        );

        // Step 3: taxable base
        let base = taxable_base(
            &profile.children,
            gross_annual,
            social_security,
            profile.geographic_mobility,
            profile.disability,
            &tables.net_yield_reduction,
        );

        // Step 4: personal and family minimum
        let minimum = minimum_allowance(profile, &tables.minimums).total();

        // Steps 5-7: computed withholding rate
        let computed_rate = self.computed_rate(base, minimum, gross_annual);

        // Step 8: exemption threshold and contract floor
        let withholding_rate = adjusted_rate(
            computed_rate,
            situation,
            qualifying,
            gross_annual,
            profile.contract_type,
            tables,
        );

        // Step 9: pay
        let withholding_amount = withholding_rate * gross_annual;
        let net_annual = gross_annual - social_security - withholding_amount;
        let bonus_pay_period_amount =
            (gross_annual - withholding_amount) / Decimal::from(profile.pay_periods);
        let net_monthly =
            bonus_pay_period_amount - social_security / Decimal::from(STANDARD_PAY_PERIODS);

        debug!(
            gross_annual = %gross_annual,
            taxable_base = %base,
            minimum = %minimum,
            situation = ?situation,
            computed_rate = %computed_rate,
            withholding_rate = %withholding_rate,
            net_monthly = %net_monthly,
            "Computed net salary"
        );

        SalaryResult {
            gross_annual,
            net_annual,
            net_monthly,
            has_bonus_pay_periods: profile.pay_periods > STANDARD_PAY_PERIODS,
            bonus_pay_period_amount,
            withholding_amount,
            withholding_rate,
            social_security,
        }
    }

    /// Withholding rate before the family-situation exemption.
    fn computed_rate(
        &self,
        taxable_base: Decimal,
        minimum: Decimal,
        gross_annual: Decimal,
    ) -> Decimal {
        let brackets = self.tables.brackets;
        let quota = liability(taxable_base, brackets) - liability(minimum, brackets);
        let provisional_rate = quota / gross_annual;
        let provisional_amount = round_half_up(provisional_rate * gross_annual);
        let rate = (provisional_amount - self.tables.special_deduction) / gross_annual;
        max(truncate_rate(rate), dec!(0))
    }
}
