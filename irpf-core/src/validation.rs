//! Input checks run before a payroll computation.
//!
//! Every rule is evaluated so the caller can report all problems at once.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::TaxpayerProfile;

const MIN_PAY_PERIODS: u32 = 12;
const MIN_AGE: u32 = 16;

/// A single violated rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("gross annual salary must be greater than zero")]
    NonPositiveGrossAnnual,

    #[error("net monthly salary must be greater than zero")]
    NonPositiveNetMonthly,

    #[error("number of pay periods must be at least 12, got {0}")]
    TooFewPayPeriods(u32),

    #[error("age must be at least 16, got {0}")]
    UnderAge(u32),

    #[error("ascendant allowance must be shared by at least one person")]
    NoAscendantSharers,
}

/// The profile cannot be computed; carries every violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid taxpayer profile: {}", join_messages(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks a profile for the forward computation and returns its gross salary.
pub fn validate_for_net(profile: &TaxpayerProfile) -> Result<Decimal, ValidationError> {
    let mut violations = Vec::new();
    let gross = positive(profile.gross_annual);
    if gross.is_none() {
        violations.push(Violation::NonPositiveGrossAnnual);
    }
    check_common(profile, &mut violations);
    finish(gross, violations)
}

/// Checks a profile for the gross solver and returns its net monthly target.
pub fn validate_for_gross(profile: &TaxpayerProfile) -> Result<Decimal, ValidationError> {
    let mut violations = Vec::new();
    let net = positive(profile.net_monthly);
    if net.is_none() {
        violations.push(Violation::NonPositiveNetMonthly);
    }
    check_common(profile, &mut violations);
    finish(net, violations)
}

fn positive(amount: Option<Decimal>) -> Option<Decimal> {
    amount.filter(|value| *value > Decimal::ZERO)
}

fn check_common(
    profile: &TaxpayerProfile,
    violations: &mut Vec<Violation>,
) {
    if profile.pay_periods < MIN_PAY_PERIODS {
        violations.push(Violation::TooFewPayPeriods(profile.pay_periods));
    }
    if profile.age < MIN_AGE {
        violations.push(Violation::UnderAge(profile.age));
    }
    if profile.ascendant_sharing_count == 0 {
        violations.push(Violation::NoAscendantSharers);
    }
}

fn finish(
    amount: Option<Decimal>,
    violations: Vec<Violation>,
) -> Result<Decimal, ValidationError> {
    match amount {
        Some(amount) if violations.is_empty() => Ok(amount),
        _ => Err(ValidationError { violations }),
    }
}
