//! Spanish personal income tax (IRPF) withholding for employees.
//!
//! Given a gross annual salary and the employee's personal and family
//! circumstances, [`compute_net_salary`] derives the withholding, the social
//! security contribution and net pay. [`compute_gross_salary`] inverts that
//! computation for a target net monthly salary.

pub mod calculations;
pub mod models;
pub mod tables;
pub mod validation;

pub use calculations::{SalaryCalculator, SolverSettings};
pub use models::*;
pub use tables::{TABLES, WithholdingTables};
pub use validation::{ValidationError, Violation};

/// Computes net pay with the built-in tables.
///
/// See [`SalaryCalculator::compute_net_salary`].
pub fn compute_net_salary(profile: &TaxpayerProfile) -> Result<SalaryResult, ValidationError> {
    SalaryCalculator::default().compute_net_salary(profile)
}

/// Solves for the gross salary behind a net monthly target with the built-in
/// tables and default search settings.
///
/// See [`SalaryCalculator::compute_gross_salary`].
pub fn compute_gross_salary(
    profile: &TaxpayerProfile
) -> Result<GrossSalaryResult, ValidationError> {
    SalaryCalculator::default().compute_gross_salary(profile)
}
