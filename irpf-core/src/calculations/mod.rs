//! Payroll withholding calculations.
//!
//! The primitive steps live in their own modules as pure functions over the
//! statutory tables; [`SalaryCalculator`] composes them into the forward
//! (gross to net) computation and the inverse (net to gross) solver.

pub mod common;
pub mod family_situation;
pub mod gross_salary;
pub mod liability;
pub mod minimum_allowance;
pub mod net_salary;
pub mod social_security;
pub mod taxable_base;

pub use gross_salary::SolverSettings;
pub use minimum_allowance::MinimumAllowance;
pub use net_salary::SalaryCalculator;
