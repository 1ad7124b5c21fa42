//! Inverse computation: net monthly target to gross annual salary.
//!
//! The forward computation is piecewise (scale brackets, contribution base
//! limits, exemption thresholds, rate truncation), so there is no closed
//! form. The solver brackets the answer and bisects:
//!
//! - while no guess has overshot the target, the guess climbs by a fixed step;
//! - once it has, each step moves to the middle of `[lower, upper]`.
//!
//! It stops on an exact match, when the interval is narrower than the
//! precision, or after the iteration cap. Net pay is assumed to grow with
//! gross pay; where truncation of the rate makes it dip locally, the solver
//! still ends on a point where the target is crossed upwards.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace, warn};

use super::net_salary::SalaryCalculator;
use crate::models::{GrossSalaryResult, TaxpayerProfile};
use crate::validation::{ValidationError, validate_for_gross};

/// Search parameters for [`SalaryCalculator::compute_gross_salary_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverSettings {
    initial_guess: Decimal,
    unbounded_step: Decimal,
    precision: Decimal,
    max_iterations: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            initial_guess: dec!(50000),
            unbounded_step: dec!(100000),
            precision: dec!(0.1),
            max_iterations: 1000,
        }
    }
}

impl SolverSettings {
    /// Width of the gross salary interval below which the search stops.
    pub fn with_precision(
        mut self,
        precision: Decimal,
    ) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_max_iterations(
        mut self,
        max_iterations: u32,
    ) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

impl SalaryCalculator<'_> {
    /// Finds the gross annual salary whose net monthly pay matches the
    /// profile's `net_monthly`, using [`SolverSettings::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the net target is missing or not
    /// positive, there are fewer than 12 pay periods, the taxpayer is under
    /// 16, or the ascendant sharing count is zero.
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
    /// .with_net_monthly(dec!(1560));
    ///
    /// let result = SalaryCalculator::default().compute_gross_salary(&profile).unwrap();
    ///
    /// assert!((result.salary.net_monthly - dec!(1560)).abs() < dec!(0.1));
    /// assert!(result.iterations < 1000);
    /// ```
    pub fn compute_gross_salary(
        &self,
        profile: &TaxpayerProfile,
    ) -> Result<GrossSalaryResult, ValidationError> {
        self.compute_gross_salary_with(profile, &SolverSettings::default())
    }

    pub fn compute_gross_salary_with(
        &self,
        profile: &TaxpayerProfile,
        settings: &SolverSettings,
    ) -> Result<GrossSalaryResult, ValidationError> {
        let target = validate_for_gross(profile)?;

        let mut lower = Decimal::ZERO;
        let mut upper: Option<Decimal> = None;
        let mut guess = settings.initial_guess;
        let mut salary = self.net_salary_for(profile, guess);
        let mut iterations = 0;

        while salary.net_monthly != target
            && upper.is_none_or(|upper| upper - lower > settings.precision)
            && iterations < settings.max_iterations
        {
            if salary.net_monthly < target {
                lower = guess;
                guess = match upper {
                    Some(upper) => (lower + upper) / dec!(2),
                    None => guess + settings.unbounded_step,
                };
            } else {
                upper = Some(guess);
                guess = (lower + guess) / dec!(2);
            }
            salary = self.net_salary_for(profile, guess);
            iterations += 1;

            trace!(
                iteration = iterations,
                guess = %guess,
                net_monthly = %salary.net_monthly,
                "Gross salary search step"
            );
        }

        if iterations >= settings.max_iterations && salary.net_monthly != target {
            warn!(
                target = %target,
                net_monthly = %salary.net_monthly,
                max_iterations = settings.max_iterations,
                "Gross salary search hit the iteration cap"
            );
        }
        debug!(
            target = %target,
            gross_annual = %salary.gross_annual,
            iterations,
            "Solved gross salary"
        );

        Ok(GrossSalaryResult { salary, iterations })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{Dependent, MaritalStatus};
    use crate::validation::Violation;

    fn single_profile(net_monthly: Decimal) -> TaxpayerProfile {
        TaxpayerProfile {
            pay_periods: 14,
            age: 45,
            marital_status: MaritalStatus::Single,
            ..TaxpayerProfile::default()
        }
        .with_net_monthly(net_monthly)
    }

    fn assert_close(
        actual: Decimal,
        expected: Decimal,
    ) {
        assert!(
            (actual - expected).abs() < dec!(0.1),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn solves_gross_for_net_target() {
        let result = SalaryCalculator::default()
            .compute_gross_salary(&single_profile(dec!(1560)))
            .unwrap();

        assert_close(result.salary.net_monthly, dec!(1560));
        assert!(result.salary.gross_annual > dec!(28400));
        assert!(result.salary.gross_annual < dec!(28500));
        assert!(result.iterations < 1000);
    }

    #[test]
    fn solves_targets_above_initial_guess() {
        let result = SalaryCalculator::default()
            .compute_gross_salary(&single_profile(dec!(5000)))
            .unwrap();

        assert_close(result.salary.net_monthly, dec!(5000));
        assert!(result.salary.gross_annual > dec!(100000));
    }

    #[test]
    fn solves_targets_below_contribution_floor() {
        let result = SalaryCalculator::default()
            .compute_gross_salary(&single_profile(dec!(300)))
            .unwrap();

        assert_close(result.salary.net_monthly, dec!(300));
    }

    #[test]
    fn solver_result_matches_forward_computation() {
        let calculator = SalaryCalculator::default();
        let profile = TaxpayerProfile {
            children: vec![Dependent::new(2), Dependent::new(9)],
            ..single_profile(dec!(2100))
        };

        let solved = calculator.compute_gross_salary(&profile).unwrap();
        let forward = calculator
            .compute_net_salary(&profile.clone().with_gross_annual(solved.salary.gross_annual))
            .unwrap();

        assert_eq!(forward, solved.salary);
    }

    #[test]
    fn solver_stops_at_iteration_cap() {
        let settings = SolverSettings::default().with_max_iterations(3);

        let result = SalaryCalculator::default()
            .compute_gross_salary_with(&single_profile(dec!(1560)), &settings)
            .unwrap();

        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn coarser_precision_takes_fewer_iterations() {
        let calculator = SalaryCalculator::default();
        let profile = single_profile(dec!(1560));
        let coarse = SolverSettings::default().with_precision(dec!(100));

        let fine_result = calculator.compute_gross_salary(&profile).unwrap();
        let coarse_result = calculator
            .compute_gross_salary_with(&profile, &coarse)
            .unwrap();

        assert!(coarse_result.iterations < fine_result.iterations);
    }

    #[test]
    fn solver_rejects_invalid_profile() {
        let profile = TaxpayerProfile {
            age: 15,
            ..single_profile(dec!(0))
        };

        let error = SalaryCalculator::default()
            .compute_gross_salary(&profile)
            .unwrap_err();

        assert_eq!(
            error.violations,
            vec![Violation::NonPositiveNetMonthly, Violation::UnderAge(15)]
        );
    }
}
