//! Plain-text rendering of results for the terminal.

use std::fmt::Write;

use irpf_core::{
    GrossSalaryResult, SalaryResult, SelectorItem, Selectors,
    calculations::common::round_half_up,
};

fn push_line(
    out: &mut String,
    label: &str,
    value: impl std::fmt::Display,
) {
    let _ = writeln!(out, "{label:<26}{value}");
}

/// `tax_year` is the year of the tables the figures were computed with.
pub fn render_salary(
    salary: &SalaryResult,
    tax_year: i32,
) -> String {
    let mut out = String::new();
    push_line(&mut out, "Tax year", tax_year);
    push_line(&mut out, "Gross annual salary", round_half_up(salary.gross_annual));
    push_line(&mut out, "Social security", round_half_up(salary.social_security));
    push_line(&mut out, "Withholding rate", salary.withholding_rate);
    push_line(&mut out, "Withholding amount", round_half_up(salary.withholding_amount));
    push_line(&mut out, "Net annual salary", round_half_up(salary.net_annual));
    push_line(&mut out, "Net monthly salary", round_half_up(salary.net_monthly));
    if salary.has_bonus_pay_periods {
        push_line(
            &mut out,
            "Bonus pay period amount",
            round_half_up(salary.bonus_pay_period_amount),
        );
    }
    out
}

pub fn render_gross(
    result: &GrossSalaryResult,
    tax_year: i32,
) -> String {
    let mut out = render_salary(&result.salary, tax_year);
    push_line(&mut out, "Solver iterations", result.iterations);
    out
}

fn render_group(
    out: &mut String,
    title: &str,
    items: &[SelectorItem],
) {
    let _ = writeln!(out, "{title}");
    for item in items {
        let _ = writeln!(out, "  {:<10}{}", item.id, item.label);
    }
}

pub fn render_selectors(selectors: &Selectors) -> String {
    let mut out = String::new();
    render_group(&mut out, "marital_status", &selectors.marital_status);
    render_group(&mut out, "professional_category", &selectors.professional_category);
    render_group(&mut out, "contract_type", &selectors.contract_type);
    render_group(&mut out, "family_situation", &selectors.family_situation);
    out
}

#[cfg(test)]
mod tests {
    use irpf_core::{MaritalStatus, TABLES, TaxpayerProfile, compute_gross_salary, compute_net_salary};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn single_profile() -> TaxpayerProfile {
        TaxpayerProfile {
            pay_periods: 14,
            marital_status: MaritalStatus::Single,
            ..TaxpayerProfile::default()
        }
    }

    #[test]
    fn renders_rounded_figures() {
        let salary = compute_net_salary(&single_profile().with_gross_annual(dec!(30000))).unwrap();

        let text = render_salary(&salary, TABLES.tax_year);

        assert!(text.starts_with("Tax year                  2021\n"));
        assert!(text.contains("Net monthly salary        1631.39\n"));
        assert!(text.contains("Bonus pay period amount   1790.14\n"));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn gross_report_adds_iterations() {
        let result = compute_gross_salary(&single_profile().with_net_monthly(dec!(1560))).unwrap();

        let text = render_gross(&result, TABLES.tax_year);

        assert!(text.ends_with(&format!("Solver iterations         {}\n", result.iterations)));
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn selectors_list_every_code() {
        let text = render_selectors(&Selectors::new());

        assert!(text.contains("  5         Casado/a\n"));
        assert!(text.contains("professional_category\n"));
        assert!(text.contains("  temporal  Inferior a 12 meses\n"));
    }
}
