//! Batch payroll computations from CSV.
//!
//! ## Input
//!
//! One employee per row. Headers are matched by name, so column order does
//! not matter and any column may be left out; empty cells take the profile
//! defaults.
//!
//! | Column                    | Type    | Notes                                          |
//! |---------------------------|---------|------------------------------------------------|
//! | `id`                      | string  | Echoed to the output; defaults to the row number |
//! | `gross_annual`            | decimal | Set it to compute net pay                      |
//! | `net_monthly`             | decimal | Set it (and leave `gross_annual` empty) to solve for gross |
//! | `pay_periods`             | integer |                                                |
//! | `age`                     | integer |                                                |
//! | `marital_status`          | code    | `1`..`5` or `widowed`, `single`, `divorced`, `legally_separated`, `married` |
//! | `spouse_earns_over_1500`  | bool    |                                                |
//! | `geographic_mobility`     | bool    |                                                |
//! | `disability`              | string  | `moderate` or `severe`                         |
//! | `children`                | list    | See below                                      |
//! | `exclusive_custody`       | bool    |                                                |
//! | `ascendants`              | list    | See below                                      |
//! | `ascendant_sharing_count` | integer |                                                |
//! | `contract_type`           | code    | `general` or `temporal`                        |
//! | `professional_category`   | code    | `A`..`K`                                       |
//!
//! Dependents are `;`-separated ages, each optionally suffixed with `d`
//! (moderate disability) or `s` (severe disability): `2;10d;31s`.
//!
//! ## Output
//!
//! One row per input row with the payroll figures, amounts rounded to cents,
//! or an `error` cell when the profile is invalid.
//!
//! ```csv
//! id,gross_annual,net_monthly,pay_periods
//! ana,30000,,14
//! luis,,1560,14
//! ```

use std::{io, path::Path};

use irpf_core::{
    ContractType, Dependent, DisabilityDegree, MaritalStatus, ProfessionalCategory,
    SalaryCalculator, SalaryResult, TaxpayerProfile, ValidationError,
    calculations::common::round_half_up,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    id: Option<String>,
    gross_annual: Option<Decimal>,
    net_monthly: Option<Decimal>,
    pay_periods: Option<u32>,
    age: Option<u32>,
    marital_status: Option<MaritalStatus>,
    spouse_earns_over_1500: Option<bool>,
    geographic_mobility: Option<bool>,
    disability: Option<DisabilityDegree>,
    children: Option<String>,
    exclusive_custody: Option<bool>,
    ascendants: Option<String>,
    ascendant_sharing_count: Option<u32>,
    contract_type: Option<ContractType>,
    professional_category: Option<ProfessionalCategory>,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Bad CSV structure, a wrong type, or an unknown selector code.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `row` is 1-based, the header being row 0.
    #[error("invalid dependent '{value}' on row {row}")]
    InvalidDependent { value: String, row: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Which figure a batch entry starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Computation {
    NetFromGross,
    GrossFromNet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub row: usize,
    pub id: String,
    pub profile: TaxpayerProfile,
}

impl BatchEntry {
    /// Solves for gross only when the row gives a net target and no gross
    /// figure; everything else goes through the forward computation, whose
    /// validation reports a missing gross salary.
    pub fn computation(&self) -> Computation {
        match (self.profile.gross_annual, self.profile.net_monthly) {
            (None, Some(_)) => Computation::GrossFromNet,
            _ => Computation::NetFromGross,
        }
    }
}

/// One line of the results file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub id: String,
    pub gross_annual: Option<Decimal>,
    pub net_annual: Option<Decimal>,
    pub net_monthly: Option<Decimal>,
    pub bonus_pay_period_amount: Option<Decimal>,
    pub withholding_amount: Option<Decimal>,
    pub withholding_rate: Option<Decimal>,
    pub social_security: Option<Decimal>,
    pub iterations: Option<u32>,
    pub error: Option<String>,
}

impl OutputRow {
    fn computed(
        id: String,
        salary: &SalaryResult,
        iterations: Option<u32>,
    ) -> Self {
        Self {
            id,
            gross_annual: Some(round_half_up(salary.gross_annual)),
            net_annual: Some(round_half_up(salary.net_annual)),
            net_monthly: Some(round_half_up(salary.net_monthly)),
            bonus_pay_period_amount: salary
                .has_bonus_pay_periods
                .then(|| round_half_up(salary.bonus_pay_period_amount)),
            withholding_amount: Some(round_half_up(salary.withholding_amount)),
            withholding_rate: Some(salary.withholding_rate),
            social_security: Some(round_half_up(salary.social_security)),
            iterations,
            error: None,
        }
    }

    fn failed(
        id: String,
        error: &ValidationError,
    ) -> Self {
        Self {
            id,
            gross_annual: None,
            net_annual: None,
            net_monthly: None,
            bonus_pay_period_amount: None,
            withholding_amount: None,
            withholding_rate: None,
            social_security: None,
            iterations: None,
            error: Some(error.messages().join("; ")),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parses a `;`-separated dependent list such as `2;10d;31s`.
fn parse_dependents(
    value: &str,
    row: usize,
) -> Result<Vec<Dependent>, BatchError> {
    let invalid = || BatchError::InvalidDependent {
        value: value.to_string(),
        row,
    };

    value
        .split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (digits, disability) = match item.strip_suffix(['d', 'D']) {
                Some(digits) => (digits, Some(DisabilityDegree::Moderate)),
                None => match item.strip_suffix(['s', 'S']) {
                    Some(digits) => (digits, Some(DisabilityDegree::Severe)),
                    None => (item, None),
                },
            };
            let age = digits.trim().parse::<u32>().map_err(|_| invalid())?;
            Ok(Dependent { age, disability })
        })
        .collect()
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<BatchEntry, BatchError> {
    let defaults = TaxpayerProfile::default();
    let children = match row.children.as_deref() {
        Some(value) => parse_dependents(value, row_number)?,
        None => Vec::new(),
    };
    let ascendants = match row.ascendants.as_deref() {
        Some(value) => parse_dependents(value, row_number)?,
        None => Vec::new(),
    };

    let profile = TaxpayerProfile {
        gross_annual: row.gross_annual,
        net_monthly: row.net_monthly,
        pay_periods: row.pay_periods.unwrap_or(defaults.pay_periods),
        age: row.age.unwrap_or(defaults.age),
        marital_status: row.marital_status.unwrap_or(defaults.marital_status),
        spouse_earns_over_1500: row.spouse_earns_over_1500.unwrap_or_default(),
        geographic_mobility: row.geographic_mobility.unwrap_or_default(),
        disability: row.disability,
        children,
        exclusive_custody: row.exclusive_custody.unwrap_or_default(),
        ascendants,
        ascendant_sharing_count: row
            .ascendant_sharing_count
            .unwrap_or(defaults.ascendant_sharing_count),
        contract_type: row.contract_type.unwrap_or(defaults.contract_type),
        professional_category: row
            .professional_category
            .unwrap_or(defaults.professional_category),
    };

    Ok(BatchEntry {
        row: row_number,
        id: row
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| row_number.to_string()),
        profile,
    })
}

/// Reads every entry from CSV text, in file order.
///
/// # Errors
///
/// * [`BatchError::Csv`] when the CSV is malformed or a cell has the wrong
///   type or an unknown code.
/// * [`BatchError::InvalidDependent`] when a dependent list cannot be parsed.
pub fn load_from_reader<R: io::Read>(input: R) -> Result<Vec<BatchEntry>, BatchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input);

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

pub fn load_from_str(input: &str) -> Result<Vec<BatchEntry>, BatchError> {
    load_from_reader(input.as_bytes())
}

pub fn load_from_file(path: &Path) -> Result<Vec<BatchEntry>, BatchError> {
    let file = std::fs::File::open(path)?;
    let entries = load_from_reader(io::BufReader::new(file))?;
    debug!(path = %path.display(), rows = entries.len(), "Loaded batch input");
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Computing and writing
// ---------------------------------------------------------------------------

pub fn compute_entry(
    calculator: &SalaryCalculator<'_>,
    entry: &BatchEntry,
) -> OutputRow {
    let id = entry.id.clone();
    let outcome = match entry.computation() {
        Computation::NetFromGross => calculator
            .compute_net_salary(&entry.profile)
            .map(|salary| OutputRow::computed(id.clone(), &salary, None)),
        Computation::GrossFromNet => calculator
            .compute_gross_salary(&entry.profile)
            .map(|solved| OutputRow::computed(id.clone(), &solved.salary, Some(solved.iterations))),
    };

    outcome.unwrap_or_else(|error| {
        debug!(row = entry.row, id = %entry.id, %error, "Batch row rejected");
        OutputRow::failed(id, &error)
    })
}

/// Computes every entry. Invalid rows produce an error row instead of
/// stopping the batch.
pub fn compute_all(
    calculator: &SalaryCalculator<'_>,
    entries: &[BatchEntry],
) -> Vec<OutputRow> {
    let rows: Vec<OutputRow> = entries
        .iter()
        .map(|entry| compute_entry(calculator, entry))
        .collect();

    let failed = rows.iter().filter(|row| row.is_error()).count();
    info!(rows = rows.len(), failed, "Batch computed");
    rows
}

pub fn write_results<W: io::Write>(
    rows: &[OutputRow],
    output: W,
) -> Result<(), BatchError> {
    let mut writer = csv::Writer::from_writer(output);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const MINIMAL_CSV: &str = "\
id,gross_annual
ana,30000
";

    const MIXED_CSV: &str = "\
id,gross_annual,net_monthly,pay_periods,age,marital_status,children,ascendants,ascendant_sharing_count,contract_type,professional_category
ana,30000,,14,45,single,,,,general,A
luis,,1560,14,45,2,,,,,
eva,25000,,12,38,married,2;10d,81s,2,temporal,J
kid,18000,,14,15,,,,,,
";

    // -----------------------------------------------------------------------
    // Dependent lists
    // -----------------------------------------------------------------------

    #[test]
    fn parses_dependent_ages_and_disabilities() {
        let dependents = parse_dependents("2; 10d;31S", 1).unwrap();

        assert_eq!(
            dependents,
            vec![
                Dependent::new(2),
                Dependent::new(10).with_disability(DisabilityDegree::Moderate),
                Dependent::new(31).with_disability(DisabilityDegree::Severe),
            ]
        );
    }

    #[test]
    fn empty_dependent_list_is_empty() {
        assert!(parse_dependents(" ; ", 1).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_dependent() {
        let error = parse_dependents("4;ten", 3).unwrap_err();

        assert_eq!(error.to_string(), "invalid dependent '4;ten' on row 3");
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    #[test]
    fn minimal_row_takes_profile_defaults() {
        let entries = load_from_str(MINIMAL_CSV).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "ana");
        assert_eq!(
            entries[0].profile,
            TaxpayerProfile::default().with_gross_annual(dec!(30000))
        );
        assert_eq!(entries[0].computation(), Computation::NetFromGross);
    }

    #[test]
    fn loads_mixed_rows_in_order() {
        let entries = load_from_str(MIXED_CSV).unwrap();

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[1].computation(), Computation::GrossFromNet);
        assert_eq!(entries[1].profile.marital_status, MaritalStatus::Single);

        let eva = &entries[2].profile;
        assert_eq!(eva.contract_type, ContractType::Temporary);
        assert_eq!(eva.professional_category, ProfessionalCategory::Labourers);
        assert_eq!(eva.children.len(), 2);
        assert_eq!(
            eva.ascendants,
            vec![Dependent::new(81).with_disability(DisabilityDegree::Severe)]
        );
        assert_eq!(eva.ascendant_sharing_count, 2);
    }

    #[test]
    fn missing_id_defaults_to_row_number() {
        let entries = load_from_str("gross_annual\n30000\n40000\n").unwrap();

        assert_eq!(entries[1].id, "2");
        assert_eq!(entries[1].row, 2);
    }

    #[test]
    fn unknown_category_code_is_a_csv_error() {
        let result = load_from_str("id,gross_annual,professional_category\nx,30000,Z\n");

        assert!(matches!(result, Err(BatchError::Csv(_))));
    }

    #[test]
    fn bad_dependent_reports_row() {
        let result = load_from_str("id,gross_annual,children\na,30000,1\nb,30000,x\n");

        assert!(matches!(
            result,
            Err(BatchError::InvalidDependent { row: 2, .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Computing
    // -----------------------------------------------------------------------

    #[test]
    fn computes_each_row_and_keeps_failures() {
        let entries = load_from_str(MIXED_CSV).unwrap();

        let rows = compute_all(&SalaryCalculator::default(), &entries);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].net_monthly, Some(dec!(1631.39)));
        assert_eq!(rows[0].withholding_rate, Some(dec!(0.1646)));
        assert_eq!(rows[0].iterations, None);

        let solved = rows[1].net_monthly.unwrap();
        assert!((solved - dec!(1560)).abs() <= dec!(0.1));
        assert!(rows[1].iterations.is_some());

        assert!(!rows[2].is_error());
        assert_eq!(rows[2].bonus_pay_period_amount, None);

        assert!(rows[3].is_error());
        assert_eq!(
            rows[3].error.as_deref(),
            Some("age must be at least 16, got 15")
        );
    }

    #[test]
    fn largest_sharing_count_does_not_stop_the_batch() {
        let entries = load_from_str(
            "id,gross_annual,ascendants,ascendant_sharing_count\n\
             a,30000,80s,4294967295\n\
             b,30000,,\n",
        )
        .unwrap();

        let rows = compute_all(&SalaryCalculator::default(), &entries);

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| !row.is_error()));
    }

    #[test]
    fn row_without_any_salary_is_rejected() {
        let entries = load_from_str("id,age\nnobody,40\n").unwrap();

        let rows = compute_all(&SalaryCalculator::default(), &entries);

        assert_eq!(
            rows[0].error.as_deref(),
            Some("gross annual salary must be greater than zero")
        );
    }

    #[test]
    fn writes_header_and_empty_cells() {
        let entries = load_from_str("id,gross_annual,age\nkid,30000,15\n").unwrap();
        let rows = compute_all(&SalaryCalculator::default(), &entries);

        let mut buffer = Vec::new();
        write_results(&rows, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "id,gross_annual,net_annual,net_monthly,bonus_pay_period_amount,\
             withholding_amount,withholding_rate,social_security,iterations,error\n\
             kid,,,,,,,,,\"age must be at least 16, got 15\"\n"
        );
    }
}
