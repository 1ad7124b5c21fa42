use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use irpf_cli::{batch, logging, profile_file, report};
use irpf_core::{SalaryCalculator, Selectors, TaxpayerProfile};
use irpf_cli::profile_file::SalaryOverrides;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Spanish IRPF payroll calculator.
///
/// Computes withholding, social security and net pay for an employee, or
/// the gross salary needed to reach a net monthly target.
#[derive(Debug, Parser)]
#[command(name = "irpf", version)]
struct Cli {
    /// Log filter: a level (`debug`) or EnvFilter directives
    /// (`warn,irpf_core=trace`). Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Net pay for a gross annual salary.
    Net {
        /// TOML taxpayer profile.
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Overrides `gross_annual` from the profile.
        #[arg(long)]
        gross_annual: Option<Decimal>,
    },

    /// Gross annual salary for a net monthly target.
    Gross {
        /// TOML taxpayer profile.
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Overrides `net_monthly` from the profile.
        #[arg(long)]
        net_monthly: Option<Decimal>,
    },

    /// Computes every row of a CSV file.
    Batch {
        /// Input CSV, one employee per row.
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lists the codes accepted for each selector.
    Selectors,
}

// ─── helpers ─────────────────────────────────────────────────────────────────

fn read_profile(
    path: Option<&Path>,
    overrides: SalaryOverrides,
) -> anyhow::Result<TaxpayerProfile> {
    profile_file::resolve_profile(path, overrides).context("Failed to load profile")
}

fn run_batch(
    calculator: &SalaryCalculator<'_>,
    input: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let entries = batch::load_from_file(input)
        .with_context(|| format!("Failed to read batch input {}", input.display()))?;
    let rows = batch::compute_all(calculator, &entries);

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            batch::write_results(&rows, file)?;
            println!(
                "Wrote {} rows to {} ({} rejected)",
                rows.len(),
                path.display(),
                rows.iter().filter(|row| row.is_error()).count()
            );
        }
        None => batch::write_results(&rows, io::stdout().lock())?,
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;
    debug!(command = ?cli.command, "Starting");

    let calculator = SalaryCalculator::default();

    match cli.command {
        Command::Net {
            profile,
            gross_annual,
        } => {
            let overrides = SalaryOverrides {
                gross_annual,
                ..SalaryOverrides::default()
            };
            let profile = read_profile(profile.as_deref(), overrides)?;
            let salary = calculator
                .compute_net_salary(&profile)
                .context("Cannot compute net salary")?;
            print!("{}", report::render_salary(&salary, calculator.tables().tax_year));
        }
        Command::Gross {
            profile,
            net_monthly,
        } => {
            let overrides = SalaryOverrides {
                net_monthly,
                ..SalaryOverrides::default()
            };
            let profile = read_profile(profile.as_deref(), overrides)?;
            let result = calculator
                .compute_gross_salary(&profile)
                .context("Cannot compute gross salary")?;
            print!("{}", report::render_gross(&result, calculator.tables().tax_year));
        }
        Command::Batch { input, output } => {
            run_batch(&calculator, &input, output.as_deref())?;
        }
        Command::Selectors => {
            print!("{}", report::render_selectors(&Selectors::new()));
        }
    }

    Ok(())
}
