//! Taxpayer profiles stored as TOML.
//!
//! Every key is optional; absent keys take the profile defaults.
//!
//! ```toml
//! gross_annual = 30000
//! pay_periods = 14
//! age = 45
//! marital_status = "single"
//! contract_type = "general"
//! professional_category = "A"
//!
//! [[children]]
//! age = 4
//!
//! [[ascendants]]
//! age = 80
//! disability = "moderate"
//! ```

use std::path::{Path, PathBuf};

use irpf_core::TaxpayerProfile;
use rust_decimal::Decimal;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ProfileFileError {
    #[error("cannot read profile '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad TOML, a wrong type, or an unknown selector code.
    #[error("invalid profile: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn parse_profile(input: &str) -> Result<TaxpayerProfile, ProfileFileError> {
    Ok(toml::from_str(input)?)
}

pub fn load_profile(path: &Path) -> Result<TaxpayerProfile, ProfileFileError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ProfileFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let profile = parse_profile(&contents)?;
    debug!(path = %path.display(), "Loaded taxpayer profile");
    Ok(profile)
}

/// Salary figures given on the command line; each one set replaces the
/// profile's own value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalaryOverrides {
    pub gross_annual: Option<Decimal>,
    pub net_monthly: Option<Decimal>,
}

impl SalaryOverrides {
    pub fn apply(
        self,
        mut profile: TaxpayerProfile,
    ) -> TaxpayerProfile {
        if let Some(gross_annual) = self.gross_annual {
            profile = profile.with_gross_annual(gross_annual);
        }
        if let Some(net_monthly) = self.net_monthly {
            profile = profile.with_net_monthly(net_monthly);
        }
        profile
    }
}

/// Loads the profile at `path`, or the default profile when there is none,
/// then applies `overrides`.
pub fn resolve_profile(
    path: Option<&Path>,
    overrides: SalaryOverrides,
) -> Result<TaxpayerProfile, ProfileFileError> {
    let profile = match path {
        Some(path) => load_profile(path)?,
        None => TaxpayerProfile::default(),
    };
    Ok(overrides.apply(profile))
}
