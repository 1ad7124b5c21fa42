use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ContractType, Dependent, DisabilityDegree, MaritalStatus, ProfessionalCategory};

/// Personal and employment circumstances of one employee.
///
/// Either `gross_annual` (for [`compute_net_salary`](crate::compute_net_salary))
/// or `net_monthly` (for [`compute_gross_salary`](crate::compute_gross_salary))
/// is the known figure; the other is ignored.
///
/// Deserializing fills every absent field from [`Default`], so a profile file
/// only needs to list what differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxpayerProfile {
    pub gross_annual: Option<Decimal>,
    pub net_monthly: Option<Decimal>,
    pub pay_periods: u32,
    pub age: u32,
    pub marital_status: MaritalStatus,
    /// Spouse earns more than 1,500 a year.
    pub spouse_earns_over_1500: bool,
    pub geographic_mobility: bool,
    pub disability: Option<DisabilityDegree>,
    pub children: Vec<Dependent>,
    /// The taxpayer alone has custody of the children.
    pub exclusive_custody: bool,
    pub ascendants: Vec<Dependent>,
    /// Number of people entitled to the ascendant allowance.
    pub ascendant_sharing_count: u32,
    pub contract_type: ContractType,
    pub professional_category: ProfessionalCategory,
}

impl Default for TaxpayerProfile {
    fn default() -> Self {
        Self {
            gross_annual: None,
            net_monthly: None,
            pay_periods: 12,
            age: 30,
            marital_status: MaritalStatus::default(),
            spouse_earns_over_1500: false,
            geographic_mobility: false,
            disability: None,
            children: Vec::new(),
            exclusive_custody: false,
            ascendants: Vec::new(),
            ascendant_sharing_count: 1,
            contract_type: ContractType::default(),
            professional_category: ProfessionalCategory::default(),
        }
    }
}

impl TaxpayerProfile {
    pub fn with_gross_annual(
        mut self,
        gross_annual: Decimal,
    ) -> Self {
        self.gross_annual = Some(gross_annual);
        self
    }

    pub fn with_net_monthly(
        mut self,
        net_monthly: Decimal,
    ) -> Self {
        self.net_monthly = Some(net_monthly);
        self
    }
}
