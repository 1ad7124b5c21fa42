use serde::{Deserialize, Serialize};

/// Officially recognised degree of disability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabilityDegree {
    /// Between 33% and 65%.
    Moderate,
    /// Above 65%.
    Severe,
}

/// A child or ascendant living with the taxpayer.
///
/// The role is given by the list the record belongs to
/// ([`TaxpayerProfile::children`](crate::TaxpayerProfile::children) or
/// [`TaxpayerProfile::ascendants`](crate::TaxpayerProfile::ascendants)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    pub age: u32,
    #[serde(default)]
    pub disability: Option<DisabilityDegree>,
}

impl Dependent {
    pub fn new(age: u32) -> Self {
        Self {
            age,
            disability: None,
        }
    }

    pub fn with_disability(
        mut self,
        degree: DisabilityDegree,
    ) -> Self {
        self.disability = Some(degree);
        self
    }

    pub fn is_disabled(&self) -> bool {
        self.disability.is_some()
    }
}
