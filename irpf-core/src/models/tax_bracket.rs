use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the withholding scale.
///
/// Brackets are half-open `[min_base, max_base)`; the last one has no upper
/// bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_base: Decimal,
    pub max_base: Option<Decimal>,
    pub base_quota: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn contains(
        &self,
        amount: Decimal,
    ) -> bool {
        self.min_base <= amount && self.max_base.is_none_or(|max| amount < max)
    }
}
