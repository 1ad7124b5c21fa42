mod dependent;
mod salary_result;
mod selectors;
mod tax_bracket;
mod taxpayer_profile;

pub use dependent::{Dependent, DisabilityDegree};
pub use salary_result::{GrossSalaryResult, SalaryResult};
pub use selectors::{
    ContractType, FamilySituation, MaritalStatus, ProfessionalCategory, Selectable, SelectorItem,
    Selectors,
};
pub use tax_bracket::TaxBracket;
pub use taxpayer_profile::TaxpayerProfile;
