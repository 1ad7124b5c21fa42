//! Closed code lists offered to a presentation layer as `(id, label)` pairs.
//!
//! Every list is a plain enum with a stable code. Codes are what a profile
//! file or CSV row carries; labels are the Spanish legal wording shown to the
//! user. Unknown codes are rejected when parsing rather than mapped to a
//! default entry.

use serde::{Deserialize, Serialize};

/// A code list entry that can be shown in a selector.
pub trait Selectable: Copy + 'static {
    /// Every entry, in display order.
    const ALL: &'static [Self];

    fn code(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn parse(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|item| item.code() == code)
    }

    fn selector_items() -> Vec<SelectorItem> {
        Self::ALL
            .iter()
            .map(|item| SelectorItem {
                id: item.code(),
                label: item.label(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectorItem {
    pub id: &'static str,
    pub label: &'static str,
}

/// All selector lists exposed by the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selectors {
    pub marital_status: Vec<SelectorItem>,
    pub professional_category: Vec<SelectorItem>,
    pub contract_type: Vec<SelectorItem>,
    pub family_situation: Vec<SelectorItem>,
}

impl Selectors {
    pub fn new() -> Self {
        Self {
            marital_status: MaritalStatus::selector_items(),
            professional_category: ProfessionalCategory::selector_items(),
            contract_type: ContractType::selector_items(),
            family_situation: FamilySituation::selector_items(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Marital status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    #[default]
    #[serde(alias = "1")]
    Widowed,
    #[serde(alias = "2")]
    Single,
    #[serde(alias = "3")]
    Divorced,
    #[serde(alias = "4")]
    LegallySeparated,
    #[serde(alias = "5")]
    Married,
}

impl MaritalStatus {
    pub fn is_married(&self) -> bool {
        matches!(self, Self::Married)
    }
}

impl Selectable for MaritalStatus {
    const ALL: &'static [Self] = &[
        Self::Widowed,
        Self::Single,
        Self::Divorced,
        Self::LegallySeparated,
        Self::Married,
    ];

    fn code(&self) -> &'static str {
        match self {
            Self::Widowed => "1",
            Self::Single => "2",
            Self::Divorced => "3",
            Self::LegallySeparated => "4",
            Self::Married => "5",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Widowed => "Viudo/a",
            Self::Single => "Soltero/a",
            Self::Divorced => "Divorciado/a",
            Self::LegallySeparated => "Separado/a legalmente",
            Self::Married => "Casado/a",
        }
    }
}

// =============================================================================
// Contract type
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContractType {
    #[default]
    #[serde(rename = "general")]
    General,
    /// Contracts shorter than twelve months.
    #[serde(rename = "temporal", alias = "temporary")]
    Temporary,
}

impl Selectable for ContractType {
    const ALL: &'static [Self] = &[Self::General, Self::Temporary];

    fn code(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Temporary => "temporal",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Temporary => "Inferior a 12 meses",
        }
    }
}

// =============================================================================
// Professional category
// =============================================================================

/// Social security contribution group. Each group has its own floor and
/// ceiling for the monthly contribution base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProfessionalCategory {
    #[default]
    #[serde(rename = "A")]
    EngineersAndGraduates,
    #[serde(rename = "B")]
    TechnicalEngineers,
    #[serde(rename = "C")]
    AdministrativeManagers,
    #[serde(rename = "D")]
    UnqualifiedAssistants,
    #[serde(rename = "E")]
    AdministrativeOfficers,
    #[serde(rename = "F")]
    Subordinates,
    #[serde(rename = "G")]
    AdministrativeAssistants,
    #[serde(rename = "H")]
    FirstAndSecondClassOfficers,
    #[serde(rename = "I")]
    ThirdClassOfficersAndSpecialists,
    #[serde(rename = "J")]
    Labourers,
    #[serde(rename = "K")]
    UnderEighteen,
}

impl ProfessionalCategory {
    pub const COUNT: usize = 11;

    /// Position in [`Selectable::ALL`], used to index per-category tables.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Selectable for ProfessionalCategory {
    const ALL: &'static [Self] = &[
        Self::EngineersAndGraduates,
        Self::TechnicalEngineers,
        Self::AdministrativeManagers,
        Self::UnqualifiedAssistants,
        Self::AdministrativeOfficers,
        Self::Subordinates,
        Self::AdministrativeAssistants,
        Self::FirstAndSecondClassOfficers,
        Self::ThirdClassOfficersAndSpecialists,
        Self::Labourers,
        Self::UnderEighteen,
    ];

    fn code(&self) -> &'static str {
        match self {
            Self::EngineersAndGraduates => "A",
            Self::TechnicalEngineers => "B",
            Self::AdministrativeManagers => "C",
            Self::UnqualifiedAssistants => "D",
            Self::AdministrativeOfficers => "E",
            Self::Subordinates => "F",
            Self::AdministrativeAssistants => "G",
            Self::FirstAndSecondClassOfficers => "H",
            Self::ThirdClassOfficersAndSpecialists => "I",
            Self::Labourers => "J",
            Self::UnderEighteen => "K",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::EngineersAndGraduates => "Ingenieros y Licenciados",
            Self::TechnicalEngineers => "Ingenieros Técnicos, Peritos y Ayudantes Titulados",
            Self::AdministrativeManagers => "Jefes Administrativos y de Taller",
            Self::UnqualifiedAssistants => "Ayudantes no Titulados",
            Self::AdministrativeOfficers => "Oficiales Administrativos",
            Self::Subordinates => "Subalternos",
            Self::AdministrativeAssistants => "Auxiliares Administrativos",
            Self::FirstAndSecondClassOfficers => "Oficiales de primera y segunda",
            Self::ThirdClassOfficersAndSpecialists => "Oficiales de tercera y Especialistas",
            Self::Labourers => "Peones",
            Self::UnderEighteen => "Trabajadores menores de dieciocho años, cualquiera",
        }
    }
}

// =============================================================================
// Family situation
// =============================================================================

/// Family situation used by the minimum-income exemption table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FamilySituation {
    /// Unmarried taxpayer with at least one qualifying descendant.
    #[serde(rename = "A")]
    SingleParent,
    /// Married taxpayer whose spouse earns 1,500 a year or less.
    #[serde(rename = "B")]
    DependentSpouse,
    #[serde(rename = "C")]
    Other,
}

impl Selectable for FamilySituation {
    const ALL: &'static [Self] = &[Self::SingleParent, Self::DependentSpouse, Self::Other];

    fn code(&self) -> &'static str {
        match self {
            Self::SingleParent => "A",
            Self::DependentSpouse => "B",
            Self::Other => "C",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::SingleParent => {
                "A: Contribuyente viudo, divorciado, separado legalmente o soltero, con hijos \
                 menores de 18 años o mayores incapacitados sujetos a patria potestad que \
                 convivan exclusivamente con él."
            }
            Self::DependentSpouse => {
                "B: Contribuyente con cónyuge a cargo, que estando casado y no separado \
                 legalmente, su cónyuge no obtiene rentas anuales superiores a 1.500 euros, \
                 incluidas las exentas."
            }
            Self::Other => "C: Contribuyente que no se encuentra en ninguno de los casos anteriores.",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_every_listed_code() {
        for status in MaritalStatus::ALL {
            assert_eq!(MaritalStatus::parse(status.code()), Some(*status));
        }
        for category in ProfessionalCategory::ALL {
            assert_eq!(ProfessionalCategory::parse(category.code()), Some(*category));
        }
        for contract in ContractType::ALL {
            assert_eq!(ContractType::parse(contract.code()), Some(*contract));
        }
    }

    #[test]
    fn parse_rejects_unknown_codes() {
        assert_eq!(MaritalStatus::parse("6"), None);
        assert_eq!(ProfessionalCategory::parse("Z"), None);
        assert_eq!(ContractType::parse("indefinido"), None);
    }

    #[test]
    fn category_index_matches_list_position() {
        assert_eq!(ProfessionalCategory::ALL.len(), ProfessionalCategory::COUNT);
        for (position, category) in ProfessionalCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), position);
        }
    }

    #[test]
    fn defaults_are_first_entries() {
        assert_eq!(MaritalStatus::default(), MaritalStatus::ALL[0]);
        assert_eq!(ContractType::default(), ContractType::ALL[0]);
        assert_eq!(ProfessionalCategory::default(), ProfessionalCategory::ALL[0]);
    }

    #[test]
    fn selectors_expose_id_label_pairs() {
        let selectors = Selectors::new();

        assert_eq!(selectors.marital_status.len(), 5);
        assert_eq!(selectors.professional_category.len(), 11);
        assert_eq!(selectors.contract_type.len(), 2);
        assert_eq!(selectors.family_situation.len(), 3);
        assert_eq!(Selectors::default(), selectors);
        assert_eq!(
            selectors.marital_status[1],
            SelectorItem {
                id: "2",
                label: "Soltero/a"
            }
        );
        assert!(
            selectors
                .professional_category
                .iter()
                .chain(&selectors.contract_type)
                .all(|item| !item.id.is_empty() && !item.label.is_empty())
        );
    }
}
