use serde::Deserialize;

/// A named container for data sources.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DataSystem {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// A named logical table belonging to one DataSystem.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DataSource {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub data_system: String,
    pub file_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub is_master: bool,
}

/// The declared dtype of a `DataSourceAttribute`; `Unspecified` is the
/// catalog default and also what an absent `data_type` field means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Date,
    Unspecified,
}

impl Default for DataType {
    fn default() -> Self {
        DataType::Unspecified
    }
}

/// A named column of a DataSource. `name` is the CSV header this attribute
/// is matched against.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DataSourceAttribute {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub data_source: String,
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default)]
    pub format: Option<String>,
}

/// A named declaration that two data sources of the same DataSystem are
/// joinable.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CrossReference {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub data_system: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

/// A single equality edge inside a CrossReference.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CrossReferenceMapping {
    #[serde(skip)]
    pub id: String,
    pub cross_reference: String,
    pub source_data_source: String,
    pub source_attribute: String,
    pub target_data_source: String,
    pub target_attribute: String,
}

/// An entry in the global canonical vocabulary. Not scoped to any
/// DataSystem.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SrcmCanonical {
    #[serde(skip)]
    pub id: String,
    pub name: String,
}

/// One binding of a canonical attribute to a primary and optional secondary
/// `(data source, attribute)` pair, per DataSystem.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DataMapping {
    #[serde(skip)]
    pub id: String,
    pub data_system: String,
    pub srcm_canonical: String,
    pub primary_data_source: String,
    pub primary_attribute: String,
    #[serde(default)]
    pub secondary_data_source: Option<String>,
    #[serde(default)]
    pub secondary_attribute: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
}

/// Stored and CRUD-managed, but not applied during extraction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FilterCondition {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub data_system: String,
    pub data_source: String,
    pub attribute: String,
    pub operator: FilterOperator,
    pub value: String,
}

fn default_true() -> bool {
    true
}
