pub mod model;
pub mod parser;
pub mod store;

pub use model::{
    CrossReference, CrossReferenceMapping, DataMapping, DataSource, DataSourceAttribute, DataSystem, DataType,
    FilterCondition, FilterOperator, SrcmCanonical,
};
pub use store::CatalogStore;
