use crate::catalog::model::{
    CrossReference, CrossReferenceMapping, DataMapping, DataSource, DataSourceAttribute, DataSystem, FilterCondition,
    SrcmCanonical,
};
use crate::util::error::{CpError, CpResult};

fn deserialize_named<T: serde::de::DeserializeOwned>(
    kind: &'static str,
    name: &str,
    node: &serde_yaml_ng::Value,
) -> CpResult<T> {
    serde_yaml_ng::from_value(node.clone())
        .map_err(|e| CpError::ConfigError(kind, format!("{} `{}`: {}", kind, name, e)))
}

pub fn parse_data_system(name: &str, node: &serde_yaml_ng::Value) -> CpResult<DataSystem> {
    let mut x: DataSystem = deserialize_named("data_system", name, node)?;
    x.id = name.to_owned();
    Ok(x)
}

pub fn parse_data_source(name: &str, node: &serde_yaml_ng::Value) -> CpResult<DataSource> {
    let mut x: DataSource = deserialize_named("data_source", name, node)?;
    x.id = name.to_owned();
    Ok(x)
}

pub fn parse_data_source_attribute(name: &str, node: &serde_yaml_ng::Value) -> CpResult<DataSourceAttribute> {
    let mut x: DataSourceAttribute = deserialize_named("data_source_attribute", name, node)?;
    x.id = name.to_owned();
    Ok(x)
}

pub fn parse_cross_reference(name: &str, node: &serde_yaml_ng::Value) -> CpResult<CrossReference> {
    let mut x: CrossReference = deserialize_named("cross_reference", name, node)?;
    x.id = name.to_owned();
    Ok(x)
}

pub fn parse_cross_reference_mapping(name: &str, node: &serde_yaml_ng::Value) -> CpResult<CrossReferenceMapping> {
    let mut x: CrossReferenceMapping = deserialize_named("cross_reference_mapping", name, node)?;
    x.id = name.to_owned();
    if x.source_data_source == x.target_data_source {
        return Err(CpError::ConfigError(
            "cross_reference_mapping",
            format!(
                "`{}`: sourceDataSource and targetDataSource must differ, got `{}`",
                name, x.source_data_source
            ),
        ));
    }
    Ok(x)
}

pub fn parse_srcm_canonical(name: &str, node: &serde_yaml_ng::Value) -> CpResult<SrcmCanonical> {
    let mut x: SrcmCanonical = deserialize_named("srcm_canonical", name, node)?;
    x.id = name.to_owned();
    Ok(x)
}

pub fn parse_data_mapping(name: &str, node: &serde_yaml_ng::Value) -> CpResult<DataMapping> {
    let mut x: DataMapping = deserialize_named("data_mapping", name, node)?;
    x.id = name.to_owned();
    Ok(x)
}

pub fn parse_filter_condition(name: &str, node: &serde_yaml_ng::Value) -> CpResult<FilterCondition> {
    let mut x: FilterCondition = deserialize_named("filter_condition", name, node)?;
    x.id = name.to_owned();
    Ok(x)
}
