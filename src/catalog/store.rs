use std::collections::{HashMap, HashSet};

use crate::catalog::model::{
    CrossReference, CrossReferenceMapping, DataMapping, DataSource, DataSourceAttribute, DataSystem, FilterCondition,
    SrcmCanonical,
};
use crate::catalog::parser::common::{pack_configs_from_files, read_configs};
use crate::catalog::parser::entities::{
    parse_cross_reference, parse_cross_reference_mapping, parse_data_mapping, parse_data_source,
    parse_data_source_attribute, parse_data_system, parse_filter_condition, parse_srcm_canonical,
};
use crate::util::error::{CpError, CpResult};

/// Read-only catalog snapshot. The engine never mutates this; an extraction
/// takes one snapshot at "LoadCatalog" and never re-reads it.
#[derive(Clone, Debug, Default)]
pub struct CatalogStore {
    pub data_systems: Vec<DataSystem>,
    pub data_sources: Vec<DataSource>,
    pub data_source_attributes: Vec<DataSourceAttribute>,
    pub cross_references: Vec<CrossReference>,
    pub cross_reference_mappings: Vec<CrossReferenceMapping>,
    /// Insertion order = catalog order.
    pub srcm_canonicals: Vec<SrcmCanonical>,
    pub data_mappings: Vec<DataMapping>,
    pub filter_conditions: Vec<FilterCondition>,
}

const EXT: &[&str] = &["yml", "yaml"];

impl CatalogStore {
    /// Loads every `.yml`/`.yaml` file under `dir` (path-sorted) into a
    /// validated catalog snapshot.
    pub fn load_dir(dir: &str) -> CpResult<CatalogStore> {
        let paths = read_configs(dir, EXT)?;
        let mut pack = pack_configs_from_files(&paths)?;
        let mut store = CatalogStore::default();

        for (name, node) in pack.remove("data_system").unwrap_or_default() {
            store.data_systems.push(parse_data_system(&name, &node)?);
        }
        for (name, node) in pack.remove("data_source").unwrap_or_default() {
            store.data_sources.push(parse_data_source(&name, &node)?);
        }
        for (name, node) in pack.remove("data_source_attribute").unwrap_or_default() {
            store.data_source_attributes.push(parse_data_source_attribute(&name, &node)?);
        }
        for (name, node) in pack.remove("cross_reference").unwrap_or_default() {
            store.cross_references.push(parse_cross_reference(&name, &node)?);
        }
        for (name, node) in pack.remove("cross_reference_mapping").unwrap_or_default() {
            store
                .cross_reference_mappings
                .push(parse_cross_reference_mapping(&name, &node)?);
        }
        for (name, node) in pack.remove("srcm_canonical").unwrap_or_default() {
            store.srcm_canonicals.push(parse_srcm_canonical(&name, &node)?);
        }
        for (name, node) in pack.remove("data_mapping").unwrap_or_default() {
            store.data_mappings.push(parse_data_mapping(&name, &node)?);
        }
        for (name, node) in pack.remove("filter_condition").unwrap_or_default() {
            store.filter_conditions.push(parse_filter_condition(&name, &node)?);
        }

        store.validate()?;
        Ok(store)
    }

    fn validate(&self) -> CpResult<()> {
        let system_ids: HashSet<&str> = self.data_systems.iter().map(|x| x.id.as_str()).collect();
        let source_ids: HashSet<&str> = self.data_sources.iter().map(|x| x.id.as_str()).collect();
        let attr_ids: HashSet<&str> = self.data_source_attributes.iter().map(|x| x.id.as_str()).collect();
        let xr_ids: HashSet<&str> = self.cross_references.iter().map(|x| x.id.as_str()).collect();
        let canonical_ids: HashSet<&str> = self.srcm_canonicals.iter().map(|x| x.id.as_str()).collect();

        assert_unique("data_system", self.data_systems.iter().map(|x| x.name.as_str()))?;
        assert_unique("data_source", self.data_sources.iter().map(|x| x.name.as_str()))?;
        assert_unique("cross_reference", self.cross_references.iter().map(|x| x.name.as_str()))?;
        assert_unique(
            "filter_condition",
            self.filter_conditions.iter().map(|x| x.name.as_str()),
        )?;

        for ds in &self.data_sources {
            require(system_ids.contains(ds.data_system.as_str()), || {
                format!("DataSource `{}` references unknown DataSystem `{}`", ds.id, ds.data_system)
            })?;
        }
        for attr in &self.data_source_attributes {
            require(source_ids.contains(attr.data_source.as_str()), || {
                format!(
                    "DataSourceAttribute `{}` references unknown DataSource `{}`",
                    attr.id, attr.data_source
                )
            })?;
        }
        for xr in &self.cross_references {
            require(system_ids.contains(xr.data_system.as_str()), || {
                format!("CrossReference `{}` references unknown DataSystem `{}`", xr.id, xr.data_system)
            })?;
        }
        for m in &self.cross_reference_mappings {
            require(xr_ids.contains(m.cross_reference.as_str()), || {
                format!("CrossReferenceMapping `{}` references unknown CrossReference `{}`", m.id, m.cross_reference)
            })?;
            require(source_ids.contains(m.source_data_source.as_str()), || {
                format!("CrossReferenceMapping `{}` references unknown source DataSource `{}`", m.id, m.source_data_source)
            })?;
            require(source_ids.contains(m.target_data_source.as_str()), || {
                format!("CrossReferenceMapping `{}` references unknown target DataSource `{}`", m.id, m.target_data_source)
            })?;
            require(attr_ids.contains(m.source_attribute.as_str()), || {
                format!("CrossReferenceMapping `{}` references unknown source attribute `{}`", m.id, m.source_attribute)
            })?;
            require(attr_ids.contains(m.target_attribute.as_str()), || {
                format!("CrossReferenceMapping `{}` references unknown target attribute `{}`", m.id, m.target_attribute)
            })?;
        }
        for dm in &self.data_mappings {
            require(system_ids.contains(dm.data_system.as_str()), || {
                format!("DataMapping `{}` references unknown DataSystem `{}`", dm.id, dm.data_system)
            })?;
            require(canonical_ids.contains(dm.srcm_canonical.as_str()), || {
                format!("DataMapping `{}` references unknown SrcmCanonical `{}`", dm.id, dm.srcm_canonical)
            })?;
            require(source_ids.contains(dm.primary_data_source.as_str()), || {
                format!("DataMapping `{}` references unknown primary DataSource `{}`", dm.id, dm.primary_data_source)
            })?;
            require(attr_ids.contains(dm.primary_attribute.as_str()), || {
                format!("DataMapping `{}` references unknown primary attribute `{}`", dm.id, dm.primary_attribute)
            })?;
            if let Some(sec_ds) = &dm.secondary_data_source {
                require(source_ids.contains(sec_ds.as_str()), || {
                    format!("DataMapping `{}` references unknown secondary DataSource `{}`", dm.id, sec_ds)
                })?;
            }
            if let Some(sec_attr) = &dm.secondary_attribute {
                require(attr_ids.contains(sec_attr.as_str()), || {
                    format!("DataMapping `{}` references unknown secondary attribute `{}`", dm.id, sec_attr)
                })?;
            }
        }
        for fc in &self.filter_conditions {
            require(system_ids.contains(fc.data_system.as_str()), || {
                format!("FilterCondition `{}` references unknown DataSystem `{}`", fc.id, fc.data_system)
            })?;
            require(source_ids.contains(fc.data_source.as_str()), || {
                format!("FilterCondition `{}` references unknown DataSource `{}`", fc.id, fc.data_source)
            })?;
            require(attr_ids.contains(fc.attribute.as_str()), || {
                format!("FilterCondition `{}` references unknown attribute `{}`", fc.id, fc.attribute)
            })?;
        }
        Ok(())
    }

    pub fn data_system(&self, id: &str) -> Option<&DataSystem> {
        self.data_systems.iter().find(|x| x.id == id)
    }

    pub fn data_system_by_name(&self, name: &str) -> Option<&DataSystem> {
        self.data_systems.iter().find(|x| x.name == name)
    }

    pub fn data_sources_by_system(&self, system_id: &str) -> Vec<&DataSource> {
        self.data_sources.iter().filter(|x| x.data_system == system_id).collect()
    }

    pub fn active_masters(&self, system_id: &str) -> Vec<&DataSource> {
        self.data_sources_by_system(system_id)
            .into_iter()
            .filter(|x| x.active && x.is_master)
            .collect()
    }

    pub fn data_source(&self, id: &str) -> Option<&DataSource> {
        self.data_sources.iter().find(|x| x.id == id)
    }

    pub fn attributes_by_data_source(&self, ds_id: &str) -> Vec<&DataSourceAttribute> {
        self.data_source_attributes
            .iter()
            .filter(|x| x.data_source == ds_id)
            .collect()
    }

    pub fn attribute(&self, id: &str) -> Option<&DataSourceAttribute> {
        self.data_source_attributes.iter().find(|x| x.id == id)
    }

    pub fn cross_references(&self, system_id: Option<&str>) -> Vec<&CrossReference> {
        self.cross_references
            .iter()
            .filter(|x| system_id.is_none_or(|s| x.data_system == s))
            .collect()
    }

    pub fn mappings_by_cross_reference(&self, xr_id: &str) -> Vec<&CrossReferenceMapping> {
        self.cross_reference_mappings
            .iter()
            .filter(|x| x.cross_reference == xr_id)
            .collect()
    }

    pub fn data_mappings_by_system(&self, system_id: &str) -> Vec<&DataMapping> {
        self.data_mappings.iter().filter(|x| x.data_system == system_id).collect()
    }

    pub fn data_mapping_for(&self, system_id: &str, canonical_id: &str) -> Option<&DataMapping> {
        self.data_mappings
            .iter()
            .find(|x| x.data_system == system_id && x.srcm_canonical == canonical_id)
    }

    pub fn srcm_canonicals(&self) -> &[SrcmCanonical] {
        &self.srcm_canonicals
    }
}

fn assert_unique<'a>(kind: &'static str, names: impl Iterator<Item = &'a str>) -> CpResult<()> {
    let mut seen: HashMap<&str, ()> = HashMap::new();
    for name in names {
        if seen.insert(name, ()).is_some() {
            return Err(CpError::CatalogInconsistent(kind, format!("Duplicate name `{}`", name)));
        }
    }
    Ok(())
}

fn require(cond: bool, msg: impl FnOnce() -> String) -> CpResult<()> {
    if cond {
        Ok(())
    } else {
        Err(CpError::CatalogInconsistent("catalog.store", msg()))
    }
}
