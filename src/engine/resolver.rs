use std::collections::HashMap;

use crate::catalog::{CatalogStore, DataSource, SrcmCanonical};
use crate::engine::reference_index::ReferenceIndex;
use crate::format::format_value;

/// Resolves one canonical attribute `c` for one master row, per the
/// primary/secondary fallback rule.
pub fn resolve_canonical(
    store: &CatalogStore,
    system_id: &str,
    canonical: &SrcmCanonical,
    master: &DataSource,
    master_row: &HashMap<String, String>,
    reference_indexes: &HashMap<String, ReferenceIndex>,
) -> String {
    let Some(mapping) = store.data_mapping_for(system_id, &canonical.id) else {
        return String::new();
    };

    let primary = resolve_single(
        store,
        system_id,
        &mapping.primary_data_source,
        &mapping.primary_attribute,
        master,
        master_row,
        reference_indexes,
    );
    if !primary.is_empty() {
        return primary;
    }

    match (&mapping.secondary_data_source, &mapping.secondary_attribute) {
        (Some(sec_ds), Some(sec_attr)) => resolve_single(store, system_id, sec_ds, sec_attr, master, master_row, reference_indexes),
        _ => String::new(),
    }
}

/// `resolve(dsId, attrId, masterRow, M)`.
fn resolve_single(
    store: &CatalogStore,
    system_id: &str,
    ds_id: &str,
    attr_id: &str,
    master: &DataSource,
    master_row: &HashMap<String, String>,
    reference_indexes: &HashMap<String, ReferenceIndex>,
) -> String {
    let Some(attr) = store.attribute(attr_id) else {
        return String::new();
    };

    if ds_id == master.id {
        let raw = master_row.get(&attr.name).cloned().unwrap_or_default();
        let (value, date_parse_failed) = format_value(&raw, attr.data_type, attr.format.as_deref());
        if date_parse_failed {
            log::warn!(
                "date parse failure on master `{}` attribute `{}`: value `{}` matched no grammar",
                master.id,
                attr.name,
                raw
            );
        }
        return value;
    }

    let Some(reference_index) = reference_indexes.get(ds_id) else {
        return String::new();
    };

    for cross_reference in store.cross_references(Some(system_id)) {
        for candidate in store.mappings_by_cross_reference(&cross_reference.id) {
            if candidate.source_data_source != master.id || candidate.target_data_source != ds_id {
                continue;
            }
            let (Some(source_attr), Some(target_attr)) =
                (store.attribute(&candidate.source_attribute), store.attribute(&candidate.target_attribute))
            else {
                continue;
            };
            let has_source_column = master_row.contains_key(&source_attr.name);
            let has_target_column = reference_index.has_column(&target_attr.name);
            if !has_source_column || !has_target_column {
                log::warn!(
                    "cross-reference mapping `{}` names an attribute absent from its CSV header; skipping",
                    candidate.id
                );
                continue;
            }

            // First usable mapping commits: either it resolves, or the join
            // misses and the attribute is empty, but we do not fall
            // through to a later mapping.
            let join_value = master_row.get(&source_attr.name).expect("checked above");
            return match reference_index.find_row(&target_attr.name, join_value) {
                Some(reference_row) => {
                    let raw = reference_row.get(&attr.name).cloned().unwrap_or_default();
                    let (value, date_parse_failed) = format_value(&raw, attr.data_type, attr.format.as_deref());
                    if date_parse_failed {
                        log::warn!(
                            "date parse failure on reference `{}` attribute `{}`: value `{}` matched no grammar",
                            ds_id,
                            attr.name,
                            raw
                        );
                    }
                    value
                }
                None => String::new(),
            };
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{CrossReference, CrossReferenceMapping, DataMapping, DataSourceAttribute, DataSystem};
    use crate::csv::CsvTable;

    fn store_with_join() -> CatalogStore {
        let mut store = CatalogStore::default();
        store.data_systems.push(DataSystem { id: "sys".into(), name: "Sys".into(), active: true });
        store.data_sources.push(DataSource {
            id: "encounters".into(),
            name: "Encounters".into(),
            data_system: "sys".into(),
            file_name: "encounters.csv".into(),
            description: String::new(),
            active: true,
            is_master: true,
        });
        store.data_sources.push(DataSource {
            id: "patients".into(),
            name: "Patients".into(),
            data_system: "sys".into(),
            file_name: "patients.csv".into(),
            description: String::new(),
            active: true,
            is_master: false,
        });
        store.data_source_attributes.push(DataSourceAttribute {
            id: "enc_pid".into(),
            name: "pid".into(),
            data_source: "encounters".into(),
            data_type: crate::catalog::model::DataType::Unspecified,
            format: None,
        });
        store.data_source_attributes.push(DataSourceAttribute {
            id: "enc_eid".into(),
            name: "eid".into(),
            data_source: "encounters".into(),
            data_type: crate::catalog::model::DataType::Unspecified,
            format: None,
        });
        store.data_source_attributes.push(DataSourceAttribute {
            id: "pat_pid".into(),
            name: "pid".into(),
            data_source: "patients".into(),
            data_type: crate::catalog::model::DataType::Unspecified,
            format: None,
        });
        store.data_source_attributes.push(DataSourceAttribute {
            id: "pat_name".into(),
            name: "name".into(),
            data_source: "patients".into(),
            data_type: crate::catalog::model::DataType::Unspecified,
            format: None,
        });
        store.cross_references.push(CrossReference { id: "xr1".into(), name: "XR".into(), data_system: "sys".into(), active: true });
        store.cross_reference_mappings.push(CrossReferenceMapping {
            id: "map1".into(),
            cross_reference: "xr1".into(),
            source_data_source: "encounters".into(),
            source_attribute: "enc_pid".into(),
            target_data_source: "patients".into(),
            target_attribute: "pat_pid".into(),
        });
        store.srcm_canonicals.push(SrcmCanonical { id: "patient_name_canon".into(), name: "PatientName".into() });
        store.data_mappings.push(DataMapping {
            id: "dm1".into(),
            data_system: "sys".into(),
            srcm_canonical: "patient_name_canon".into(),
            primary_data_source: "patients".into(),
            primary_attribute: "pat_name".into(),
            secondary_data_source: None,
            secondary_attribute: None,
        });
        store
    }

    #[test]
    fn valid_cross_reference_join_resolves_name() {
        let store = store_with_join();
        let master = store.data_source("encounters").unwrap().clone();
        let master_row: HashMap<String, String> =
            [("pid".to_string(), "P1".to_string()), ("eid".to_string(), "E9".to_string())].into_iter().collect();
        let patients_table = CsvTable {
            columns: vec!["pid".to_string(), "name".to_string()],
            rows: vec![[("pid".to_string(), "P1".to_string()), ("name".to_string(), "Ada".to_string())]
                .into_iter()
                .collect()],
        };
        let mut reference_indexes = HashMap::new();
        reference_indexes.insert("patients".to_string(), ReferenceIndex::build("patients", patients_table));

        let canonical = store.srcm_canonicals()[0].clone();
        let value = resolve_canonical(&store, "sys", &canonical, &master, &master_row, &reference_indexes);
        assert_eq!(value, "Ada");
    }

    #[test]
    fn valid_missing_reference_payload_yields_empty() {
        let store = store_with_join();
        let master = store.data_source("encounters").unwrap().clone();
        let master_row: HashMap<String, String> =
            [("pid".to_string(), "P1".to_string()), ("eid".to_string(), "E9".to_string())].into_iter().collect();
        let reference_indexes = HashMap::new();
        let canonical = store.srcm_canonicals()[0].clone();
        let value = resolve_canonical(&store, "sys", &canonical, &master, &master_row, &reference_indexes);
        assert_eq!(value, "");
    }

    #[test]
    fn valid_no_data_mapping_yields_empty() {
        let store = store_with_join();
        let master = store.data_source("encounters").unwrap().clone();
        let master_row: HashMap<String, String> = HashMap::new();
        let reference_indexes = HashMap::new();
        let unmapped = SrcmCanonical { id: "diagnosis".into(), name: "Diagnosis".into() };
        let value = resolve_canonical(&store, "sys", &unmapped, &master, &master_row, &reference_indexes);
        assert_eq!(value, "");
    }

    /// SPEC_FULL.md §8 scenario 2: primary resolution yields nothing (its
    /// data source has no reference index, i.e. no uploaded payload) so the
    /// resolver falls through to secondary, which resolves on the master
    /// itself.
    #[test]
    fn valid_primary_missing_falls_through_to_secondary() {
        let mut store = CatalogStore::default();
        store.data_systems.push(DataSystem { id: "sys".into(), name: "Sys".into(), active: true });
        store.data_sources.push(DataSource {
            id: "patients".into(),
            name: "Patients".into(),
            data_system: "sys".into(),
            file_name: "patients.csv".into(),
            description: String::new(),
            active: true,
            is_master: true,
        });
        store.data_sources.push(DataSource {
            id: "lab_records".into(),
            name: "LabRecords".into(),
            data_system: "sys".into(),
            file_name: "lab_records.csv".into(),
            description: String::new(),
            active: true,
            is_master: false,
        });
        store.data_source_attributes.push(DataSourceAttribute {
            id: "dob_attr".into(),
            name: "dob".into(),
            data_source: "patients".into(),
            data_type: crate::catalog::model::DataType::Unspecified,
            format: None,
        });
        store.data_source_attributes.push(DataSourceAttribute {
            id: "collected_on_attr".into(),
            name: "collected_on".into(),
            data_source: "lab_records".into(),
            data_type: crate::catalog::model::DataType::Unspecified,
            format: None,
        });
        store.srcm_canonicals.push(SrcmCanonical { id: "birth_date_canon".into(), name: "BirthDate".into() });
        store.data_mappings.push(DataMapping {
            id: "dm_birth_date".into(),
            data_system: "sys".into(),
            srcm_canonical: "birth_date_canon".into(),
            primary_data_source: "lab_records".into(),
            primary_attribute: "collected_on_attr".into(),
            secondary_data_source: Some("patients".into()),
            secondary_attribute: Some("dob_attr".into()),
        });

        let master = store.data_source("patients").unwrap().clone();
        let master_row: HashMap<String, String> = [("dob".to_string(), "15-JAN-2020".to_string())].into_iter().collect();
        // `lab_records` has no entry here, standing in for "has no uploaded payload".
        let reference_indexes = HashMap::new();

        let canonical = store.srcm_canonicals()[0].clone();
        let value = resolve_canonical(&store, "sys", &canonical, &master, &master_row, &reference_indexes);
        assert_eq!(value, "15-JAN-2020");
    }
}
