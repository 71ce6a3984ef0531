use std::collections::HashMap;

use crate::catalog::CatalogStore;
use crate::csv::{parse_csv, write_csv};
use crate::engine::reference_index::ReferenceIndex;
use crate::engine::resolver::resolve_canonical;
use crate::upload::UploadRegistry;
use crate::util::error::{CpError, CpResult};

/// Result of one successful extraction: the canonical header plus the
/// serialized CSV body ready to write to disk or return over the wire.
pub struct ExtractionOutcome {
    pub columns: Vec<String>,
    pub row_count: usize,
    pub csv_bytes: Vec<u8>,
}

/// Resolves `-s/--data-system`'s id-or-name CLI argument to a catalog id.
pub fn resolve_system_id(store: &CatalogStore, identifier: &str) -> CpResult<String> {
    store
        .data_system(identifier)
        .or_else(|| store.data_system_by_name(identifier))
        .map(|system| system.id.clone())
        .ok_or_else(|| CpError::BadInput(format!("no data system matches `{}`", identifier)))
}

/// Drives one extraction call end to end: `ValidateInput → LoadCatalog`
/// (assumed already done by the caller, via `store`) `→ EnumerateMasters →
/// PerMasterLoop → Emit`. `should_cancel` is polled between master
/// rows; returning `true` aborts before any output is emitted for that row,
/// and no partial output is returned.
pub fn extract(
    store: &CatalogStore,
    uploads: &UploadRegistry,
    session_id: &str,
    system_id: &str,
    should_cancel: &dyn Fn() -> bool,
) -> CpResult<ExtractionOutcome> {
    let system_id = resolve_system_id(store, system_id)?;

    let masters = store.active_masters(&system_id);
    if masters.is_empty() {
        return Err(CpError::NoMaster(format!("data system `{}` has no active master source", system_id)));
    }

    let canonicals = store.srcm_canonicals();
    let columns: Vec<String> = canonicals.iter().map(|c| c.name.clone()).collect();

    let mut output_rows: Vec<Vec<String>> = Vec::new();

    for master in masters {
        let Some(payload) = uploads.get(session_id, &master.id)? else {
            log::warn!("no uploaded payload for master source `{}`; skipping", master.id);
            continue;
        };
        let table = parse_csv(&payload)?;

        let mut reference_indexes: HashMap<String, ReferenceIndex> = HashMap::new();
        for source in store.data_sources_by_system(&system_id) {
            if !source.active || source.is_master {
                continue;
            }
            match uploads.get(session_id, &source.id)? {
                Some(ref_payload) => {
                    let ref_table = parse_csv(&ref_payload)?;
                    reference_indexes.insert(source.id.clone(), ReferenceIndex::build(&source.id, ref_table));
                }
                None => {
                    log::warn!("no uploaded payload for reference source `{}`; joins to it resolve to empty", source.id);
                }
            }
        }

        for row in &table.rows {
            if should_cancel() {
                return Err(CpError::Cancelled(format!(
                    "extraction of data system `{}` cancelled after {} rows",
                    system_id,
                    output_rows.len()
                )));
            }
            // Extension point: a future FilterCondition pass on `row`
            // would run here, before the row is resolved and collected.
            let resolved: Vec<String> = canonicals
                .iter()
                .map(|c| resolve_canonical(store, &system_id, c, master, row, &reference_indexes))
                .collect();
            output_rows.push(resolved);
        }
    }

    if output_rows.is_empty() {
        return Err(CpError::EmptyResult(format!("data system `{}` produced zero output rows", system_id)));
    }

    let row_count = output_rows.len();
    let csv_bytes = write_csv(&columns, &output_rows)?;
    Ok(ExtractionOutcome { columns, row_count, csv_bytes })
}
