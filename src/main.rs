use std::path::Path;

use srcm::catalog::CatalogStore;
use srcm::engine;
use srcm::logger;
use srcm::upload::{CsvPayload, UploadRegistry};
use srcm::util::args::RunExtractionArgs;
use srcm::util::common::{output_filename_for_today, rng_str};
use srcm::util::error::{CpError, CpResult};

fn exec() -> CpResult<()> {
    let args: RunExtractionArgs = argh::from_env();
    logger::init(None).map_err(|e| CpError::RawError(std::io::Error::other(e.to_string())))?;

    let store = CatalogStore::load_dir(&args.catalog_dir)?;
    let system_id = engine::resolve_system_id(&store, &args.data_system)?;

    let session_id = rng_str(16);
    let uploads = UploadRegistry::new();
    for source in store.data_sources_by_system(&system_id) {
        if !source.active {
            continue;
        }
        let path = Path::new(&args.uploads_dir).join(&source.file_name);
        if !path.exists() {
            continue;
        }
        let bytes = std::fs::read(&path)?;
        uploads.bind(&session_id, &source.id, CsvPayload::new(bytes))?;
    }

    // No signal-handling crate is wired in; a future service layer can pass a
    // real cancellation flag here without the core depending on one.
    let outcome = engine::extract(&store, &uploads, &session_id, &system_id, &|| false)?;

    let output_path = Path::new(&args.output_dir).join(output_filename_for_today());
    std::fs::write(&output_path, &outcome.csv_bytes)?;
    log::info!("wrote {} rows to {}", outcome.row_count, output_path.display());
    Ok(())
}

fn main() {
    if let Err(e) = exec() {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}
