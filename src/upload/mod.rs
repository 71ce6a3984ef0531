use std::collections::HashMap;
use std::sync::Mutex;

use crate::util::error::CpResult;

/// Raw bytes of one uploaded CSV file, keyed by `(session_id, data_source_id)`
/// so concurrent extractions for different users never observe each other's
/// uploads.
#[derive(Clone, Debug)]
pub struct CsvPayload {
    pub bytes: Vec<u8>,
}

impl CsvPayload {
    pub fn new(bytes: Vec<u8>) -> CsvPayload {
        CsvPayload { bytes }
    }

    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

/// Session-scoped upload bindings, guarded by a `Mutex` so concurrent
/// `bind`/`get` calls across sessions never race.
#[derive(Default)]
pub struct UploadRegistry {
    bindings: Mutex<HashMap<(String, String), CsvPayload>>,
}

impl UploadRegistry {
    pub fn new() -> UploadRegistry {
        UploadRegistry::default()
    }

    /// Replaces any prior binding for `(session_id, data_source_id)`. A
    /// poisoned lock propagates as `CpError::PoisonError`, the way the
    /// teacher's `PipelineContext` propagates a poisoned `RwLock` through
    /// `?` instead of panicking.
    pub fn bind(&self, session_id: &str, data_source_id: &str, payload: CsvPayload) -> CpResult<()> {
        let mut bindings = self.bindings.lock()?;
        bindings.insert((session_id.to_owned(), data_source_id.to_owned()), payload);
        Ok(())
    }

    pub fn get(&self, session_id: &str, data_source_id: &str) -> CpResult<Option<CsvPayload>> {
        let bindings = self.bindings.lock()?;
        Ok(bindings.get(&(session_id.to_owned(), data_source_id.to_owned())).cloned())
    }
}
