use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::csv::CsvTable;

/// Per-column lookup table over a non-master source's rows. The
/// observed implementation does a linear scan per lookup; this crate builds a
/// `HashMap<String, Vec<usize>>` per column up front to avoid the quadratic
/// case, and still honors "first row in CSV order wins" on a multi-match.
pub struct ReferenceIndex {
    pub data_source_id: String,
    table: CsvTable,
    by_column: HashMap<String, HashMap<String, Vec<usize>>>,
    warned_buckets: RefCell<HashSet<(String, String)>>,
}

impl ReferenceIndex {
    pub fn build(data_source_id: &str, table: CsvTable) -> ReferenceIndex {
        let mut by_column = HashMap::with_capacity(table.columns.len());
        for column in &table.columns {
            let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
            for (row_idx, row) in table.rows.iter().enumerate() {
                let value = row.get(column).cloned().unwrap_or_default();
                buckets.entry(value).or_default().push(row_idx);
            }
            by_column.insert(column.clone(), buckets);
        }
        ReferenceIndex {
            data_source_id: data_source_id.to_owned(),
            table,
            by_column,
            warned_buckets: RefCell::new(HashSet::new()),
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.by_column.contains_key(column)
    }

    /// Returns the row whose `column` cell equals `value`, preferring the
    /// first match in CSV order. Warns once per `(column, value)` bucket the
    /// first time it is found to hold more than one candidate row.
    pub fn find_row(&self, column: &str, value: &str) -> Option<&HashMap<String, String>> {
        let bucket = self.by_column.get(column)?.get(value)?;
        if bucket.len() > 1 {
            let key = (column.to_owned(), value.to_owned());
            let mut warned = self.warned_buckets.borrow_mut();
            if warned.insert(key) {
                log::warn!(
                    "join key `{}`=`{}` on data source `{}` matches {} rows; using the first",
                    column,
                    value,
                    self.data_source_id,
                    bucket.len()
                );
            }
        }
        bucket.first().and_then(|&idx| self.table.rows.get(idx))
    }
}
