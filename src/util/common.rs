use chrono::Local;
use rand::{Rng, distr::Alphanumeric};

pub const DEFAULT_OUTPUT_FILENAME_PREFIX: &str = "extracted_data_";

pub fn rng_str(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Filename hint `extracted_data_<YYYY-MM-DD>.csv` using the local date.
pub fn output_filename_for_today() -> String {
    format!(
        "{}{}.csv",
        DEFAULT_OUTPUT_FILENAME_PREFIX,
        Local::now().format("%Y-%m-%d")
    )
}
