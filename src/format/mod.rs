pub mod date;

use crate::catalog::model::DataType;
use date::{parse_date, render_date};

/// Normalizes a raw cell value per its declared attribute type/format.
/// Returns `(value, date_parse_failed)`; the caller logs the warning with
/// whatever data-system/source/row context it has on hand.
pub fn format_value(raw: &str, data_type: DataType, format: Option<&str>) -> (String, bool) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (String::new(), false);
    }
    match (data_type, format) {
        (DataType::Date, Some(fmt)) => match parse_date(trimmed) {
            Some(date) => (render_date(date, fmt), false),
            None => (trimmed.to_owned(), true),
        },
        _ => (trimmed.to_owned(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_empty_value_is_empty() {
        assert_eq!(format_value("   ", DataType::Date, Some("YYYY-MM-DD")), ("".to_string(), false));
    }

    #[test]
    fn valid_no_format_passes_through_trimmed() {
        assert_eq!(format_value("  7 ", DataType::Unspecified, None), ("7".to_string(), false));
    }

    #[test]
    fn valid_date_with_format_reformats() {
        assert_eq!(
            format_value("15-JAN-2020", DataType::Date, Some("YYYY-MM-DD")),
            ("2020-01-15".to_string(), false)
        );
    }

    #[test]
    fn valid_unparseable_date_passes_through_and_flags_warning() {
        assert_eq!(format_value("tomorrow", DataType::Date, Some("YYYY-MM-DD")), ("tomorrow".to_string(), true));
    }

    #[test]
    fn valid_non_date_type_passes_through_unchanged() {
        assert_eq!(format_value("Ada", DataType::String, Some("YYYY-MM-DD")), ("Ada".to_string(), false));
    }
}
