use chrono::NaiveDate;

const MONTH_ABBREVS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Tries the four accepted grammars in order: `DD-MON-YYYY`, `M[M]/D[D]/YYYY`,
/// `YYYY-MM-DD`, `M[M]-D[D]-YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_dd_mon_yyyy(raw)
        .or_else(|| NaiveDate::parse_from_str(raw, "%-m/%-d/%Y").ok())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .or_else(|| NaiveDate::parse_from_str(raw, "%-m-%-d-%Y").ok())
}

/// `%b` is locale-sensitive in `chrono`; the grammar is a fixed, English,
/// case-insensitive set of abbreviations, so this is hand-rolled instead.
fn parse_dd_mon_yyyy(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split('-').collect();
    let [day_str, mon_str, year_str] = parts[..] else {
        return None;
    };
    if day_str.is_empty() || day_str.len() > 2 || !day_str.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if year_str.len() != 4 || !year_str.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let month_idx = MONTH_ABBREVS
        .iter()
        .position(|abbrev| abbrev.eq_ignore_ascii_case(mon_str))?;
    let day: u32 = day_str.parse().ok()?;
    let year: i32 = year_str.parse().ok()?;
    NaiveDate::from_ymd_opt(year, (month_idx + 1) as u32, day)
}

/// Renders `date` per a case-insensitive format token, falling back to
/// `MM/DD/YYYY` for any unrecognized token.
pub fn render_date(date: NaiveDate, format: &str) -> String {
    let pattern = match format.to_ascii_uppercase().as_str() {
        "DD/MM/YYYY" => "%d/%m/%Y",
        "MM/DD/YYYY" => "%m/%d/%Y",
        "YYYY-MM-DD" => "%Y-%m-%d",
        "MM-DD-YYYY" => "%m-%d-%Y",
        "DD-MM-YYYY" => "%d-%m-%Y",
        "M/D/YYYY" => "%-m/%-d/%Y",
        "D/M/YYYY" => "%-d/%-m/%Y",
        _ => "%m/%d/%Y",
    };
    date.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_parses_dd_mon_yyyy() {
        assert_eq!(parse_date("15-JAN-2020"), NaiveDate::from_ymd_opt(2020, 1, 15));
        assert_eq!(parse_date("1-dec-1999"), NaiveDate::from_ymd_opt(1999, 12, 1));
    }

    #[test]
    fn valid_parses_month_slash_day_slash_year() {
        assert_eq!(parse_date("1/15/2020"), NaiveDate::from_ymd_opt(2020, 1, 15));
        assert_eq!(parse_date("12/5/2020"), NaiveDate::from_ymd_opt(2020, 12, 5));
    }

    #[test]
    fn valid_parses_iso() {
        assert_eq!(parse_date("2020-01-15"), NaiveDate::from_ymd_opt(2020, 1, 15));
    }

    #[test]
    fn valid_parses_month_dash_day_dash_year() {
        assert_eq!(parse_date("1-15-2020"), NaiveDate::from_ymd_opt(2020, 1, 15));
    }

    #[test]
    fn invalid_grammar_returns_none() {
        assert_eq!(parse_date("tomorrow"), None);
        assert_eq!(parse_date("2020/01/15"), None);
    }

    #[test]
    fn valid_render_recognized_tokens() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        assert_eq!(render_date(date, "YYYY-MM-DD"), "2020-01-05");
        assert_eq!(render_date(date, "dd/mm/yyyy"), "05/01/2020");
        assert_eq!(render_date(date, "M/D/YYYY"), "1/5/2020");
    }

    #[test]
    fn valid_render_unrecognized_token_falls_back_to_mm_dd_yyyy() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 5).unwrap();
        assert_eq!(render_date(date, "banana"), "01/05/2020");
    }
}
