//! Wage month and statutory date handling.

use chrono::{Datelike, NaiveDate};

/// Month names in calendar order, in report casing.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month number (1-12) for a full English month name, case-insensitive.
pub fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| i as u32 + 1)
}

/// Normalize a matched month/year pair to title-cased "Month YYYY".
pub fn normalize_wage_month(month: &str, year: &str) -> String {
    match month_number(month) {
        Some(n) => format!("{} {}", MONTHS[(n - 1) as usize], year),
        None => String::new(),
    }
}

/// Parse a normalized "Month YYYY" string into the first day of that month.
pub fn parse_wage_month(wage_month: &str) -> Option<NaiveDate> {
    let mut parts = wage_month.split_whitespace();
    let month = month_number(parts.next()?)?;
    let year: i32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Statutory due date for a wage month: the 15th of the following month,
/// with December rolling into January of the next year.
pub fn due_date(wage_month: &str) -> Option<NaiveDate> {
    let base = parse_wage_month(wage_month)?;
    let (year, month) = if base.month() == 12 {
        (base.year() + 1, 1)
    } else {
        (base.year(), base.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 15)
}

/// Parse a DD-MMM-YYYY challan date ("20-APR-2024", any case).
pub fn parse_challan_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d-%b-%Y").ok()
}

/// Format a date the way challans print them: DD-MMM-YYYY, uppercased.
pub fn format_challan_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_month_number_case_insensitive() {
        assert_eq!(month_number("march"), Some(3));
        assert_eq!(month_number("SEPTEMBER"), Some(9));
        assert_eq!(month_number("Septembre"), None);
    }

    #[test]
    fn test_normalize_wage_month() {
        assert_eq!(normalize_wage_month("september", "2024"), "September 2024");
        assert_eq!(normalize_wage_month("MARCH", "2024"), "March 2024");
    }

    #[test]
    fn test_due_date_is_fifteenth_of_next_month() {
        assert_eq!(
            due_date("March 2024"),
            NaiveDate::from_ymd_opt(2024, 4, 15)
        );
    }

    #[test]
    fn test_due_date_december_rolls_over() {
        assert_eq!(
            due_date("December 2023"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_due_date_absent_for_unparsable_month() {
        assert_eq!(due_date(""), None);
        assert_eq!(due_date("Febtober 2024"), None);
        assert_eq!(due_date("March"), None);
    }

    #[test]
    fn test_parse_challan_date() {
        assert_eq!(
            parse_challan_date("20-APR-2024"),
            NaiveDate::from_ymd_opt(2024, 4, 20)
        );
        assert_eq!(
            parse_challan_date("20-Apr-2024"),
            NaiveDate::from_ymd_opt(2024, 4, 20)
        );
        assert_eq!(parse_challan_date("32-APR-2024"), None);
    }

    #[test]
    fn test_format_challan_date() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        assert_eq!(format_challan_date(date), "15-APR-2024");
    }

    #[test]
    fn test_format_parse_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_challan_date(&format_challan_date(date)), Some(date));
    }
}
