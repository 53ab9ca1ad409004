//! Common regex patterns for challan field extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Full English month names, as they appear on challans.
pub const MONTH_NAMES: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

lazy_static! {
    /// Wage month declaration phrase: "Dues for the wage month of September 2024".
    /// Tolerates jammed month/year tokens and hyphen separators.
    pub static ref WAGE_MONTH_PHRASE: Regex = Regex::new(&format!(
        r"(?i)Dues\s+for\s+the\s+wage\s+month\s+of\s*({MONTH_NAMES})[\s-]*(\d{{4}})\b"
    ))
    .unwrap();

    /// Bare month-name + 4-digit year anchor ("September 2024", "September2024",
    /// "September-2024"). A 3-digit year is not a match.
    pub static ref MONTH_YEAR: Regex = Regex::new(&format!(
        r"(?i)\b({MONTH_NAMES})[\s-]*(\d{{4}})\b"
    ))
    .unwrap();

    /// Generation stamp: DD-MMM-YYYY with a 3-letter month abbreviation.
    pub static ref SYSTEM_DATE: Regex = Regex::new(
        r"(?i)\b(\d{2}-[A-Za-z]{3}-\d{4})\b"
    ).unwrap();

    /// A run of digits and commas (thousands separators included).
    pub static ref AMOUNT: Regex = Regex::new(
        r"[0-9][0-9,]*"
    ).unwrap();
}
