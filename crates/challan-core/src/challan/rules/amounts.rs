//! Amount parsing and labeled-field capture.

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Amount field extractor over digits-and-commas runs.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        AMOUNT
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(parse_amount(m.as_str()), 0.8, m.as_str())
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

/// Parse a digits-and-commas amount ("1,23,456" included - challans use
/// Indian digit grouping). Unparsable or empty input is zero, never an
/// error; totals must stay well-defined on malformed documents.
pub fn parse_amount(s: &str) -> Decimal {
    let cleaned = s.replace(',', "");
    Decimal::from_str(cleaned.trim()).unwrap_or(Decimal::ZERO)
}

/// Compile a field label into a matcher: case-insensitive, any whitespace
/// between words. Each word is a regex fragment, so configured labels can
/// carry their own alternations when a document revision renames a field.
pub fn label_pattern(label: &str) -> Result<Regex, regex::Error> {
    let words: Vec<&str> = label.split_whitespace().collect();
    Regex::new(&format!(r"(?i){}", words.join(r"\s+")))
}

/// Capture the amount for a labeled field.
///
/// Looks at most `window` characters past the label, skips `skip_columns`
/// interleaved numeric runs, and takes the next run of at least
/// `min_digits` digits-and-commas characters.
pub fn capture_after_label(
    text: &str,
    label: &Regex,
    skip_columns: usize,
    min_digits: usize,
    window: usize,
) -> Option<ExtractionMatch<Decimal>> {
    let label_match = label.find(text)?;
    let start = label_match.end();
    let mut end = (start + window).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    AMOUNT
        .find_iter(&text[start..end])
        .filter(|m| m.as_str().len() >= min_digits)
        .nth(skip_columns)
        .map(|m| {
            ExtractionMatch::new(parse_amount(m.as_str()), 0.9, m.as_str())
                .with_position(start + m.start(), start + m.end())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_amount_strips_commas() {
        assert_eq!(parse_amount("19,500"), Decimal::from(19500));
        assert_eq!(parse_amount("1,23,456"), Decimal::from(123456));
        assert_eq!(parse_amount("500"), Decimal::from(500));
    }

    #[test]
    fn test_parse_amount_malformed_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("N/A"), Decimal::ZERO);
        assert_eq!(parse_amount(","), Decimal::ZERO);
    }

    #[test]
    fn test_capture_skips_interleaved_columns() {
        let label = label_pattern("Employer's Share Of").unwrap();
        let text = "Employer's Share Of 1 1 1 1 1 10,000 more text";
        let m = capture_after_label(text, &label, 5, 1, 120).unwrap();
        assert_eq!(m.value, Decimal::from(10000));
        assert_eq!(m.source, "10,000");
    }

    #[test]
    fn test_capture_first_amount_after_label() {
        let label = label_pattern("Grand Total").unwrap();
        let text = "Grand Total 19500 system generated";
        let m = capture_after_label(text, &label, 0, 2, 120).unwrap();
        assert_eq!(m.value, Decimal::from(19500));
    }

    #[test]
    fn test_capture_min_digits_skips_short_runs() {
        let label = label_pattern("Grand Total").unwrap();
        let text = "Grand Total 1 19500";
        let m = capture_after_label(text, &label, 0, 2, 120).unwrap();
        assert_eq!(m.value, Decimal::from(19500));
    }

    #[test]
    fn test_capture_respects_window() {
        let label = label_pattern("Administration Charges").unwrap();
        let text = format!("Administration Charges {} 500", " ".repeat(200));
        assert!(capture_after_label(&text, &label, 0, 1, 120).is_none());
    }

    #[test]
    fn test_capture_absent_label() {
        let label = label_pattern("Grand Total").unwrap();
        assert!(capture_after_label("no totals here", &label, 0, 2, 120).is_none());
    }

    #[test]
    fn test_label_flexible_whitespace() {
        let label = label_pattern("Administration Charges").unwrap();
        let text = "Administration   Charges 1 500";
        let m = capture_after_label(text, &label, 1, 1, 120).unwrap();
        assert_eq!(m.value, Decimal::from(500));
    }

    #[test]
    fn test_extract_all_amounts() {
        let extractor = AmountExtractor::new();
        let results = extractor.extract_all("500 then 10,000 then 9000");
        assert_eq!(results.len(), 3);
        assert_eq!(results[1].value, Decimal::from(10000));
    }
}
