//! Challan segmentation and field extraction.

mod parser;
mod segmenter;
pub mod rules;

pub use parser::{ChallanParser, ExtractionResult, RuleChallanParser};
pub use segmenter::{normalize_whitespace, Segmenter};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::MatchStatus;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    // Raw text the way the PDF text layer delivers it: newlines, uneven
    // spacing, two challans in one document.
    const RAW: &str = "EMPLOYEES' PROVIDENT FUND ORGANISATION\n\
        Dues for the wage month of  March 2024\n\
        TRRN   2032400012345\n\
        Administration Charges 1 500\n\
        Employer's Share Of 1 1 1 1 1 10000\n\
        Employee's Share Of 1 1 1 1 1 9000\n\
        Grand Total 19500\n\
        This is a system generated challan on 20-APR-2024\n\n\
        Dues for the wage month of December 2023\n\
        Administration Charges 1 450\n\
        Employer's Share Of 1 1 1 1 1 9500\n\
        Employee's Share Of 1 1 1 1 1 8500\n\
        Grand Total 18450\n\
        This is a system generated challan on 10-JAN-2024";

    #[test]
    fn test_normalize_segment_parse_pipeline() {
        let text = normalize_whitespace(RAW);
        let segments = Segmenter::default().segment(&text);
        assert_eq!(segments.len(), 2);

        let parser = RuleChallanParser::new();
        let first = parser.parse(&segments[0]).record;
        let second = parser.parse(&segments[1]).record;

        assert_eq!(first.wage_month, "March 2024");
        assert_eq!(first.due_date_display(), "15-APR-2024");
        assert_eq!(first.computed_grand_total, Decimal::from(19500));
        assert_eq!(first.match_status, MatchStatus::Match);
        // generated 20-APR-2024, due 15-APR-2024: late
        assert_eq!(first.employee_share_disallowance, Decimal::from(9000));

        assert_eq!(second.wage_month, "December 2023");
        assert_eq!(second.due_date_display(), "15-JAN-2024");
        assert_eq!(second.computed_grand_total, Decimal::from(18450));
        // generated 10-JAN-2024, due 15-JAN-2024: on time
        assert_eq!(second.employee_share_disallowance, Decimal::ZERO);
    }

    #[test]
    fn test_second_segment_does_not_see_first_totals() {
        let text = normalize_whitespace(RAW);
        let segments = Segmenter::default().segment(&text);

        let parser = RuleChallanParser::new();
        let second = parser.parse(&segments[1]).record;
        assert_eq!(second.stated_grand_total, Some(Decimal::from(18450)));
    }
}
