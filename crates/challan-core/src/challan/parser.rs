//! Rule-based challan field extraction.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, FieldSpec};
use crate::models::record::ChallanRecord;

use super::rules::amounts::{capture_after_label, label_pattern};
use super::rules::dates::{due_date, normalize_wage_month, parse_challan_date};
use super::rules::patterns::{MONTH_YEAR, SYSTEM_DATE};

/// Result of parsing one challan segment.
///
/// `warnings` is the diagnostic channel for the silent-fallback policy:
/// every field that degraded to zero or absent leaves an entry here, so
/// callers can tell a genuine zero from an extraction miss.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: ChallanRecord,
    /// One entry per field that could not be extracted.
    pub warnings: Vec<String>,
}

/// Trait for challan segment parsers.
pub trait ChallanParser {
    /// Parse one segment into a record. Never fails: malformed fields
    /// degrade to zero or absent values, with a warning.
    fn parse(&self, segment: &str) -> ExtractionResult;
}

/// A labeled field with its compiled label matcher.
#[derive(Debug)]
struct CompiledField {
    name: &'static str,
    label: Regex,
    skip_columns: usize,
    min_digits: usize,
}

impl CompiledField {
    fn compile(name: &'static str, spec: &FieldSpec) -> Result<Self, ExtractionError> {
        let label = label_pattern(&spec.label).map_err(|e| ExtractionError::Pattern {
            field: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name,
            label,
            skip_columns: spec.skip_columns,
            min_digits: spec.min_digits,
        })
    }
}

/// Rule-based parser driven by the configured field-pattern table.
#[derive(Debug)]
pub struct RuleChallanParser {
    label_window: usize,
    match_tolerance: Decimal,
    administration_charges: CompiledField,
    employer_share: CompiledField,
    employee_share: CompiledField,
    grand_total: CompiledField,
}

impl RuleChallanParser {
    /// Create a parser with the default field table.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default()).expect("default field table is valid")
    }

    /// Create a parser from an extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        Ok(Self {
            label_window: config.label_window,
            match_tolerance: config.match_tolerance,
            administration_charges: CompiledField::compile(
                "administration charges",
                &config.administration_charges,
            )?,
            employer_share: CompiledField::compile("employer's share", &config.employer_share)?,
            employee_share: CompiledField::compile("employee's share", &config.employee_share)?,
            grand_total: CompiledField::compile("grand total", &config.grand_total)?,
        })
    }

    /// Set the lookahead window scanned after a field label.
    pub fn with_label_window(mut self, window: usize) -> Self {
        self.label_window = window;
        self
    }

    /// Set the stated-vs-computed match tolerance.
    pub fn with_match_tolerance(mut self, tolerance: Decimal) -> Self {
        self.match_tolerance = tolerance;
        self
    }

    fn wage_month(&self, segment: &str) -> Option<String> {
        MONTH_YEAR
            .captures(segment)
            .map(|caps| normalize_wage_month(&caps[1], &caps[2]))
            .filter(|m| !m.is_empty())
    }

    fn system_date(&self, segment: &str) -> Option<NaiveDate> {
        SYSTEM_DATE
            .captures(segment)
            .and_then(|caps| parse_challan_date(&caps[1]))
    }

    fn charge(&self, segment: &str, field: &CompiledField, warnings: &mut Vec<String>) -> Decimal {
        match capture_after_label(
            segment,
            &field.label,
            field.skip_columns,
            field.min_digits,
            self.label_window,
        ) {
            Some(m) => m.value,
            None => {
                warnings.push(format!("could not extract {}, using 0", field.name));
                Decimal::ZERO
            }
        }
    }
}

impl Default for RuleChallanParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ChallanParser for RuleChallanParser {
    fn parse(&self, segment: &str) -> ExtractionResult {
        let mut warnings = Vec::new();

        let wage_month = self.wage_month(segment).unwrap_or_else(|| {
            warnings.push("could not extract wage month".to_string());
            String::new()
        });

        let due = due_date(&wage_month);

        let system = self.system_date(segment);
        if system.is_none() {
            warnings.push("could not extract system generated date".to_string());
        }

        let administration = self.charge(segment, &self.administration_charges, &mut warnings);
        let employer = self.charge(segment, &self.employer_share, &mut warnings);
        let employee = self.charge(segment, &self.employee_share, &mut warnings);

        let stated = capture_after_label(
            segment,
            &self.grand_total.label,
            self.grand_total.skip_columns,
            self.grand_total.min_digits,
            self.label_window,
        )
        .map(|m| m.value);
        if stated.is_none() {
            warnings.push("could not extract grand total".to_string());
        }

        let record = ChallanRecord::new(
            wage_month,
            due,
            system,
            administration,
            employer,
            employee,
            stated,
            self.match_tolerance,
        );

        debug!(
            "parsed challan for {:?}: computed total {}, status {}",
            record.wage_month, record.computed_grand_total, record.match_status
        );

        ExtractionResult { record, warnings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::MatchStatus;
    use pretty_assertions::assert_eq;

    const SEGMENT: &str = "Dues for the wage month of March 2024 \
        TRRN 1234567890 Administration Charges 1 500 \
        Employer's Share Of 1 1 1 1 1 10000 \
        Employee's Share Of 1 1 1 1 1 9000 \
        Grand Total 19500 \
        This is a system generated challan on 20-APR-2024";

    #[test]
    fn test_parse_full_segment() {
        let result = RuleChallanParser::new().parse(SEGMENT);
        let record = &result.record;

        assert_eq!(record.wage_month, "March 2024");
        assert_eq!(record.due_date_display(), "15-APR-2024");
        assert_eq!(record.system_date_display(), "20-APR-2024");
        assert_eq!(record.administration_charges, Decimal::from(500));
        assert_eq!(record.employer_share, Decimal::from(10000));
        assert_eq!(record.employee_share, Decimal::from(9000));
        assert_eq!(record.stated_grand_total, Some(Decimal::from(19500)));
        assert_eq!(record.computed_grand_total, Decimal::from(19500));
        assert_eq!(record.match_status, MatchStatus::Match);
        // generated 20-APR, due 15-APR: employee share disallowed
        assert_eq!(record.employee_share_disallowance, Decimal::from(9000));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_parse_jammed_wage_month() {
        let result = RuleChallanParser::new().parse("September2024 Grand Total 100");
        assert_eq!(result.record.wage_month, "September 2024");
    }

    #[test]
    fn test_missing_grand_total_is_unknown() {
        let result = RuleChallanParser::new()
            .parse("Dues for the wage month of March 2024 Administration Charges 1 500");
        assert_eq!(result.record.match_status, MatchStatus::Unknown);
        assert_eq!(result.record.stated_grand_total, None);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("grand total")));
    }

    #[test]
    fn test_mismatched_total() {
        let segment = "Dues for the wage month of March 2024 \
            Administration Charges 1 500 \
            Employer's Share Of 1 1 1 1 1 10000 \
            Employee's Share Of 1 1 1 1 1 9000 \
            Grand Total 21000";
        let result = RuleChallanParser::new().parse(segment);
        assert_eq!(result.record.match_status, MatchStatus::Mismatch);
        assert_eq!(result.record.computed_grand_total, Decimal::from(19500));
    }

    #[test]
    fn test_missing_charges_fall_back_to_zero() {
        let result = RuleChallanParser::new()
            .parse("Dues for the wage month of March 2024 Grand Total 19500");
        let record = &result.record;
        assert_eq!(record.administration_charges, Decimal::ZERO);
        assert_eq!(record.employer_share, Decimal::ZERO);
        assert_eq!(record.employee_share, Decimal::ZERO);
        assert_eq!(record.computed_grand_total, Decimal::ZERO);
        assert_eq!(record.match_status, MatchStatus::Mismatch);
        assert_eq!(result.warnings.len(), 4);
    }

    #[test]
    fn test_empty_segment_degrades_quietly() {
        let result = RuleChallanParser::new().parse("");
        let record = &result.record;
        assert_eq!(record.wage_month, "");
        assert_eq!(record.due_date, None);
        assert_eq!(record.match_status, MatchStatus::Unknown);
        assert_eq!(record.employee_share_disallowance, Decimal::ZERO);
    }

    #[test]
    fn test_on_time_challan_has_no_disallowance() {
        let segment = "Dues for the wage month of March 2024 \
            Employee's Share Of 1 1 1 1 1 9000 \
            system generated challan on 10-APR-2024";
        let result = RuleChallanParser::new().parse(segment);
        assert_eq!(result.record.employee_share_disallowance, Decimal::ZERO);
    }

    #[test]
    fn test_comma_grouped_amounts() {
        let segment = "Dues for the wage month of March 2024 \
            Employer's Share Of 1 1 1 1 1 1,23,456 Grand Total 1,23,456";
        let result = RuleChallanParser::new().parse(segment);
        assert_eq!(result.record.employer_share, Decimal::from(123456));
        assert_eq!(result.record.stated_grand_total, Some(Decimal::from(123456)));
    }

    #[test]
    fn test_invalid_label_pattern_is_rejected() {
        let mut config = ExtractionConfig::default();
        config.grand_total = FieldSpec::new("(", 0, 2);
        let err = RuleChallanParser::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("grand total"));
    }

    #[test]
    fn test_alternation_label() {
        let mut config = ExtractionConfig::default();
        config.grand_total = FieldSpec::new("(?:Grand|Net) Total", 0, 2);
        let parser = RuleChallanParser::from_config(&config).unwrap();
        let result = parser.parse("Dues for the wage month of March 2024 Net Total 19500");
        assert_eq!(result.record.stated_grand_total, Some(Decimal::from(19500)));
    }
}
