//! Configuration structures for the challan pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main configuration for the challan pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallanConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Segmentation and field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report configuration.
    pub report: ReportConfig,
}

impl Default for ChallanConfig {
    fn default() -> Self {
        Self {
            pdf: PdfConfig::default(),
            extraction: ExtractionConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Separator inserted between page texts when building the full
    /// document text.
    pub page_separator: String,

    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Minimum extracted text length below which the document is treated
    /// as scanned/image-only.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_separator: "\n".to_string(),
            max_pages: 0,
            min_text_length: 50,
        }
    }
}

/// How challan boundaries are located in the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorStrategy {
    /// The literal "Dues for the wage month of <Month> <Year>" declaration.
    Phrase,
    /// Any full month name followed by a 4-digit year, with optional
    /// whitespace/hyphen separators ("September2024" included).
    BareMonthYear,
}

/// A labeled charge field: where its label sits and how many interleaved
/// numeric columns precede the column total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Label text as printed on the challan; matched case-insensitively
    /// with flexible whitespace between words.
    pub label: String,

    /// Numeric columns to skip between the label and the target amount.
    pub skip_columns: usize,

    /// Minimum digits-and-commas run length for the target amount.
    pub min_digits: usize,
}

impl FieldSpec {
    pub fn new(label: impl Into<String>, skip_columns: usize, min_digits: usize) -> Self {
        Self {
            label: label.into(),
            skip_columns,
            min_digits,
        }
    }
}

/// Segmentation and field extraction configuration.
///
/// The field table mirrors one document revision's column layout; revisions
/// that order columns differently only need different `skip_columns` values
/// here, not a different extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Anchor strategy used to split the document into challan segments.
    pub anchor: AnchorStrategy,

    /// Bounded lookahead window, in characters, scanned after a field
    /// label for its amount.
    pub label_window: usize,

    /// Absolute difference below which stated and computed grand totals
    /// are considered a match.
    pub match_tolerance: Decimal,

    /// Administration charges field.
    pub administration_charges: FieldSpec,

    /// Employer's share field.
    pub employer_share: FieldSpec,

    /// Employee's share field.
    pub employee_share: FieldSpec,

    /// Grand total field.
    pub grand_total: FieldSpec,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            anchor: AnchorStrategy::Phrase,
            label_window: 120,
            match_tolerance: Decimal::ONE,
            administration_charges: FieldSpec::new("Administration Charges", 1, 1),
            employer_share: FieldSpec::new("Employer's Share Of", 5, 1),
            employee_share: FieldSpec::new("Employee's Share Of", 5, 1),
            grand_total: FieldSpec::new("Grand Total", 0, 2),
        }
    }
}

/// Which column set the report emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportVariant {
    /// Components plus the employee share disallowance column.
    Disallowance,
    /// Components plus computed/stated totals and the match verdict.
    TotalsAudit,
}

/// Report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Column variant to emit.
    pub variant: ReportVariant,

    /// Title row text placed above the header in spreadsheet output.
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            variant: ReportVariant::Disallowance,
            title: "Tool developed by - PF Challan Tool".to_string(),
        }
    }
}

impl ChallanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_field_table() {
        let config = ExtractionConfig::default();
        assert_eq!(config.administration_charges.skip_columns, 1);
        assert_eq!(config.employer_share.skip_columns, 5);
        assert_eq!(config.employee_share.skip_columns, 5);
        assert_eq!(config.grand_total.min_digits, 2);
    }

    #[test]
    fn test_json_round_trip() {
        let config = ChallanConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ChallanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.extraction.anchor, AnchorStrategy::Phrase);
        assert_eq!(back.extraction.match_tolerance, Decimal::ONE);
        assert_eq!(back.report.variant, ReportVariant::Disallowance);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{"extraction": {"anchor": "bare_month_year"}}"#;
        let config: ChallanConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.extraction.anchor, AnchorStrategy::BareMonthYear);
        assert_eq!(config.extraction.label_window, 120);
        assert_eq!(config.pdf.min_text_length, 50);
    }
}
