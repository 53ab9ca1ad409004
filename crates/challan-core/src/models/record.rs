//! Challan record data model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::challan::rules::dates::format_challan_date;

/// Outcome of comparing the stated grand total against the computed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Stated and computed totals agree within the configured tolerance.
    Match,
    /// Stated and computed totals disagree.
    Mismatch,
    /// No stated total could be extracted, so no comparison was possible.
    Unknown,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MatchStatus::Match => "MATCH",
            MatchStatus::Mismatch => "MISMATCH",
            MatchStatus::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// A single challan extracted from one text segment.
///
/// Built once by the parser and immutable afterwards. The derived fields
/// (`computed_grand_total`, `match_status`, `employee_share_disallowance`)
/// are fixed at construction and never re-parsed from the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallanRecord {
    /// Wage month normalized to "Month YYYY"; empty when not found.
    pub wage_month: String,

    /// Statutory due date: 15th of the month following the wage month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Generation date printed on the challan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_generated_date: Option<NaiveDate>,

    /// Administration charges component.
    pub administration_charges: Decimal,

    /// Employer's share component.
    pub employer_share: Decimal,

    /// Employee's share component.
    pub employee_share: Decimal,

    /// Grand total as printed on the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stated_grand_total: Option<Decimal>,

    /// Sum of the three charge components.
    pub computed_grand_total: Decimal,

    /// Stated vs computed comparison.
    pub match_status: MatchStatus,

    /// Employee share if the challan was generated after the due date, else zero.
    pub employee_share_disallowance: Decimal,

    /// Originating file, attached by the report assembler.
    #[serde(default)]
    pub source_document: String,
}

impl ChallanRecord {
    /// Build a record from extracted fields, deriving the total, match
    /// status, and disallowance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        wage_month: String,
        due_date: Option<NaiveDate>,
        system_generated_date: Option<NaiveDate>,
        administration_charges: Decimal,
        employer_share: Decimal,
        employee_share: Decimal,
        stated_grand_total: Option<Decimal>,
        match_tolerance: Decimal,
    ) -> Self {
        let computed_grand_total = administration_charges + employer_share + employee_share;

        let match_status = match stated_grand_total {
            None => MatchStatus::Unknown,
            Some(stated) => {
                if (computed_grand_total - stated).abs() < match_tolerance {
                    MatchStatus::Match
                } else {
                    MatchStatus::Mismatch
                }
            }
        };

        let employee_share_disallowance = match (system_generated_date, due_date) {
            (Some(system), Some(due)) if system > due => employee_share,
            _ => Decimal::ZERO,
        };

        Self {
            wage_month,
            due_date,
            system_generated_date,
            administration_charges,
            employer_share,
            employee_share,
            stated_grand_total,
            computed_grand_total,
            match_status,
            employee_share_disallowance,
            source_document: String::new(),
        }
    }

    /// Attach the originating document name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_document = source.into();
        self
    }

    /// Whether the challan was remitted after the statutory due date.
    pub fn is_late(&self) -> bool {
        matches!(
            (self.system_generated_date, self.due_date),
            (Some(system), Some(due)) if system > due
        )
    }

    /// Due date formatted as DD-MMM-YYYY, empty when absent.
    pub fn due_date_display(&self) -> String {
        self.due_date.map(format_challan_date).unwrap_or_default()
    }

    /// System-generated date formatted as DD-MMM-YYYY, empty when absent.
    pub fn system_date_display(&self) -> String {
        self.system_generated_date
            .map(format_challan_date)
            .unwrap_or_default()
    }
}
