//! Report assembly over extracted challan records.

use serde::Serialize;
use tracing::debug;

use crate::models::config::ReportVariant;
use crate::models::record::ChallanRecord;

/// Collects records across documents in document-then-segment order.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    records: Vec<ChallanRecord>,
    documents_processed: usize,
    documents_failed: usize,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document's records, attaching the source name to each.
    pub fn add_document(&mut self, source: &str, records: Vec<ChallanRecord>) {
        debug!("{}: {} records", source, records.len());
        self.documents_processed += 1;
        self.records
            .extend(records.into_iter().map(|r| r.with_source(source)));
    }

    /// Count a document that failed before producing any records.
    pub fn add_failure(&mut self) {
        self.documents_processed += 1;
        self.documents_failed += 1;
    }

    pub fn finish(self) -> ChallanReport {
        ChallanReport {
            records: self.records,
            documents_processed: self.documents_processed,
            documents_failed: self.documents_failed,
        }
    }
}

/// An assembled report, immutable once built. Sequence numbers are derived
/// from record position, so they survive serialization round-trips without
/// any counter state.
#[derive(Debug, Clone, Serialize)]
pub struct ChallanReport {
    /// Records in document-then-segment order.
    pub records: Vec<ChallanRecord>,
    /// Documents seen, including failed ones.
    pub documents_processed: usize,
    /// Documents that produced an error instead of records.
    pub documents_failed: usize,
}

impl ChallanReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column headers for a report variant.
    pub fn headers(variant: ReportVariant) -> Vec<&'static str> {
        match variant {
            ReportVariant::Disallowance => vec![
                "Sl No",
                "Wage Month",
                "Due Date",
                "System Generated Date",
                "Administration Charges",
                "Employer's Share",
                "Employee's Share",
                "Employee Share Disallowance",
                "Grand Total",
                "Source File",
            ],
            ReportVariant::TotalsAudit => vec![
                "Sl No",
                "Wage Month",
                "Due Date",
                "System Generated Date",
                "Administration Charges",
                "Employer's Share",
                "Employee's Share",
                "Computed Total",
                "Challan Total",
                "Match Status",
                "Source File",
            ],
        }
    }

    /// Rows as display strings, one per record, with 1-based sequence
    /// numbers taken from position.
    pub fn rows(&self, variant: ReportVariant) -> Vec<Vec<String>> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut row = vec![
                    (i + 1).to_string(),
                    r.wage_month.clone(),
                    r.due_date_display(),
                    r.system_date_display(),
                    r.administration_charges.to_string(),
                    r.employer_share.to_string(),
                    r.employee_share.to_string(),
                ];
                match variant {
                    ReportVariant::Disallowance => {
                        row.push(r.employee_share_disallowance.to_string());
                        row.push(
                            r.stated_grand_total
                                .map(|t| t.to_string())
                                .unwrap_or_default(),
                        );
                    }
                    ReportVariant::TotalsAudit => {
                        row.push(r.computed_grand_total.to_string());
                        row.push(
                            r.stated_grand_total
                                .map(|t| t.to_string())
                                .unwrap_or_default(),
                        );
                        row.push(r.match_status.to_string());
                    }
                }
                row.push(r.source_document.clone());
                row
            })
            .collect()
    }
}
