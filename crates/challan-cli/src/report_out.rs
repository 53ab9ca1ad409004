//! Report writers for the supported output formats.

use std::path::Path;

use anyhow::Context;
use rust_xlsxwriter::{Format, Workbook};

use challan_core::models::config::{ReportConfig, ReportVariant};
use challan_core::report::ChallanReport;

/// Render the report as CSV: header row, then one row per record.
pub fn to_csv_string(report: &ChallanReport, variant: ReportVariant) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(ChallanReport::headers(variant))?;
    for row in report.rows(variant) {
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

/// Write the report as CSV to a file.
pub fn write_csv(
    path: &Path,
    report: &ChallanReport,
    variant: ReportVariant,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    wtr.write_record(ChallanReport::headers(variant))?;
    for row in report.rows(variant) {
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the report as an XLSX workbook: bolded title row, a spacer, the
/// header row, then the data - the layout the legacy spreadsheets used.
pub fn write_xlsx(
    path: &Path,
    report: &ChallanReport,
    config: &ReportConfig,
) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    worksheet.write_string_with_format(0, 0, &config.title, &bold)?;

    for (col, header) in ChallanReport::headers(config.variant).iter().enumerate() {
        worksheet.write_string_with_format(2, col as u16, *header, &bold)?;
    }

    for (r, row) in report.rows(config.variant).iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            worksheet.write_string(3 + r as u32, c as u16, cell)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

/// Plain-text summary, one block per record.
pub fn format_text(report: &ChallanReport) -> String {
    let mut output = String::new();

    for (i, record) in report.records.iter().enumerate() {
        let month = if record.wage_month.is_empty() {
            "(unknown wage month)"
        } else {
            record.wage_month.as_str()
        };
        output.push_str(&format!("Challan {}: {}\n", i + 1, month));
        output.push_str(&format!("  Due date:       {}\n", record.due_date_display()));
        output.push_str(&format!("  Generated:      {}\n", record.system_date_display()));
        output.push_str(&format!(
            "  Administration: {}\n",
            record.administration_charges
        ));
        output.push_str(&format!("  Employer:       {}\n", record.employer_share));
        output.push_str(&format!("  Employee:       {}\n", record.employee_share));
        output.push_str(&format!(
            "  Computed total: {}\n",
            record.computed_grand_total
        ));
        if let Some(stated) = record.stated_grand_total {
            output.push_str(&format!("  Challan total:  {}\n", stated));
        }
        output.push_str(&format!("  Status:         {}\n", record.match_status));
        if !record.employee_share_disallowance.is_zero() {
            output.push_str(&format!(
                "  Disallowance:   {} (generated after due date)\n",
                record.employee_share_disallowance
            ));
        }
        if !record.source_document.is_empty() {
            output.push_str(&format!("  Source:         {}\n", record.source_document));
        }
        output.push('\n');
    }

    output
}
