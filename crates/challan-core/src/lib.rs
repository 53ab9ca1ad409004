//! Core library for PF challan processing.
//!
//! This crate provides:
//! - PDF text extraction (lopdf + pdf-extract)
//! - Challan segmentation over normalized document text
//! - Field extraction (wage month, charge components, totals, dates)
//! - Statutory due-date and grand-total validation
//! - Report assembly for spreadsheet export

pub mod challan;
pub mod error;
pub mod models;
pub mod pdf;
pub mod report;

pub use challan::{normalize_whitespace, ChallanParser, ExtractionResult, RuleChallanParser, Segmenter};
pub use error::{ChallanError, Result};
pub use models::config::{AnchorStrategy, ChallanConfig, ReportVariant};
pub use models::record::{ChallanRecord, MatchStatus};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use report::{ChallanReport, ReportBuilder};

use tracing::warn;

/// Run one PDF document through the whole pipeline: load, extract text,
/// normalize, segment, and parse every challan occurrence.
///
/// A document with no anchors yields an empty vec, not an error.
pub fn process_bytes(data: &[u8], config: &ChallanConfig) -> Result<Vec<ExtractionResult>> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;

    if extractor.analyze(config.pdf.min_text_length) == PdfType::Scanned {
        warn!("no text layer found; scanned challans are not supported");
    }

    let full_text = extractor.full_text(&config.pdf.page_separator, config.pdf.max_pages)?;
    let text = normalize_whitespace(&full_text);

    let segmenter = Segmenter::new(config.extraction.anchor);
    let parser = RuleChallanParser::from_config(&config.extraction)?;

    Ok(segmenter.segment(&text).iter().map(|s| parser.parse(s)).collect())
}
