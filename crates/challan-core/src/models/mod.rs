//! Data models for challan processing.

pub mod config;
pub mod record;

pub use config::{
    AnchorStrategy, ChallanConfig, ExtractionConfig, FieldSpec, PdfConfig, ReportConfig,
    ReportVariant,
};
pub use record::{ChallanRecord, MatchStatus};
