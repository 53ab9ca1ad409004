//! Error types for the challan-core library.

use thiserror::Error;

/// Main error type for the challan library.
#[derive(Error, Debug)]
pub enum ChallanError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to challan field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Field pattern could not be compiled from configuration.
    #[error("invalid field pattern for {field}: {reason}")]
    Pattern { field: String, reason: String },

    /// No challan data could be extracted.
    #[error("no challan data found")]
    NoData,
}

/// Result type for the challan library.
pub type Result<T> = std::result::Result<T, ChallanError>;
