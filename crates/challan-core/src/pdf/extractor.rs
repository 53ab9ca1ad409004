//! PDF text extraction using lopdf and pdf-extract.

use lopdf::{Document, Object};
use tracing::debug;

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// PDF text extractor backed by lopdf, with pdf-extract for the text layer.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Concatenate per-page text with the given separator into one
    /// full-document string. `max_pages` of 0 means no limit. Pages whose
    /// extraction fails contribute nothing; if no page yields text, the
    /// whole-document text layer is tried before giving up.
    pub fn full_text(&self, separator: &str, max_pages: usize) -> Result<String> {
        let count = self.page_count();
        if count == 0 {
            return Err(PdfError::NoPages);
        }

        let limit = if max_pages == 0 {
            count
        } else {
            count.min(max_pages as u32)
        };

        let mut parts = Vec::with_capacity(limit as usize);
        for page in 1..=limit {
            match self.extract_page_text(page) {
                Ok(text) if !text.trim().is_empty() => parts.push(text),
                Ok(_) => {}
                Err(e) => debug!("page {} text extraction failed: {}", page, e),
            }
        }

        if parts.is_empty() {
            return self.extract_text();
        }

        Ok(parts.join(separator))
    }

    /// Count image XObjects in the document. Used to tell a scanned
    /// challan apart from an empty one.
    fn image_object_count(&self) -> usize {
        let doc = match self.document.as_ref() {
            Some(d) => d,
            None => return 0,
        };

        doc.objects.values().filter(|obj| is_image_stream(obj)).count()
    }
}

fn is_image_stream(obj: &Object) -> bool {
    if let Object::Stream(stream) = obj {
        stream
            .dict
            .get(b"Subtype")
            .ok()
            .and_then(|s| s.as_name().ok())
            .map(|name| name == b"Image")
            .unwrap_or(false)
    } else {
        false
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            // Save decrypted document so pdf-extract sees plaintext streams
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn analyze(&self, min_text_length: usize) -> PdfType {
        let text = self.extract_text().unwrap_or_default();
        let has_text = text.trim().len() >= min_text_length;
        let has_images = self.image_object_count() > 0;

        let pdf_type = match (has_text, has_images) {
            (true, _) => PdfType::Text,
            (false, true) => PdfType::Scanned,
            (false, false) => PdfType::Empty,
        };

        debug!(
            "PDF analysis: {} chars text, has_images={} -> {:?}",
            text.len(),
            has_images,
            pdf_type
        );
        pdf_type
    }

    fn extract_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("no document loaded".to_string()))?;

        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Dictionary, Stream};

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(extractor.load(b"not a pdf").is_err());
    }

    #[test]
    fn test_is_image_stream() {
        let mut dict = Dictionary::new();
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        let stream = Stream::new(dict, vec![0u8; 4]);
        assert!(is_image_stream(&Object::Stream(stream)));

        let mut dict = Dictionary::new();
        dict.set("Subtype", Object::Name(b"Form".to_vec()));
        let stream = Stream::new(dict, vec![]);
        assert!(!is_image_stream(&Object::Stream(stream)));

        assert!(!is_image_stream(&Object::Null));
    }

    #[test]
    fn test_page_text_requires_document() {
        let extractor = PdfExtractor::new();
        assert!(extractor.extract_page_text(1).is_err());
    }
}
