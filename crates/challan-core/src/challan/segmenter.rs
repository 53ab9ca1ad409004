//! Splitting document text into per-challan segments.

use regex::Regex;
use tracing::debug;

use super::rules::patterns::{MONTH_YEAR, WAGE_MONTH_PHRASE};
use crate::models::config::AnchorStrategy;

/// Collapse every run of whitespace (newlines included) to a single space.
///
/// Idempotent: already-collapsed text comes back unchanged.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits normalized document text into one segment per challan occurrence.
///
/// Each segment runs from its anchor to the next anchor, the last one to the
/// end of the text. Anchors are never matched inside an already-consumed
/// region, and repeated identical month/year anchors each start their own
/// segment - a document carrying several challans for the same month is
/// several records.
#[derive(Debug, Clone)]
pub struct Segmenter {
    anchor: AnchorStrategy,
}

impl Segmenter {
    pub fn new(anchor: AnchorStrategy) -> Self {
        Self { anchor }
    }

    fn anchor_pattern(&self) -> &'static Regex {
        match self.anchor {
            AnchorStrategy::Phrase => &WAGE_MONTH_PHRASE,
            AnchorStrategy::BareMonthYear => &MONTH_YEAR,
        }
    }

    /// Byte offsets of every non-overlapping anchor occurrence, in order.
    fn anchor_offsets(&self, text: &str) -> Vec<usize> {
        self.anchor_pattern()
            .find_iter(text)
            .map(|m| m.start())
            .collect()
    }

    /// One segment per detected challan. Zero anchors yields an empty
    /// sequence, not an error.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let offsets = self.anchor_offsets(text);
        debug!("found {} challan anchors", offsets.len());

        offsets
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = offsets.get(i + 1).copied().unwrap_or(text.len());
                text[start..end].to_string()
            })
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(AnchorStrategy::Phrase)
    }
}
