//! Quote/invoice detection from keywords.

use super::patterns::{INVOICE_KEYWORDS, QUOTE_KEYWORDS};
use super::{ExtractionMatch, FieldExtractor};
use crate::models::intent::DocumentType;

/// Keyword-based document type detector.
///
/// Expects normalized (lowercased, trimmed) text.
pub struct DocumentTypeDetector;

impl DocumentTypeDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocumentTypeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DocumentTypeDetector {
    type Output = ExtractionMatch<DocumentType>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let quote = earliest_keyword(text, QUOTE_KEYWORDS);
        let invoice = earliest_keyword(text, INVOICE_KEYWORDS);

        let (kind, (position, keyword)) = match (quote, invoice) {
            (None, None) => return None,
            (Some(q), None) => (DocumentType::Quote, q),
            (None, Some(i)) => (DocumentType::Invoice, i),
            // Equal positions go to the quote side.
            (Some(q), Some(i)) if i.0 < q.0 => (DocumentType::Invoice, i),
            (Some(q), Some(_)) => (DocumentType::Quote, q),
        };

        Some(
            ExtractionMatch::new(kind, 1.0, keyword)
                .with_position(position, position + keyword.len()),
        )
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut hits: Vec<Self::Output> = QUOTE_KEYWORDS
            .iter()
            .map(|k| (DocumentType::Quote, *k))
            .chain(INVOICE_KEYWORDS.iter().map(|k| (DocumentType::Invoice, *k)))
            .flat_map(|(kind, keyword)| {
                text.match_indices(keyword).map(move |(start, _)| {
                    ExtractionMatch::new(kind, 1.0, keyword)
                        .with_position(start, start + keyword.len())
                })
            })
            .collect();

        hits.sort_by_key(|m| m.position.map(|(start, _)| start));
        hits
    }
}

/// Lowest byte index at which any of `keywords` occurs, with that keyword.
fn earliest_keyword(text: &str, keywords: &[&'static str]) -> Option<(usize, &'static str)> {
    keywords
        .iter()
        .filter_map(|k| text.find(k).map(|pos| (pos, *k)))
        .min_by_key(|(pos, _)| *pos)
}

/// Detect whether normalized text asks for a quote or an invoice.
pub fn detect_document_type(text: &str) -> Option<DocumentType> {
    DocumentTypeDetector::new().extract(text).map(|m| m.value)
}
