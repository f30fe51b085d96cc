//! Rule-based extractors for French quote and invoice requests.

pub mod client;
pub mod document_type;
pub mod patterns;
pub mod title;

pub use client::{find_client_in_message, match_client_by_name, ClientMatch, ClientMatcher, MatchStrategy};
pub use document_type::{detect_document_type, DocumentTypeDetector};
pub use patterns::{ClientCue, TitleLabel};
pub use title::{extract_project_title, ProjectTitleExtractor};

/// Trait for field extractors that only need the message text.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all candidate occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte span in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
