//! Parsed intent record returned by the intent parser.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::client::Client;

/// Kind of business document the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Quote (devis).
    Quote,
    /// Invoice (facture).
    Invoice,
}

impl DocumentType {
    /// Lowercase identifier used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Quote => "quote",
            DocumentType::Invoice => "invoice",
        }
    }

    /// French label for display.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Quote => "Devis",
            DocumentType::Invoice => "Facture",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of parsing one user message.
///
/// `client_match` always borrows from the roster passed to the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedIntent<'a> {
    pub document_type: Option<DocumentType>,
    pub client_match: Option<&'a Client>,
    pub project_title: Option<String>,
}

impl<'a> ParsedIntent<'a> {
    pub fn has_document_type(&self) -> bool {
        self.document_type.is_some()
    }

    pub fn has_client(&self) -> bool {
        self.client_match.is_some()
    }

    /// True when none of the three extractors produced anything.
    pub fn is_empty(&self) -> bool {
        !self.has_document_type() && !self.has_client() && self.project_title.is_none()
    }
}

impl Serialize for ParsedIntent<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ParsedIntent", 5)?;
        state.serialize_field("documentType", &self.document_type)?;
        state.serialize_field("clientMatch", &self.client_match)?;
        state.serialize_field("projectTitle", &self.project_title)?;
        state.serialize_field("hasDocumentType", &self.has_document_type())?;
        state.serialize_field("hasClient", &self.has_client())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_carries_derived_flags() {
        let client = Client::new("Jean", "Dupont");
        let intent = ParsedIntent {
            document_type: Some(DocumentType::Invoice),
            client_match: Some(&client),
            project_title: None,
        };

        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["documentType"], "invoice");
        assert_eq!(json["clientMatch"]["last_name"], "Dupont");
        assert!(json["projectTitle"].is_null());
        assert_eq!(json["hasDocumentType"], true);
        assert_eq!(json["hasClient"], true);
    }

    #[test]
    fn test_empty_intent() {
        let intent = ParsedIntent::default();
        assert!(intent.is_empty());
        assert!(!intent.has_document_type());
        assert!(!intent.has_client());
    }
}
