//! Intent parser combining the document type, client and title extractors.

use tracing::{debug, trace};

use crate::models::client::Client;
use crate::models::config::IntentConfig;
use crate::models::intent::ParsedIntent;

use super::rules::{ClientMatcher, DocumentTypeDetector, FieldExtractor, ProjectTitleExtractor};

/// Parses a free-text message into a [`ParsedIntent`].
///
/// Holds only bounds; patterns are shared statics, so one parser can serve
/// any number of messages and threads.
#[derive(Debug, Clone)]
pub struct IntentParser {
    title_min_len: usize,
    title_max_len: usize,
    last_name_min_len: usize,
    first_name_min_len: usize,
}

impl IntentParser {
    /// Create a parser with the default bounds.
    pub fn new() -> Self {
        Self::from_config(&IntentConfig::default())
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &IntentConfig) -> Self {
        Self {
            title_min_len: config.title_min_len,
            title_max_len: config.title_max_len,
            last_name_min_len: config.fallback_last_name_min_len,
            first_name_min_len: config.fallback_first_name_min_len,
        }
    }

    /// Set the exclusive project title length bounds.
    pub fn with_title_bounds(mut self, min_len: usize, max_len: usize) -> Self {
        self.title_min_len = min_len;
        self.title_max_len = max_len;
        self
    }

    /// Set the exclusive name lengths used when scanning the roster.
    pub fn with_fallback_min_lengths(mut self, last_name: usize, first_name: usize) -> Self {
        self.last_name_min_len = last_name;
        self.first_name_min_len = first_name;
        self
    }

    /// Parse a message against a client roster.
    pub fn parse<'a>(&self, message: &str, clients: &'a [Client]) -> ParsedIntent<'a> {
        let normalized = normalize(message);

        let detector = DocumentTypeDetector::new();
        let document_type = detector.extract(&normalized).map(|m| {
            let mixed = detector
                .extract_all(&normalized)
                .iter()
                .any(|hit| hit.value != m.value);
            trace!(keyword = %m.source, position = ?m.position, mixed, "document type keyword");
            m.value
        });

        let client_match = ClientMatcher::new(clients)
            .with_min_lengths(self.last_name_min_len, self.first_name_min_len)
            .find(&normalized);

        let project_title = ProjectTitleExtractor::new()
            .with_bounds(self.title_min_len, self.title_max_len)
            .extract(&normalized)
            .map(|m| {
                trace!(source = %m.source, confidence = m.confidence, position = ?m.position, "project title");
                m.value
            });

        let client_name = client_match.map(|c| c.display_name());
        debug!(
            ?document_type,
            client = client_name.as_deref(),
            project_title = project_title.as_deref(),
            roster = clients.len(),
            "parsed intent"
        );

        ParsedIntent {
            document_type,
            client_match,
            project_title,
        }
    }
}

impl Default for IntentParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase and trim a message.
pub fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}

/// Parse a message against a client roster with the default bounds.
pub fn parse_user_intent<'a>(message: &str, clients: &'a [Client]) -> ParsedIntent<'a> {
    IntentParser::new().parse(message, clients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::intent::DocumentType;
    use pretty_assertions::assert_eq;

    fn dupont() -> Vec<Client> {
        vec![Client::new("Jean", "Dupont")]
    }

    #[test]
    fn test_full_request() {
        let clients = dupont();
        let intent = parse_user_intent(
            "Je voudrais un devis pour monsieur Dupont concernant le chantier de rénovation toiture",
            &clients,
        );

        assert_eq!(intent.document_type, Some(DocumentType::Quote));
        assert_eq!(intent.client_match, Some(&clients[0]));
        assert_eq!(intent.project_title.as_deref(), Some("Rénovation toiture"));
        assert!(intent.has_document_type());
        assert!(intent.has_client());
    }

    #[test]
    fn test_invoice_keyword_first() {
        let clients = dupont();
        let intent = parse_user_intent("facture pour Dupont, devis non merci", &clients);

        assert_eq!(intent.document_type, Some(DocumentType::Invoice));
        assert_eq!(intent.client_match, Some(&clients[0]));
    }

    #[test]
    fn test_nothing_detected() {
        let clients = dupont();
        let intent = parse_user_intent("Bonjour", &clients);

        assert_eq!(intent, ParsedIntent::default());
        assert!(!intent.has_document_type());
        assert!(!intent.has_client());
    }

    #[test]
    fn test_short_subject_rejected() {
        let intent = parse_user_intent("Devis objet: a", &[]);
        assert_eq!(intent.document_type, Some(DocumentType::Quote));
        assert_eq!(intent.project_title, None);
    }

    #[test]
    fn test_empty_roster_never_matches() {
        let intent = parse_user_intent("Facture pour Jean Dupont", &[]);
        assert_eq!(intent.client_match, None);
        assert!(!intent.has_client());
    }

    #[test]
    fn test_message_is_normalized() {
        let clients = dupont();
        let intent = parse_user_intent("   FACTURE CLIENT: JEAN DUPONT   ", &clients);

        assert_eq!(intent.document_type, Some(DocumentType::Invoice));
        assert_eq!(intent.client_match, Some(&clients[0]));
    }

    #[test]
    fn test_title_keeps_normalized_case() {
        let intent = parse_user_intent("Projet: Villa SAINT-MARC", &[]);
        assert_eq!(intent.project_title.as_deref(), Some("Villa saint-marc"));
    }

    #[test]
    fn test_derived_flags_agree_with_fields() {
        let clients = vec![Client::new("Jean", "Dupont"), Client::new("Marie", "Curie")];
        let messages = [
            "",
            "devis",
            "facture pour marie",
            "note de frais chez curie, objet: analyse",
            "estimation pour le client jean dupont",
            "rien à voir",
        ];

        for message in messages {
            let intent = parse_user_intent(message, &clients);
            assert_eq!(intent.has_document_type(), intent.document_type.is_some(), "{message}");
            assert_eq!(intent.has_client(), intent.client_match.is_some(), "{message}");
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let clients = dupont();
        let parser = IntentParser::new();
        let message = "Devis pour Dupont, projet: cuisine";

        let first = parser.parse(message, &clients);
        let second = parser.parse(message, &clients);
        assert_eq!(first, second);
    }

    #[test]
    fn test_configured_bounds() {
        let parser = IntentParser::new().with_title_bounds(0, 5);
        let intent = parser.parse("objet: abcd", &[]);
        assert_eq!(intent.project_title.as_deref(), Some("Abcd"));

        let intent = parser.parse("objet: abcdef", &[]);
        assert_eq!(intent.project_title, None);
    }
}
