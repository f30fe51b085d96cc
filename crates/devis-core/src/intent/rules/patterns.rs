//! Keyword lists and regex patterns for French quote/invoice requests.
//!
//! Every list here is ordered and evaluated first-match-wins, so the order of
//! entries is part of the behaviour.

use lazy_static::lazy_static;
use regex::Regex;

/// Words that indicate the user wants a quote.
pub const QUOTE_KEYWORDS: &[&str] = &[
    "devis",
    "estimation",
    "chiffrage",
    "cotation",
    "proposer",
    "estimer",
];

/// Words that indicate the user wants an invoice.
pub const INVOICE_KEYWORDS: &[&str] = &["facture", "facturer", "facturation", "note", "reçu"];

/// Cue phrase that introduced a client name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCue {
    /// "pour [le client] [titre] NOM"
    Pour,
    /// "client: NOM"
    ClientLabel,
    /// "chez [titre] NOM"
    Chez,
    /// "de [titre] NOM"
    De,
}

impl ClientCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientCue::Pour => "pour",
            ClientCue::ClientLabel => "client:",
            ClientCue::Chez => "chez",
            ClientCue::De => "de",
        }
    }
}

/// Label that introduced a project title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleLabel {
    /// "projet: X", "chantier: X", "travaux: X"
    Labeled,
    /// "pour le chantier de X", "concernant le projet X"
    Introduced,
    /// "objet: X"
    Subject,
}

// Name capture shared by the client cues: starts with a letter, may span
// several words, and stops before a connecting word or any character that
// cannot be part of a name.
macro_rules! client_pattern {
    ($cue:literal) => {
        concat!(
            r"(?i)",
            $cue,
            r"(?:(?:monsieur|madame|mme\.?|m\.)\s*)?",
            r"([\p{L}][\p{L}'’\- ]*?)",
            r"(?:\s+(?:pour|concernant|de|du|des|au|aux|à|le|la|les|sur|avec|chez|et|qui|afin)\b|[^\p{L}'’\- ]|$)"
        )
    };
}

lazy_static! {
    pub static ref CLIENT_POUR: Regex = Regex::new(
        client_pattern!(r"\bpour\s+(?:le\s+client\s*:?\s*)?")
    ).unwrap();

    pub static ref CLIENT_LABEL: Regex = Regex::new(
        client_pattern!(r"\bclient\s*:\s*")
    ).unwrap();

    pub static ref CLIENT_CHEZ: Regex = Regex::new(
        client_pattern!(r"\bchez\s+")
    ).unwrap();

    pub static ref CLIENT_DE: Regex = Regex::new(
        client_pattern!(r"\bde\s+")
    ).unwrap();

    /// Client cues in priority order.
    pub static ref CLIENT_PATTERNS: Vec<(ClientCue, &'static Regex)> = vec![
        (ClientCue::Pour, &*CLIENT_POUR),
        (ClientCue::ClientLabel, &*CLIENT_LABEL),
        (ClientCue::Chez, &*CLIENT_CHEZ),
        (ClientCue::De, &*CLIENT_DE),
    ];

    // Title captures stop at comma, period or newline.
    pub static ref TITLE_LABELED: Regex = Regex::new(
        r"(?i)\b(?:projet|chantier|travaux)\s*:\s*([^,.\n]+)"
    ).unwrap();

    pub static ref TITLE_INTRODUCED: Regex = Regex::new(
        r"(?i)\b(?:pour|concernant)\s+(?:le\s+)?(?:projet|chantier|travaux)\s+(?:de\s+)?([^,.\n]+)"
    ).unwrap();

    pub static ref TITLE_SUBJECT: Regex = Regex::new(
        r"(?i)\bobjet\s*:\s*([^,.\n]+)"
    ).unwrap();

    /// Title labels in priority order.
    pub static ref TITLE_PATTERNS: Vec<(TitleLabel, &'static Regex)> = vec![
        (TitleLabel::Labeled, &*TITLE_LABELED),
        (TitleLabel::Introduced, &*TITLE_INTRODUCED),
        (TitleLabel::Subject, &*TITLE_SUBJECT),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile_in_priority_order() {
        let cues: Vec<_> = CLIENT_PATTERNS.iter().map(|(cue, _)| *cue).collect();
        assert_eq!(
            cues,
            vec![ClientCue::Pour, ClientCue::ClientLabel, ClientCue::Chez, ClientCue::De]
        );

        let labels: Vec<_> = TITLE_PATTERNS.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec![TitleLabel::Labeled, TitleLabel::Introduced, TitleLabel::Subject]
        );
    }

    #[test]
    fn test_client_pour_skips_title() {
        let caps = CLIENT_POUR.captures("un devis pour monsieur dupont concernant").unwrap();
        assert_eq!(&caps[1], "dupont");

        let caps = CLIENT_POUR.captures("pour le client jean dupont, merci").unwrap();
        assert_eq!(&caps[1], "jean dupont");

        let caps = CLIENT_POUR.captures("facture pour mme. durand").unwrap();
        assert_eq!(&caps[1], "durand");
    }

    #[test]
    fn test_client_capture_stops_before_digits() {
        let caps = CLIENT_CHEZ.captures("intervention chez martin 3 fenêtres").unwrap();
        assert_eq!(caps[1].trim(), "martin");
    }

    #[test]
    fn test_client_cue_needs_word_boundary() {
        assert!(CLIENT_POUR.captures("pourquoi pas").is_none());
        assert!(CLIENT_DE.captures("devis").is_none());
    }

    #[test]
    fn test_title_stops_at_punctuation() {
        let caps = TITLE_LABELED.captures("chantier: salle de bain, urgent").unwrap();
        assert_eq!(&caps[1], "salle de bain");

        let caps = TITLE_INTRODUCED
            .captures("concernant le chantier de rénovation toiture")
            .unwrap();
        assert_eq!(&caps[1], "rénovation toiture");

        let caps = TITLE_SUBJECT.captures("objet : pose parquet.\nmerci").unwrap();
        assert_eq!(&caps[1], "pose parquet");
    }
}
