//! Project title extraction.

use tracing::trace;

use super::patterns::{TitleLabel, TITLE_PATTERNS};
use super::{ExtractionMatch, FieldExtractor};

/// Extracts a short project title introduced by a label.
///
/// Bounds are exclusive and counted in characters.
pub struct ProjectTitleExtractor {
    min_len: usize,
    max_len: usize,
}

impl ProjectTitleExtractor {
    pub fn new() -> Self {
        Self {
            min_len: 3,
            max_len: 100,
        }
    }

    /// Set the exclusive length bounds.
    pub fn with_bounds(mut self, min_len: usize, max_len: usize) -> Self {
        self.min_len = min_len;
        self.max_len = max_len;
        self
    }

    fn accepts(&self, candidate: &str) -> bool {
        let len = candidate.chars().count();
        len > self.min_len && len < self.max_len
    }
}

impl Default for ProjectTitleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ProjectTitleExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// One accepted title per label, in label priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for (label, pattern) in TITLE_PATTERNS.iter() {
            let Some(group) = pattern.captures(text).and_then(|caps| caps.get(1)) else {
                continue;
            };

            let candidate = group.as_str().trim();
            if !self.accepts(candidate) {
                // A rejected capture must not hide a later label.
                trace!(?label, candidate, "title candidate outside length bounds");
                continue;
            }

            results.push(
                ExtractionMatch::new(capitalize_first(candidate), confidence(*label), group.as_str())
                    .with_position(group.start(), group.end()),
            );
        }

        results
    }
}

fn confidence(label: TitleLabel) -> f32 {
    match label {
        TitleLabel::Labeled | TitleLabel::Subject => 0.9,
        TitleLabel::Introduced => 0.8,
    }
}

/// Upper-case the first character and leave the rest as written.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Extract a project title from normalized text.
pub fn extract_project_title(text: &str) -> Option<String> {
    ProjectTitleExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_title() {
        assert_eq!(
            extract_project_title("devis projet: cuisine équipée, pour dupont"),
            Some("Cuisine équipée".to_string())
        );
        assert_eq!(
            extract_project_title("travaux : isolation des combles"),
            Some("Isolation des combles".to_string())
        );
    }

    #[test]
    fn test_introduced_title() {
        assert_eq!(
            extract_project_title("devis concernant le chantier de rénovation toiture"),
            Some("Rénovation toiture".to_string())
        );
        assert_eq!(
            extract_project_title("une facture pour le projet extension garage."),
            Some("Extension garage".to_string())
        );
    }

    #[test]
    fn test_subject_title() {
        assert_eq!(
            extract_project_title("objet: ravalement de façade\nmerci"),
            Some("Ravalement de façade".to_string())
        );
    }

    #[test]
    fn test_short_capture_rejected() {
        assert_eq!(extract_project_title("objet: a"), None);
        // Exactly three characters is still too short.
        assert_eq!(extract_project_title("objet: abc"), None);
        assert_eq!(extract_project_title("objet: abcd"), Some("Abcd".to_string()));
    }

    #[test]
    fn test_long_capture_rejected() {
        let long = "x".repeat(100);
        assert_eq!(extract_project_title(&format!("objet: {long}")), None);

        let fits = "x".repeat(99);
        assert!(extract_project_title(&format!("objet: {fits}")).is_some());
    }

    #[test]
    fn test_rejected_capture_falls_through_to_next_label() {
        // "chantier: ab" is too short, the subject label still applies.
        assert_eq!(
            extract_project_title("chantier: ab, objet: pose de carrelage"),
            Some("Pose de carrelage".to_string())
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Four characters, eight bytes.
        assert_eq!(extract_project_title("objet: éééé"), Some("Éééé".to_string()));
    }

    #[test]
    fn test_custom_bounds() {
        let extractor = ProjectTitleExtractor::new().with_bounds(10, 20);
        assert!(extractor.extract("objet: cuisine").is_none());
        assert_eq!(
            extractor.extract("objet: salle de bains").map(|m| m.value),
            Some("Salle de bains".to_string())
        );
    }

    #[test]
    fn test_extract_all_keeps_label_order() {
        let all = ProjectTitleExtractor::new()
            .extract_all("objet: pose parquet, chantier: maison bleue");
        let titles: Vec<_> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(titles, vec!["Maison bleue", "Pose parquet"]);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("été"), "Été");
        assert_eq!(capitalize_first("déjà Majuscule"), "Déjà Majuscule");
        assert_eq!(capitalize_first(""), "");
    }
}
