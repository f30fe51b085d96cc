//! Configuration structures for intent parsing and document drafting.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DevisError, Result};

/// Main configuration for devis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DevisConfig {
    /// Intent parsing configuration.
    pub intent: IntentConfig,

    /// Document drafting configuration.
    pub documents: DocumentConfig,
}

/// Intent parser bounds. All bounds are exclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentConfig {
    /// A project title must be longer than this (in characters).
    pub title_min_len: usize,

    /// A project title must be shorter than this (in characters).
    pub title_max_len: usize,

    /// Roster scan only matches last names longer than this.
    pub fallback_last_name_min_len: usize,

    /// Roster scan only matches first names longer than this.
    pub fallback_first_name_min_len: usize,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            title_min_len: 3,
            title_max_len: 100,
            fallback_last_name_min_len: 2,
            fallback_first_name_min_len: 3,
        }
    }
}

/// Defaults applied when seeding quote and invoice drafts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// ISO currency code.
    pub currency: String,

    /// VAT rate applied to new lines, in percent (e.g. "20", "5.5").
    pub default_vat_rate: String,

    /// Number prefix for quotes.
    pub quote_prefix: String,

    /// Number prefix for invoices.
    pub invoice_prefix: String,

    /// Days a quote stays valid after issue.
    pub quote_validity_days: u32,

    /// Days until an invoice is due.
    pub payment_terms_days: u32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            default_vat_rate: "20".to_string(),
            quote_prefix: "DEV".to_string(),
            invoice_prefix: "FAC".to_string(),
            quote_validity_days: 30,
            payment_terms_days: 30,
        }
    }
}

impl DevisConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the bounds are usable.
    pub fn validate(&self) -> Result<()> {
        if self.intent.title_min_len >= self.intent.title_max_len {
            return Err(DevisError::Config(format!(
                "intent.title_min_len ({}) must be lower than intent.title_max_len ({})",
                self.intent.title_min_len, self.intent.title_max_len
            )));
        }
        if self.documents.currency.trim().is_empty() {
            return Err(DevisError::Config("documents.currency is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"documents":{"quote_prefix":"Q"}}"#).unwrap();

        let config = DevisConfig::from_file(&path).unwrap();
        assert_eq!(config.documents.quote_prefix, "Q");
        assert_eq!(config.documents.invoice_prefix, "FAC");
        assert_eq!(config.intent.title_max_len, 100);
    }

    #[test]
    fn test_rejects_inverted_title_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"intent":{"title_min_len":50,"title_max_len":10}}"#).unwrap();

        assert!(matches!(
            DevisConfig::from_file(&path),
            Err(DevisError::Config(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DevisConfig::default();
        config.documents.payment_terms_days = 45;
        config.save(&path).unwrap();

        let loaded = DevisConfig::from_file(&path).unwrap();
        assert_eq!(loaded.documents.payment_terms_days, 45);
    }
}
