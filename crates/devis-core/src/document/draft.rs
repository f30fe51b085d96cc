//! Seeding quote and invoice drafts from a parsed intent.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use super::totals::{compute_line, compute_totals};
use crate::error::{DocumentError, Result};
use crate::models::config::DocumentConfig;
use crate::models::document::{DocumentDraft, DocumentTotals, LineItem, VatRate};
use crate::models::intent::{DocumentType, ParsedIntent};

/// Format a document number: `PREFIX-YYYY-NNN`.
pub fn document_number(kind: DocumentType, config: &DocumentConfig, year: i32, sequence: u32) -> String {
    let prefix = match kind {
        DocumentType::Quote => &config.quote_prefix,
        DocumentType::Invoice => &config.invoice_prefix,
    };
    format!("{}-{}-{:03}", prefix, year, sequence)
}

impl DocumentDraft {
    /// Create an empty draft of the given kind.
    pub fn new(
        kind: DocumentType,
        config: &DocumentConfig,
        issue_date: NaiveDate,
        sequence: u32,
    ) -> Result<Self> {
        let default_vat_rate: VatRate = config.default_vat_rate.parse()?;

        let (valid_until, due_date) = match kind {
            DocumentType::Quote => (
                issue_date.checked_add_days(Days::new(config.quote_validity_days.into())),
                None,
            ),
            DocumentType::Invoice => (
                None,
                issue_date.checked_add_days(Days::new(config.payment_terms_days.into())),
            ),
        };

        Ok(Self {
            kind,
            number: document_number(kind, config, issue_date.year(), sequence),
            title: None,
            client: None,
            issue_date,
            valid_until,
            due_date,
            currency: config.currency.clone(),
            default_vat_rate,
            line_items: Vec::new(),
            totals: DocumentTotals::default(),
        })
    }

    /// Seed a draft from a parsed intent.
    ///
    /// Falls back to a quote when no document type was detected.
    pub fn from_intent(
        intent: &ParsedIntent<'_>,
        config: &DocumentConfig,
        issue_date: NaiveDate,
        sequence: u32,
    ) -> Result<Self> {
        let kind = intent.document_type.unwrap_or(DocumentType::Quote);
        let mut draft = Self::new(kind, config, issue_date, sequence)?;

        draft.title = intent.project_title.clone();
        draft.client = intent.client_match.cloned();

        debug!(
            number = %draft.number,
            has_client = draft.client.is_some(),
            has_title = draft.title.is_some(),
            "seeded draft from intent"
        );

        Ok(draft)
    }

    /// Append a line and recompute totals. The draft is unchanged on error.
    pub fn add_line(&mut self, item: LineItem) -> std::result::Result<(), DocumentError> {
        compute_line(self.line_items.len() + 1, &item)?;
        self.line_items.push(item);

        match compute_totals(&self.line_items) {
            Ok(totals) => {
                self.totals = totals;
                Ok(())
            }
            Err(e) => {
                self.line_items.pop();
                Err(e)
            }
        }
    }

    /// Build a line at the draft's default VAT rate.
    pub fn line(
        &self,
        description: impl Into<String>,
        quantity: rust_decimal::Decimal,
        unit_price: rust_decimal::Decimal,
    ) -> LineItem {
        LineItem::new(description, quantity, unit_price, self.default_vat_rate)
    }

    /// Check the draft and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.client.is_none() {
            issues.push("Missing client".to_string());
        }

        if self.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            issues.push("Missing project title".to_string());
        }

        if self.line_items.is_empty() {
            issues.push("No line items".to_string());
        } else if self.totals.total_gross.is_zero() {
            issues.push("Total is zero".to_string());
        }

        issues
    }
}
