//! Core library for quote and invoice drafting.
//!
//! This crate provides:
//! - Intent parsing of free-text requests (quote or invoice, client, project title)
//! - Client matching against a caller-supplied roster
//! - Quote/invoice drafts with French VAT totals

pub mod document;
pub mod error;
pub mod intent;
pub mod models;

pub use error::{DevisError, DocumentError, Result};
pub use intent::{parse_user_intent, IntentParser};
pub use intent::rules::{detect_document_type, extract_project_title, find_client_in_message, match_client_by_name};
pub use models::client::Client;
pub use models::config::DevisConfig;
pub use models::document::{DocumentDraft, DocumentTotals, LineItem, VatRate};
pub use models::intent::{DocumentType, ParsedIntent};
