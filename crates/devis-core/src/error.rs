//! Error types for the devis-core library.
//!
//! Intent parsing never fails; these errors cover document building and the
//! configuration layer.

use thiserror::Error;

/// Main error type for the devis library.
#[derive(Error, Debug)]
pub enum DevisError {
    /// Document building error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to quote and invoice documents.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// Quantity is negative.
    #[error("invalid quantity on line {line}: {value}")]
    InvalidQuantity { line: usize, value: String },

    /// Unit price is negative.
    #[error("invalid unit price on line {line}: {value}")]
    InvalidPrice { line: usize, value: String },

    /// Discount outside 0..=100.
    #[error("invalid discount on line {line}: {value}%")]
    InvalidDiscount { line: usize, value: String },

    /// An amount on the line does not fit in a decimal.
    #[error("amount overflow on line {line}")]
    AmountOverflow { line: usize },

    /// VAT rate string could not be parsed.
    #[error("unknown VAT rate: {0}")]
    UnknownVatRate(String),
}

/// Result type for the devis library.
pub type Result<T> = std::result::Result<T, DevisError>;
