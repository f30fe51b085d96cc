//! Intent parsing for quote and invoice requests.
//!
//! The three extractors in [`rules`] are independent and run over the same
//! normalized text; [`IntentParser`] merges their results.

mod parser;
pub mod rules;

pub use parser::{normalize, parse_user_intent, IntentParser};
