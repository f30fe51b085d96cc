//! Quote and invoice drafting.

pub mod draft;
pub mod totals;

pub use draft::document_number;
pub use totals::{compute_line, compute_totals};
