//! Purchase invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, InvoiceParser, PurchaseInvoiceParser};

use crate::models::ExtractedFields;

/// Extract invoice fields with the default settings.
///
/// `filename` is the original document name, used only as a supplier hint.
pub fn extract(text: &str, filename: Option<&str>) -> ExtractedFields {
    PurchaseInvoiceParser::new().extract(text, filename)
}
