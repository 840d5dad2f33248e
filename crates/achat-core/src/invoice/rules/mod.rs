//! Rule-based field extractors for purchase invoices.

pub mod amounts;
pub mod patterns;
pub mod reconcile;
pub mod reference;
pub mod supplier;
pub mod vat;

pub use amounts::{extract_amounts, AmountExtractor, InvoiceAmounts};
pub use reconcile::{reconcile, Reconciled, ReconcileRule};
pub use reference::ReferenceExtractor;
pub use supplier::{
    default_supplier_matchers, Document, DomainMatcher, FilenameMatcher, HeaderLineMatcher,
    SupplierMatcher,
};
pub use vat::{VatAmountExtractor, VatRateExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Split a line into alphanumeric tokens.
pub(crate) fn tokens(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty())
}

/// Whether `phrase` appears in `s` as a sequence of whole tokens, ignoring case.
pub(crate) fn contains_phrase(s: &str, phrase: &str) -> bool {
    let phrase: Vec<String> = tokens(phrase).map(str::to_lowercase).collect();
    if phrase.is_empty() {
        return false;
    }
    let line: Vec<String> = tokens(s).map(str::to_lowercase).collect();
    line.windows(phrase.len()).any(|w| w == phrase.as_slice())
}

/// Whether any of `phrases` appears in `s`.
pub(crate) fn contains_any_phrase(s: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| contains_phrase(s, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_phrase() {
        assert!(contains_phrase("Garage DK  Tuning, Dakar", "DK TUNING"));
        assert!(contains_phrase("SENCOM sarl", "SARL"));
        assert!(!contains_phrase("Salut", "SA"));
        assert!(!contains_phrase("anything", ""));
    }
}
