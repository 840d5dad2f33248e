//! Invoice reference extraction.

use super::patterns::{DOCUMENT_CODE, INVOICE_NUMBER};
use super::{ExtractionMatch, FieldExtractor};

/// Reference extractor.
///
/// Prefers the number after "FACTURE N°" (prefixed, e.g. `FAC-2024-015`),
/// then falls back to a purchase document code such as `ACH-2025-001`.
pub struct ReferenceExtractor {
    prefix: String,
}

impl ReferenceExtractor {
    pub fn new() -> Self {
        Self::with_prefix("FAC-")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn numbered(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        INVOICE_NUMBER
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let number = caps.get(1)?.as_str();
                // "FACTURE NORMALE" must not yield a reference
                if !number.chars().any(|c| c.is_ascii_digit()) {
                    return None;
                }
                let value = format!("{}{}", self.prefix, number).to_uppercase();
                Some(ExtractionMatch::new(value, 0.95, full.as_str()).with_position(full.start(), full.end()))
            })
            .collect()
    }

    fn coded(&self, text: &str) -> Vec<ExtractionMatch<String>> {
        DOCUMENT_CODE
            .find_iter(text)
            .map(|m| {
                let value = m.as_str().split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
                ExtractionMatch::new(value, 0.7, m.as_str()).with_position(m.start(), m.end())
            })
            .collect()
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ReferenceExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = self.numbered(text);
        results.extend(self.coded(text));
        results
    }
}
