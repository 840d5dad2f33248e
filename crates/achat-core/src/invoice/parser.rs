//! Purchase invoice parser: supplier, reference and reconciled amounts.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::{ExtractedFields, ExtractionConfig};

use super::rules::{
    default_supplier_matchers, extract_amounts, reconcile, Document, FieldExtractor,
    ReconcileRule, ReferenceExtractor, SupplierMatcher,
};

/// Result of invoice extraction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted fields.
    pub fields: ExtractedFields,
    /// Rule used to complete the HT / TVA / TTC triad.
    pub rule: ReconcileRule,
    /// Matcher that produced the supplier name.
    pub supplier_source: Option<&'static str>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for invoice parsing.
pub trait InvoiceParser {
    /// Parse an invoice from OCR text and an optional original file name.
    fn parse(&self, text: &str, filename: Option<&str>) -> ExtractionResult;
}

/// Rule-based purchase invoice parser.
///
/// Stateless once built: the same input always yields the same fields, and a
/// parser can be shared between threads.
pub struct PurchaseInvoiceParser {
    matchers: Vec<Box<dyn SupplierMatcher>>,
    references: ReferenceExtractor,
}

impl PurchaseInvoiceParser {
    /// Create a parser with the default extraction settings.
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            matchers: default_supplier_matchers(config),
            references: ReferenceExtractor::with_prefix(config.reference_prefix.clone()),
        }
    }

    /// Replace the supplier matchers. They are tried in the given order.
    pub fn with_matchers(mut self, matchers: Vec<Box<dyn SupplierMatcher>>) -> Self {
        self.matchers = matchers;
        self
    }

    /// Extract the invoice fields. Never fails; unmatched fields stay empty.
    pub fn extract(&self, text: &str, filename: Option<&str>) -> ExtractedFields {
        self.inspect(text, filename).fields
    }

    /// Same as [`InvoiceParser::parse`] without timing, for targets that have
    /// no monotonic clock.
    pub fn inspect(&self, text: &str, filename: Option<&str>) -> ExtractionResult {
        let doc = Document::new(text, filename);
        let mut warnings = Vec::new();

        let (supplier_source, supplier) = match self.find_supplier(&doc) {
            Some((source, name)) => (Some(source), name),
            None => {
                warnings.push("Could not identify the supplier".to_string());
                (None, String::new())
            }
        };

        let reference = match self.references.extract(text) {
            Some(m) => m.value,
            None => {
                warnings.push("Could not extract the invoice reference".to_string());
                String::new()
            }
        };

        let found = extract_amounts(text);
        debug!(
            "Amounts found: ht={:?} tva={:?} ttc={:?} rate={:?}",
            found.ht.as_ref().map(|m| m.value),
            found.tva.as_ref().map(|m| m.value),
            found.ttc.as_ref().map(|m| m.value),
            found.vat_rate.as_ref().map(|m| m.value),
        );

        let triad = reconcile(
            found.ht.map(|m| m.value),
            found.tva.map(|m| m.value),
            found.ttc.map(|m| m.value),
            found.vat_rate.map(|m| m.value),
        );
        debug!("Amounts reconciled with {:?}", triad.rule);

        if triad.rule.assumes_zero_vat() {
            warnings.push("No VAT amount or rate found, VAT assumed to be zero".to_string());
        }

        let fields = ExtractedFields {
            supplier,
            reference,
            amount_ht: triad.ht,
            amount_tva: triad.tva,
            amount_ttc: triad.ttc,
        };

        for name in ["amountHT", "amountTVA", "amountTTC"] {
            if fields.missing_fields().contains(&name) {
                warnings.push(format!("Could not determine {}", name));
            }
        }

        if !fields.is_consistent() {
            warn!(
                "Inconsistent amounts: HT {:?} + TVA {:?} != TTC {:?}",
                fields.amount_ht, fields.amount_tva, fields.amount_ttc
            );
            warnings.push("Amounts do not satisfy TTC = HT + TVA".to_string());
        }

        ExtractionResult {
            fields,
            rule: triad.rule,
            supplier_source,
            warnings,
            processing_time_ms: 0,
        }
    }

    fn find_supplier(&self, doc: &Document<'_>) -> Option<(&'static str, String)> {
        self.matchers.iter().find_map(|matcher| {
            let name = matcher.find(doc)?;
            debug!("Supplier {:?} matched by {}", name, matcher.name());
            Some((matcher.name(), name))
        })
    }
}

impl Default for PurchaseInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for PurchaseInvoiceParser {
    fn parse(&self, text: &str, filename: Option<&str>) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing invoice from {} characters of text", text.len());

        let mut result = self.inspect(text, filename);
        result.processing_time_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Extraction completed in {}ms with {} warnings",
            result.processing_time_ms,
            result.warnings.len()
        );

        result
    }
}
