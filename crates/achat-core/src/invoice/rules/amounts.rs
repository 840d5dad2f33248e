//! Labeled amount extraction (TTC, HT) for purchase invoices.

use regex::Regex;
use rust_decimal::Decimal;

use crate::money::parse_amount;

use super::patterns::{AMOUNT_HT, HORS_TAXES, TOTAL_HT, TOTAL_TTC};
use super::vat::{VatAmountExtractor, VatRateExtractor};
use super::{ExtractionMatch, FieldExtractor};

/// Extractor for one labeled amount, trying its patterns in priority order.
///
/// Each pattern captures the amount in group 1. The first parseable capture of
/// the first pattern that yields one wins.
pub struct AmountExtractor {
    patterns: Vec<&'static Regex>,
    confidence: f32,
}

impl AmountExtractor {
    /// Tax-inclusive total: "TOTAL TTC", "TTC", "Net à payer", "Total à payer".
    pub fn ttc() -> Self {
        Self {
            patterns: vec![&*TOTAL_TTC],
            confidence: 0.95,
        }
    }

    /// Tax-exclusive total: "Hors Taxes", an amount followed by "HT", "Total HT".
    pub fn ht() -> Self {
        Self {
            patterns: vec![&*HORS_TAXES, &*AMOUNT_HT, &*TOTAL_HT],
            confidence: 0.9,
        }
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for pattern in &self.patterns {
            for caps in pattern.captures_iter(text) {
                let (Some(full), Some(amount)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };
                if let Some(value) = parse_amount(amount.as_str()) {
                    results.push(
                        ExtractionMatch::new(value, self.confidence, full.as_str().trim())
                            .with_position(full.start(), full.end()),
                    );
                }
            }
        }

        results
    }
}

/// Amount signals found in an invoice, before reconciliation.
#[derive(Debug, Clone, Default)]
pub struct InvoiceAmounts {
    /// Tax-exclusive amount.
    pub ht: Option<ExtractionMatch<Decimal>>,
    /// VAT amount.
    pub tva: Option<ExtractionMatch<Decimal>>,
    /// Tax-inclusive amount.
    pub ttc: Option<ExtractionMatch<Decimal>>,
    /// VAT rate in percent.
    pub vat_rate: Option<ExtractionMatch<Decimal>>,
}

impl InvoiceAmounts {
    /// Whether the text carried any VAT signal (amount or rate).
    pub fn has_vat_signal(&self) -> bool {
        self.tva.is_some() || self.vat_rate.is_some()
    }
}

/// Locate the labeled amounts of an invoice.
pub fn extract_amounts(text: &str) -> InvoiceAmounts {
    InvoiceAmounts {
        ht: AmountExtractor::ht().extract(text),
        tva: VatAmountExtractor::new().extract(text),
        ttc: AmountExtractor::ttc().extract(text),
        vat_rate: VatRateExtractor::new().extract(text),
    }
}
