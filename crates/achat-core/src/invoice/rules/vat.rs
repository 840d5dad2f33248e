//! VAT amount and VAT rate extraction.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use crate::money::parse_amount;

use super::patterns::{VAT_AMOUNT, VAT_RATE};
use super::{ExtractionMatch, FieldExtractor};

/// VAT amount extractor.
///
/// Skips "TVA incluse" (VAT already inside a quoted price, not a deductible
/// line) and numbers glued to a word, such as a VAT registration number.
pub struct VatAmountExtractor;

impl VatAmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VatAmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VatAmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in VAT_AMOUNT.captures_iter(text) {
            let (Some(full), Some(gap), Some(amount)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            let gap = gap.as_str();
            if gap.trim_start().to_lowercase().starts_with("incluse") {
                debug!("Skipping included VAT mention: {:?}", full.as_str());
                continue;
            }
            if gap.chars().last().is_some_and(char::is_alphabetic) {
                debug!("Skipping identifier after TVA: {:?}", full.as_str());
                continue;
            }

            if let Some(value) = parse_amount(amount.as_str()) {
                results.push(
                    ExtractionMatch::new(value, 0.9, full.as_str().trim())
                        .with_position(full.start(), full.end()),
                );
            }
        }

        results
    }
}

/// VAT rate extractor, in percent ("TVA 18 %" gives 18).
pub struct VatRateExtractor;

impl VatRateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VatRateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VatRateExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for caps in VAT_RATE.captures_iter(text) {
            let (Some(full), Some(rate)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if let Ok(value) = Decimal::from_str(&rate.as_str().replace(',', ".")) {
                results.push(
                    ExtractionMatch::new(value, 0.9, full.as_str())
                        .with_position(full.start(), full.end()),
                );
            }
        }

        results
    }
}

/// VAT amount for a tax-exclusive amount and a rate in percent.
///
/// `None` when the product does not fit in a `Decimal`.
pub fn vat_from_rate(ht: Decimal, rate_percent: Decimal) -> Option<Decimal> {
    ht.checked_mul(rate_percent)?.checked_div(Decimal::ONE_HUNDRED)
}

/// Tax-exclusive amount contained in a tax-inclusive one at the given rate.
///
/// `None` on overflow.
pub fn ht_from_ttc(ttc: Decimal, rate_percent: Decimal) -> Option<Decimal> {
    let divisor = rate_percent
        .checked_div(Decimal::ONE_HUNDRED)?
        .checked_add(Decimal::ONE)?;
    if divisor.is_zero() {
        Some(ttc)
    } else {
        ttc.checked_div(divisor)
    }
}
