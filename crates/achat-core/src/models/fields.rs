//! Fields extracted from the OCR text of a purchase invoice.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest tolerated gap between TTC and HT + TVA, in whole currency units.
///
/// HT and TVA are rounded independently, so their sum can drift by one unit.
pub const TRIAD_TOLERANCE: Decimal = Decimal::ONE;

/// Candidate invoice fields, used to pre-fill a purchase form.
///
/// Absent values mean "requires manual entry", never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Supplier name, empty when no matcher succeeded.
    pub supplier: String,

    /// Invoice reference, empty when not found.
    pub reference: String,

    /// Tax-exclusive amount, rounded to a whole unit.
    #[serde(rename = "amountHT")]
    pub amount_ht: Option<Decimal>,

    /// VAT amount, rounded to a whole unit.
    #[serde(rename = "amountTVA")]
    pub amount_tva: Option<Decimal>,

    /// Tax-inclusive total, as read from the document.
    #[serde(rename = "amountTTC")]
    pub amount_ttc: Option<Decimal>,
}

impl ExtractedFields {
    /// Number of monetary values present.
    pub fn amount_count(&self) -> usize {
        [self.amount_ht, self.amount_tva, self.amount_ttc]
            .iter()
            .filter(|a| a.is_some())
            .count()
    }

    /// Check `TTC == HT + TVA` within [`TRIAD_TOLERANCE`].
    ///
    /// Returns `true` when fewer than three amounts are known, since there is
    /// nothing to compare.
    pub fn is_consistent(&self) -> bool {
        match (self.amount_ht, self.amount_tva, self.amount_ttc) {
            (Some(ht), Some(tva), Some(ttc)) => ht
                .checked_add(tva)
                .and_then(|sum| ttc.checked_sub(sum))
                .is_some_and(|diff| diff.abs() <= TRIAD_TOLERANCE),
            _ => true,
        }
    }

    /// Names of the fields the caller still has to fill in by hand.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.supplier.is_empty() {
            missing.push("supplier");
        }
        if self.reference.is_empty() {
            missing.push("reference");
        }
        if self.amount_ht.is_none() {
            missing.push("amountHT");
        }
        if self.amount_tva.is_none() {
            missing.push("amountTVA");
        }
        if self.amount_ttc.is_none() {
            missing.push("amountTTC");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(ht: Option<i64>, tva: Option<i64>, ttc: Option<i64>) -> ExtractedFields {
        ExtractedFields {
            amount_ht: ht.map(Decimal::from),
            amount_tva: tva.map(Decimal::from),
            amount_ttc: ttc.map(Decimal::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_is_consistent_within_one_unit() {
        assert!(fields(Some(100), Some(18), Some(118)).is_consistent());
        assert!(fields(Some(100), Some(18), Some(119)).is_consistent());
        assert!(!fields(Some(100), Some(18), Some(120)).is_consistent());
        assert!(fields(Some(100), None, Some(500)).is_consistent());
    }

    #[test]
    fn test_missing_fields() {
        let f = fields(Some(1), None, None);
        assert_eq!(f.amount_count(), 1);
        assert_eq!(
            f.missing_fields(),
            vec!["supplier", "reference", "amountTVA", "amountTTC"]
        );
    }

    #[test]
    fn test_serializes_with_triad_names() {
        let json = serde_json::to_value(fields(Some(320000), Some(57600), Some(377600))).unwrap();
        assert!(json.get("amountHT").is_some());
        assert!(json.get("amountTVA").is_some());
        assert!(json.get("amountTTC").is_some());
    }
}
