//! Confirmed purchase records, the input of the journal generator.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchase invoice after human review.
///
/// Keys of the French-language front end (`fournisseur`, `ref`,
/// `ht`, `tva`, `ttc`, `statut`, `partiel`, `echeance`) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    /// Record identifier. Entries fall back to the 1-based position when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Invoice date.
    pub date: NaiveDate,

    /// Supplier name.
    #[serde(default, alias = "fournisseur")]
    pub supplier: String,

    /// Invoice reference.
    #[serde(default, alias = "ref")]
    pub reference: String,

    /// Tax-exclusive amount.
    #[serde(default, rename = "amountHT", alias = "ht")]
    pub amount_ht: Option<Decimal>,

    /// VAT amount.
    #[serde(default, rename = "amountTVA", alias = "tva")]
    pub amount_tva: Option<Decimal>,

    /// Tax-inclusive amount.
    #[serde(default, rename = "amountTTC", alias = "ttc")]
    pub amount_ttc: Option<Decimal>,

    /// How the supplier is (or will be) paid.
    #[serde(default, alias = "mode")]
    pub payment_mode: PaymentMode,

    /// Settlement state of the invoice.
    #[serde(default, alias = "statut")]
    pub payment_status: PaymentStatus,

    /// Amount already paid, for partially paid invoices.
    #[serde(default, alias = "partiel", skip_serializing_if = "Option::is_none")]
    pub partial_amount_paid: Option<Decimal>,

    /// Payment due date.
    #[serde(default, alias = "echeance", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Payment mode of a purchase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Bank transfer (virement).
    #[default]
    #[serde(alias = "virement")]
    Transfer,
    /// Cash (espèces).
    #[serde(alias = "espece", alias = "especes")]
    Cash,
    /// Check (chèque).
    #[serde(alias = "cheque")]
    Check,
    /// Card (carte).
    #[serde(alias = "carte")]
    Card,
}

impl PaymentMode {
    /// Label used in journal line descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMode::Transfer => "virement",
            PaymentMode::Cash => "espèces",
            PaymentMode::Check => "chèque",
            PaymentMode::Card => "carte",
        }
    }

    /// Parse a payment mode from user input (English or French).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "transfer" | "virement" => Some(PaymentMode::Transfer),
            "cash" | "espece" | "espèce" | "especes" | "espèces" => Some(PaymentMode::Cash),
            "check" | "cheque" | "chèque" => Some(PaymentMode::Check),
            "card" | "carte" => Some(PaymentMode::Card),
            _ => None,
        }
    }
}

/// Payment status of a purchase, supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Fully paid (payée).
    #[serde(alias = "payee")]
    Paid,
    /// Awaiting payment (en attente).
    #[serde(alias = "en_attente")]
    Pending,
    /// Partially paid (partielle).
    #[serde(alias = "partielle")]
    Partial,
    /// Past due (en retard).
    #[serde(alias = "en_retard")]
    Overdue,
    /// Not yet confirmed (brouillon).
    #[default]
    #[serde(alias = "brouillon")]
    Draft,
}

impl PaymentStatus {
    /// Parse a status from user input (English or French).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paid" | "payee" | "payée" => Some(PaymentStatus::Paid),
            "pending" | "en_attente" => Some(PaymentStatus::Pending),
            "partial" | "partielle" => Some(PaymentStatus::Partial),
            "overdue" | "en_retard" => Some(PaymentStatus::Overdue),
            "draft" | "brouillon" => Some(PaymentStatus::Draft),
            _ => None,
        }
    }

    /// Display label.
    pub fn display(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Payée",
            PaymentStatus::Pending => "En attente",
            PaymentStatus::Partial => "Partiellement payée",
            PaymentStatus::Overdue => "En retard",
            PaymentStatus::Draft => "Brouillon",
        }
    }
}

impl PurchaseRecord {
    /// The partial payment, if this record carries a usable one.
    ///
    /// Usable means status `partial` and `0 < paid < TTC`.
    pub fn valid_partial_payment(&self) -> Option<Decimal> {
        if self.payment_status != PaymentStatus::Partial {
            return None;
        }
        let paid = self.partial_amount_paid?;
        let ttc = self.amount_ttc?;
        (paid > Decimal::ZERO && paid < ttc).then_some(paid)
    }

    /// Validate the record and return any issues found.
    ///
    /// Issues never block journal generation; they are meant for review.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.supplier.trim().is_empty() {
            issues.push("Missing supplier".to_string());
        }

        if self.reference.trim().is_empty() {
            issues.push("Missing reference".to_string());
        }

        match (self.amount_ht, self.amount_tva, self.amount_ttc) {
            (Some(ht), Some(tva), Some(ttc)) => {
                if ht + tva != ttc {
                    issues.push(format!("TTC ({}) differs from HT + TVA ({})", ttc, ht + tva));
                }
                if ht.is_sign_negative() || tva.is_sign_negative() {
                    issues.push("Negative amount".to_string());
                }
            }
            _ => issues.push("Missing amount (HT, TVA and TTC are required)".to_string()),
        }

        if let Some(paid) = self.partial_amount_paid {
            if self.payment_status != PaymentStatus::Partial {
                issues.push("Partial amount set on a record that is not partially paid".to_string());
            } else if self.valid_partial_payment().is_none() {
                issues.push(format!("Partial amount ({}) must be between 0 and TTC", paid));
            }
        } else if self.payment_status == PaymentStatus::Partial {
            issues.push("Partially paid record without a partial amount".to_string());
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PurchaseRecord {
        PurchaseRecord {
            id: Some(1),
            date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            supplier: "SENCOM SARL".to_string(),
            reference: "ACH-2025-001".to_string(),
            amount_ht: Some(Decimal::from(320000)),
            amount_tva: Some(Decimal::from(57600)),
            amount_ttc: Some(Decimal::from(377600)),
            payment_mode: PaymentMode::Transfer,
            payment_status: PaymentStatus::Paid,
            partial_amount_paid: None,
            due_date: None,
        }
    }

    #[test]
    fn test_deserialize_french_keys() {
        let json = r#"{
            "id": 3, "date": "2025-08-05", "fournisseur": "Office Depot",
            "ref": "ACH-2025-003", "ht": 90000, "tva": 16200, "ttc": 106200,
            "mode": "carte", "echeance": "2025-08-20", "statut": "partielle", "partiel": 50000
        }"#;

        let r: PurchaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.supplier, "Office Depot");
        assert_eq!(r.reference, "ACH-2025-003");
        assert_eq!(r.payment_mode, PaymentMode::Card);
        assert_eq!(r.payment_status, PaymentStatus::Partial);
        assert_eq!(r.partial_amount_paid, Some(Decimal::from(50000)));
        assert_eq!(r.due_date, NaiveDate::from_ymd_opt(2025, 8, 20));
    }

    #[test]
    fn test_deserialize_english_keys() {
        let json = r#"{
            "date": "2025-08-02", "supplier": "Sonatel", "reference": "ACH-2025-002",
            "amountHT": 150000, "amountTVA": 27000, "amountTTC": 177000,
            "paymentMode": "cash", "paymentStatus": "pending"
        }"#;

        let r: PurchaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.id, None);
        assert_eq!(r.payment_mode, PaymentMode::Cash);
        assert_eq!(r.payment_status, PaymentStatus::Pending);
        assert_eq!(r.amount_ttc, Some(Decimal::from(177000)));
    }

    #[test]
    fn test_valid_partial_payment() {
        let mut r = record();
        r.payment_status = PaymentStatus::Partial;
        r.partial_amount_paid = Some(Decimal::from(150000));
        assert_eq!(r.valid_partial_payment(), Some(Decimal::from(150000)));

        r.partial_amount_paid = Some(Decimal::from(377600));
        assert_eq!(r.valid_partial_payment(), None);

        r.partial_amount_paid = Some(Decimal::ZERO);
        assert_eq!(r.valid_partial_payment(), None);

        r.payment_status = PaymentStatus::Paid;
        r.partial_amount_paid = Some(Decimal::from(1000));
        assert_eq!(r.valid_partial_payment(), None);
    }

    #[test]
    fn test_validate() {
        assert!(record().validate().is_empty());

        let mut r = record();
        r.amount_ttc = Some(Decimal::from(377000));
        r.payment_status = PaymentStatus::Partial;
        let issues = r.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("differs"));
    }

    #[test]
    fn test_parse_mode_and_status() {
        assert_eq!(PaymentMode::parse("Virement"), Some(PaymentMode::Transfer));
        assert_eq!(PaymentMode::parse("espèces"), Some(PaymentMode::Cash));
        assert_eq!(PaymentMode::parse("bitcoin"), None);
        assert_eq!(PaymentStatus::parse("en_retard"), Some(PaymentStatus::Overdue));
        assert_eq!(PaymentStatus::parse("paid"), Some(PaymentStatus::Paid));
    }
}
