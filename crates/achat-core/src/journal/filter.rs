//! Journal filtering and totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{JournalEntry, PaymentMode, PaymentStatus};
use crate::money::round_cents;

/// Criteria for selecting journal entries. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JournalFilter {
    pub status: Option<PaymentStatus>,
    pub payment_mode: Option<PaymentMode>,
    /// Case-insensitive text searched in the reference and the supplier.
    pub query: Option<String>,
    /// First date included.
    pub from: Option<NaiveDate>,
    /// Last date included.
    pub to: Option<NaiveDate>,
}

impl JournalFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: PaymentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_payment_mode(mut self, mode: PaymentMode) -> Self {
        self.payment_mode = Some(mode);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn matches(&self, entry: &JournalEntry) -> bool {
        if self.status.is_some_and(|s| s != entry.status) {
            return false;
        }
        if self.payment_mode.is_some_and(|m| m != entry.meta.payment_mode) {
            return false;
        }
        if self.from.is_some_and(|from| entry.date < from) {
            return false;
        }
        if self.to.is_some_and(|to| entry.date > to) {
            return false;
        }

        match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                entry.reference.to_lowercase().contains(&q)
                    || entry.meta.supplier.to_lowercase().contains(&q)
            }
            _ => true,
        }
    }

    /// Entries matching the filter, in their original order.
    pub fn apply<'a>(&self, entries: &'a [JournalEntry]) -> Vec<&'a JournalEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Totals over a set of journal entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSummary {
    pub entries: usize,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub unbalanced: usize,
}

impl JournalSummary {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a JournalEntry>,
    {
        let mut summary = Self::default();
        for entry in entries {
            summary.entries += 1;
            summary.total_debit = summary.total_debit.saturating_add(entry.total_debit);
            summary.total_credit = summary.total_credit.saturating_add(entry.total_credit);
            if !entry.is_balanced {
                summary.unbalanced += 1;
            }
        }
        summary.total_debit = round_cents(summary.total_debit);
        summary.total_credit = round_cents(summary.total_credit);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::generate;
    use crate::models::{ChartOfAccounts, PurchaseRecord};
    use pretty_assertions::assert_eq;

    fn records() -> Vec<PurchaseRecord> {
        let json = r#"[
            {"date": "2025-01-10", "fournisseur": "SENCOM", "ref": "FAC-001",
             "ht": 100000, "tva": 18000, "ttc": 118000, "statut": "payee", "mode": "virement"},
            {"date": "2025-02-05", "fournisseur": "Orange", "ref": "ACH-2025-002",
             "ht": 50000, "tva": 9000, "ttc": 59000, "statut": "en_attente", "mode": "espece"},
            {"date": "2025-03-20", "fournisseur": "DK Tuning", "ref": "FAC-003",
             "ht": 20000, "tva": 3600, "ttc": 30000, "statut": "partielle", "mode": "carte",
             "partiel": 10000}
        ]"#;
        serde_json::from_str(json).unwrap()
    }

    fn refs(entries: Vec<&JournalEntry>) -> Vec<&str> {
        entries.iter().map(|e| e.reference.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let entries = generate(&records(), &ChartOfAccounts::default());
        assert_eq!(JournalFilter::new().apply(&entries).len(), 3);
    }

    #[test]
    fn test_filter_by_status_and_mode() {
        let entries = generate(&records(), &ChartOfAccounts::default());

        let filter = JournalFilter::new().with_status(PaymentStatus::Pending);
        assert_eq!(refs(filter.apply(&entries)), vec!["ACH-2025-002"]);

        let filter = JournalFilter::new().with_payment_mode(PaymentMode::Card);
        assert_eq!(refs(filter.apply(&entries)), vec!["FAC-003"]);
    }

    #[test]
    fn test_filter_by_query() {
        let entries = generate(&records(), &ChartOfAccounts::default());

        assert_eq!(refs(JournalFilter::new().with_query("orange").apply(&entries)), vec!["ACH-2025-002"]);
        assert_eq!(refs(JournalFilter::new().with_query("fac-").apply(&entries)), vec!["FAC-001", "FAC-003"]);
        assert_eq!(JournalFilter::new().with_query("   ").apply(&entries).len(), 3);
    }

    #[test]
    fn test_filter_by_dates_is_inclusive() {
        let entries = generate(&records(), &ChartOfAccounts::default());
        let filter = JournalFilter::new().between(
            NaiveDate::from_ymd_opt(2025, 2, 5),
            NaiveDate::from_ymd_opt(2025, 3, 20),
        );
        assert_eq!(refs(filter.apply(&entries)), vec!["ACH-2025-002", "FAC-003"]);
    }

    #[test]
    fn test_summary() {
        let entries = generate(&records(), &ChartOfAccounts::default());
        let summary = JournalSummary::from_entries(&entries);

        assert_eq!(summary.entries, 3);
        assert_eq!(summary.total_debit, Decimal::from(118000 + 59000 + 23600));
        assert_eq!(summary.total_credit, Decimal::from(118000 + 59000 + 30000));
        assert_eq!(summary.unbalanced, 1);
    }
}
