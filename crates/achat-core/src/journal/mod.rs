//! Journal entry generation from confirmed purchases.
//!
//! Each purchase becomes one entry: the expense and deductible VAT on the
//! debit side, and on the credit side either the treasury account (paid), the
//! treasury account plus the supplier (partially paid) or the supplier alone.

mod export;
mod filter;

pub use export::{journal_to_csv, write_journal_csv, CSV_HEADER};
pub use filter::{JournalFilter, JournalSummary};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::models::config::AccountRole;
use crate::models::journal::BALANCE_TOLERANCE;
use crate::models::{
    ChartOfAccounts, EntryMeta, JournalEntry, JournalLine, PaymentMode, PaymentStatus,
    PurchaseRecord,
};
use crate::money::round_cents;

/// Label of the deductible VAT line.
const VAT_LINE_LABEL: &str = "TVA déductible";

/// Label of the treasury line of a partial payment.
const PARTIAL_PAYMENT_LABEL: &str = "Règlement partiel";

/// Turns purchase records into journal entries against one chart of accounts.
#[derive(Debug, Clone, Default)]
pub struct JournalGenerator {
    chart: ChartOfAccounts,
}

impl JournalGenerator {
    pub fn new(chart: ChartOfAccounts) -> Self {
        Self { chart }
    }

    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    /// One entry per record, in input order. Never fails; an unbalanced entry
    /// is kept and flagged through `is_balanced`.
    pub fn generate(&self, records: &[PurchaseRecord]) -> Vec<JournalEntry> {
        info!("Generating journal for {} purchases", records.len());

        let entries: Vec<JournalEntry> = records
            .iter()
            .enumerate()
            .map(|(idx, record)| self.entry(idx, record))
            .collect();

        let unbalanced = entries.iter().filter(|e| !e.is_balanced).count();
        if unbalanced > 0 {
            warn!("{} of {} journal entries are unbalanced", unbalanced, entries.len());
        }

        entries
    }

    /// Build the entry for the record at position `idx`.
    pub fn entry(&self, idx: usize, record: &PurchaseRecord) -> JournalEntry {
        let mut lines = Vec::with_capacity(4);

        if let Some(ht) = positive(record.amount_ht) {
            lines.push(JournalLine::debit(
                self.chart.account(AccountRole::Expense),
                format!("Achat - {}", record.supplier),
                ht,
            ));
        }

        if let Some(tva) = positive(record.amount_tva).filter(|tva| *tva > Decimal::ZERO) {
            lines.push(JournalLine::debit(
                self.chart.account(AccountRole::VatDeductible),
                VAT_LINE_LABEL,
                tva,
            ));
        }

        lines.extend(self.credit_lines(record));

        let debit = total(lines.iter().map(|l| l.debit));
        let credit = total(lines.iter().map(|l| l.credit));
        let is_balanced = match (debit, credit) {
            (Some(debit), Some(credit)) => round_cents(debit)
                .checked_sub(round_cents(credit))
                .is_some_and(|diff| diff.abs() < BALANCE_TOLERANCE),
            _ => false,
        };
        let total_debit = round_cents(debit.unwrap_or(Decimal::MAX));
        let total_credit = round_cents(credit.unwrap_or(Decimal::MAX));

        let id = record
            .id
            .or_else(|| u64::try_from(idx).ok().and_then(|i| i.checked_add(1)))
            .unwrap_or(u64::MAX);
        if !is_balanced {
            warn!(
                "Entry {} ({}) is unbalanced: debit {} credit {}",
                id, record.reference, total_debit, total_credit
            );
        } else {
            debug!("Entry {} ({}): {} lines, total {}", id, record.reference, lines.len(), total_debit);
        }

        JournalEntry {
            id,
            date: record.date,
            reference: record.reference.clone(),
            label: format!("Achat {} - {}", record.reference, record.supplier),
            status: record.payment_status,
            lines,
            total_debit,
            total_credit,
            is_balanced,
            meta: EntryMeta {
                supplier: record.supplier.clone(),
                payment_mode: record.payment_mode,
                due_date: record.due_date,
            },
        }
    }

    fn credit_lines(&self, record: &PurchaseRecord) -> Vec<JournalLine> {
        let Some(ttc) = positive(record.amount_ttc) else {
            return Vec::new();
        };
        let treasury = self.chart.account(treasury_role(record.payment_mode));
        let payable_label = format!("Fournisseur {}", record.supplier);

        if record.payment_status == PaymentStatus::Paid {
            return vec![JournalLine::credit(
                treasury,
                format!("Règlement {}", record.payment_mode.label()),
                ttc,
            )];
        }

        if let Some(paid) = record.valid_partial_payment() {
            let paid = round_cents(paid);
            return vec![
                JournalLine::credit(treasury, PARTIAL_PAYMENT_LABEL, paid),
                JournalLine::credit(
                    self.chart.account(AccountRole::Supplier),
                    payable_label,
                    round_cents(ttc.saturating_sub(paid)),
                ),
            ];
        }

        if record.payment_status == PaymentStatus::Partial {
            debug!(
                "Partial payment of {} is unusable, {} treated as fully owed",
                record.reference, ttc
            );
        }

        vec![JournalLine::credit(
            self.chart.account(AccountRole::Supplier),
            payable_label,
            ttc,
        )]
    }
}

/// Treasury account role for a payment mode.
pub fn treasury_role(mode: PaymentMode) -> AccountRole {
    match mode {
        PaymentMode::Cash => AccountRole::Cash,
        PaymentMode::Card => AccountRole::Card,
        PaymentMode::Transfer | PaymentMode::Check => AccountRole::Bank,
    }
}

/// Generate journal entries for `records` against `chart`.
pub fn generate(records: &[PurchaseRecord], chart: &ChartOfAccounts) -> Vec<JournalEntry> {
    JournalGenerator::new(chart.clone()).generate(records)
}

/// Round to cents, dropping absent and zero amounts.
fn positive(amount: Option<Decimal>) -> Option<Decimal> {
    amount.map(round_cents).filter(|a| !a.is_zero())
}

/// Sum of line amounts, `None` on overflow.
fn total(mut amounts: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    amounts.try_fold(Decimal::ZERO, Decimal::checked_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(status: PaymentStatus, mode: PaymentMode) -> PurchaseRecord {
        PurchaseRecord {
            id: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            supplier: "SENCOM".to_string(),
            reference: "FAC-2024-015".to_string(),
            amount_ht: Some(Decimal::from(320000)),
            amount_tva: Some(Decimal::from(57600)),
            amount_ttc: Some(Decimal::from(377600)),
            payment_mode: mode,
            payment_status: status,
            partial_amount_paid: None,
            due_date: None,
        }
    }

    fn lines(entry: &JournalEntry) -> Vec<(&str, Decimal, Decimal)> {
        entry
            .lines
            .iter()
            .map(|l| (l.account.as_str(), l.debit, l.credit))
            .collect()
    }

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn one(record: PurchaseRecord) -> JournalEntry {
        let mut entries = generate(&[record], &ChartOfAccounts::default());
        entries.remove(0)
    }

    #[test]
    fn test_paid_by_transfer() {
        let entry = one(record(PaymentStatus::Paid, PaymentMode::Transfer));

        assert_eq!(
            lines(&entry),
            vec![
                ("601", d(320000), d(0)),
                ("44562", d(57600), d(0)),
                ("512", d(0), d(377600)),
            ]
        );
        assert_eq!(entry.total_debit, d(377600));
        assert_eq!(entry.total_credit, d(377600));
        assert!(entry.is_balanced);
        assert_eq!(entry.label, "Achat FAC-2024-015 - SENCOM");
        assert_eq!(entry.lines[0].label, "Achat - SENCOM");
        assert_eq!(entry.lines[1].label, "TVA déductible");
        assert_eq!(entry.lines[2].label, "Règlement virement");
    }

    #[test]
    fn test_partial_payment() {
        let mut r = record(PaymentStatus::Partial, PaymentMode::Transfer);
        r.partial_amount_paid = Some(d(150000));
        let entry = one(r);

        let credits: Vec<_> = entry.credit_lines().map(|l| (l.account.as_str(), l.credit)).collect();
        assert_eq!(credits, vec![("512", d(150000)), ("401", d(227600))]);
        assert_eq!(entry.lines[2].label, "Règlement partiel");
        assert_eq!(entry.lines[3].label, "Fournisseur SENCOM");
        assert!(entry.is_balanced);
    }

    #[test]
    fn test_partial_without_amount_is_fully_owed() {
        let entry = one(record(PaymentStatus::Partial, PaymentMode::Transfer));

        let credits: Vec<_> = entry.credit_lines().map(|l| (l.account.as_str(), l.credit)).collect();
        assert_eq!(credits, vec![("401", d(377600))]);
        assert!(entry.is_balanced);
    }

    #[test]
    fn test_partial_out_of_range_is_fully_owed() {
        for paid in [d(0), d(-5), d(377600), d(400000)] {
            let mut r = record(PaymentStatus::Partial, PaymentMode::Cash);
            r.partial_amount_paid = Some(paid);
            let entry = one(r);
            let credits: Vec<_> = entry.credit_lines().map(|l| l.account.as_str()).collect();
            assert_eq!(credits, vec!["401"], "paid = {}", paid);
        }
    }

    #[test]
    fn test_treasury_follows_payment_mode() {
        let cases = [
            (PaymentMode::Cash, "571"),
            (PaymentMode::Card, "512"),
            (PaymentMode::Check, "512"),
            (PaymentMode::Transfer, "512"),
        ];
        for (mode, account) in cases {
            let entry = one(record(PaymentStatus::Paid, mode));
            assert_eq!(entry.lines.last().map(|l| l.account.as_str()), Some(account));
        }

        let chart = ChartOfAccounts {
            card: "5121".to_string(),
            ..Default::default()
        };
        let entries = generate(&[record(PaymentStatus::Paid, PaymentMode::Card)], &chart);
        assert_eq!(entries[0].lines[2].account, "5121");
    }

    #[test]
    fn test_unpaid_statuses_credit_the_supplier() {
        for status in [PaymentStatus::Pending, PaymentStatus::Overdue, PaymentStatus::Draft] {
            let entry = one(record(status, PaymentMode::Cash));
            assert_eq!(lines(&entry)[2], ("401", d(0), d(377600)));
            assert_eq!(entry.status, status);
        }
    }

    #[test]
    fn test_zero_vat_has_no_vat_line() {
        let mut r = record(PaymentStatus::Paid, PaymentMode::Transfer);
        r.amount_ht = Some(d(150000));
        r.amount_tva = Some(d(0));
        r.amount_ttc = Some(d(150000));
        let entry = one(r);

        assert_eq!(lines(&entry), vec![("601", d(150000), d(0)), ("512", d(0), d(150000))]);
        assert!(entry.is_balanced);
    }

    #[test]
    fn test_negative_vat_has_no_vat_line() {
        let mut r = record(PaymentStatus::Paid, PaymentMode::Transfer);
        r.amount_ht = Some(d(1000));
        r.amount_tva = Some(d(-100));
        r.amount_ttc = Some(d(900));
        let entry = one(r);

        assert_eq!(lines(&entry), vec![("601", d(1000), d(0)), ("512", d(0), d(900))]);
        assert!(entry.debit_lines().all(|l| l.debit > Decimal::ZERO));
        assert!(!entry.is_balanced);
    }

    #[test]
    fn test_huge_amounts_do_not_panic() {
        let mut r = record(PaymentStatus::Paid, PaymentMode::Transfer);
        r.amount_ht = Some(Decimal::MAX);
        r.amount_tva = Some(Decimal::MAX);
        r.amount_ttc = Some(Decimal::MAX);
        let entry = one(r);

        assert_eq!(entry.lines.len(), 3);
        assert!(!entry.is_balanced);
    }

    #[test]
    fn test_ids_and_order() {
        let mut first = record(PaymentStatus::Paid, PaymentMode::Transfer);
        first.reference = "A".to_string();
        let mut second = record(PaymentStatus::Pending, PaymentMode::Transfer);
        second.reference = "B".to_string();
        second.id = Some(42);
        let mut third = record(PaymentStatus::Draft, PaymentMode::Transfer);
        third.reference = "C".to_string();

        let entries = generate(&[first, second, third], &ChartOfAccounts::default());
        let ids: Vec<_> = entries.iter().map(|e| (e.id, e.reference.as_str())).collect();
        assert_eq!(ids, vec![(1, "A"), (42, "B"), (3, "C")]);
    }

    #[test]
    fn test_unbalanced_entry_is_kept() {
        let mut r = record(PaymentStatus::Paid, PaymentMode::Transfer);
        r.amount_ttc = Some(d(400000));
        let entry = one(r);

        assert!(!entry.is_balanced);
        assert_eq!(entry.imbalance(), d(-22400));
    }

    #[test]
    fn test_missing_amounts_omit_lines() {
        let mut r = record(PaymentStatus::Pending, PaymentMode::Transfer);
        r.amount_tva = None;
        r.amount_ttc = None;
        let entry = one(r);

        assert_eq!(lines(&entry), vec![("601", d(320000), d(0))]);
        assert!(!entry.is_balanced);
    }

    #[test]
    fn test_cents_are_rounded() {
        let mut r = record(PaymentStatus::Paid, PaymentMode::Transfer);
        r.amount_ht = Some(Decimal::new(100005, 3));
        r.amount_tva = Some(Decimal::new(18001, 3));
        r.amount_ttc = Some(Decimal::new(118006, 3));
        let entry = one(r);

        assert_eq!(entry.lines[0].debit, Decimal::new(10001, 2));
        assert_eq!(entry.lines[1].debit, Decimal::new(1800, 2));
        assert!(entry.is_balanced);
    }

    #[test]
    fn test_meta_is_copied() {
        let mut r = record(PaymentStatus::Pending, PaymentMode::Check);
        r.due_date = NaiveDate::from_ymd_opt(2025, 4, 14);
        let entry = one(r);

        assert_eq!(
            entry.meta,
            EntryMeta {
                supplier: "SENCOM".to_string(),
                payment_mode: PaymentMode::Check,
                due_date: NaiveDate::from_ymd_opt(2025, 4, 14),
            }
        );
    }

    #[test]
    fn test_well_formed_records_balance() {
        let statuses = [
            PaymentStatus::Paid,
            PaymentStatus::Pending,
            PaymentStatus::Partial,
            PaymentStatus::Overdue,
            PaymentStatus::Draft,
        ];
        let modes = [PaymentMode::Transfer, PaymentMode::Cash, PaymentMode::Check, PaymentMode::Card];

        let mut records = Vec::new();
        for status in statuses {
            for mode in modes {
                let mut r = record(status, mode);
                r.partial_amount_paid = Some(d(1000));
                records.push(r);
            }
        }

        for entry in generate(&records, &ChartOfAccounts::default()) {
            assert!(entry.is_balanced);
            assert_eq!(entry.is_balanced, entry.imbalance().abs() < BALANCE_TOLERANCE);
        }
    }
}
