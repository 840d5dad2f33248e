//! Double-entry journal models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::purchase::{PaymentMode, PaymentStatus};

/// Tolerance below which debit and credit totals are considered equal.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// A balanced set of debit/credit lines recording one purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Entry identifier, copied from the purchase or its 1-based position.
    pub id: u64,

    /// Accounting date.
    pub date: NaiveDate,

    /// Purchase reference.
    pub reference: String,

    /// Entry description.
    pub label: String,

    /// Payment status of the source purchase.
    pub status: PaymentStatus,

    /// Journal lines, debits first.
    pub lines: Vec<JournalLine>,

    /// Sum of the debit column.
    pub total_debit: Decimal,

    /// Sum of the credit column.
    pub total_credit: Decimal,

    /// Whether debits equal credits within [`BALANCE_TOLERANCE`].
    pub is_balanced: bool,

    /// Fields copied from the purchase for filtering and display.
    pub meta: EntryMeta,
}

/// A single journal line. Exactly one of `debit`/`credit` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Account code.
    pub account: String,

    /// Line description.
    pub label: String,

    /// Debit amount.
    pub debit: Decimal,

    /// Credit amount.
    pub credit: Decimal,
}

/// Purchase fields carried on an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMeta {
    pub supplier: String,
    pub payment_mode: PaymentMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl JournalLine {
    /// Create a debit line.
    pub fn debit(account: impl Into<String>, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            label: label.into(),
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    /// Create a credit line.
    pub fn credit(account: impl Into<String>, label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            label: label.into(),
            debit: Decimal::ZERO,
            credit: amount,
        }
    }

    /// Whether this line is on the debit side.
    pub fn is_debit(&self) -> bool {
        !self.debit.is_zero()
    }
}

impl JournalEntry {
    /// Debit lines of the entry.
    pub fn debit_lines(&self) -> impl Iterator<Item = &JournalLine> {
        self.lines.iter().filter(|l| l.is_debit())
    }

    /// Credit lines of the entry.
    pub fn credit_lines(&self) -> impl Iterator<Item = &JournalLine> {
        self.lines.iter().filter(|l| !l.is_debit())
    }

    /// Difference between debit and credit totals.
    pub fn imbalance(&self) -> Decimal {
        self.total_debit.saturating_sub(self.total_credit)
    }
}
