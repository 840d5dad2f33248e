//! Core library for purchase invoice processing.
//!
//! This crate provides:
//! - Field extraction from the OCR text of a purchase invoice (supplier,
//!   reference, HT / TVA / TTC amounts)
//! - Double-entry journal generation from confirmed purchases
//! - Journal filtering, totals and CSV export
//! - Configuration (extraction settings, chart of accounts)

pub mod error;
pub mod invoice;
pub mod journal;
pub mod models;
pub mod money;

pub use error::{AchatError, Result};
pub use invoice::{extract, ExtractionResult, InvoiceParser, PurchaseInvoiceParser};
pub use journal::{
    generate, journal_to_csv, write_journal_csv, JournalFilter, JournalGenerator, JournalSummary,
};
pub use models::config::AccountRole;
pub use models::{
    AchatConfig, ChartOfAccounts, EntryMeta, ExtractedFields, ExtractionConfig, JournalEntry,
    JournalLine, OutputConfig, PaymentMode, PaymentStatus, PurchaseRecord,
};
