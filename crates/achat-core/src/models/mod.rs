//! Data models for extracted invoice fields, purchases and journal entries.

pub mod config;
pub mod fields;
pub mod journal;
pub mod purchase;

pub use config::{AchatConfig, ChartOfAccounts, ExtractionConfig, OutputConfig};
pub use fields::ExtractedFields;
pub use journal::{EntryMeta, JournalEntry, JournalLine};
pub use purchase::{PaymentMode, PaymentStatus, PurchaseRecord};
