//! Configuration structures for extraction and journal generation.

use serde::{Deserialize, Serialize};

use crate::error::{AchatError, Result};

/// Main configuration for achat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchatConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Chart of accounts used by the journal generator.
    pub chart: ChartOfAccounts,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Semantic account roles of a purchase journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountRole {
    /// Purchases / expenses.
    Expense,
    /// Deductible VAT.
    VatDeductible,
    /// Supplier payable.
    Supplier,
    /// Bank.
    Bank,
    /// Cash register.
    Cash,
    /// Card payments.
    Card,
}

/// Mapping from account roles to account codes.
///
/// Defaults follow the usual French-style numbering (601, 44562, 401, 512, 571).
/// Deployments under another plan (e.g. SYSCOHADA) override the codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOfAccounts {
    /// Purchases.
    pub expense: String,
    /// Deductible VAT.
    pub vat_deductible: String,
    /// Suppliers.
    pub supplier: String,
    /// Banks.
    pub bank: String,
    /// Cash.
    pub cash: String,
    /// Cards.
    pub card: String,
}

impl Default for ChartOfAccounts {
    fn default() -> Self {
        Self {
            expense: "601".to_string(),
            vat_deductible: "44562".to_string(),
            supplier: "401".to_string(),
            bank: "512".to_string(),
            cash: "571".to_string(),
            card: "512".to_string(),
        }
    }
}

impl ChartOfAccounts {
    /// Account code for a role.
    pub fn account(&self, role: AccountRole) -> &str {
        match role {
            AccountRole::Expense => &self.expense,
            AccountRole::VatDeductible => &self.vat_deductible,
            AccountRole::Supplier => &self.supplier,
            AccountRole::Bank => &self.bank,
            AccountRole::Cash => &self.cash,
            AccountRole::Card => &self.card,
        }
    }

    /// Check that every role has a code.
    pub fn validate(&self) -> Result<()> {
        let roles = [
            ("expense", &self.expense),
            ("vat_deductible", &self.vat_deductible),
            ("supplier", &self.supplier),
            ("bank", &self.bank),
            ("cash", &self.cash),
            ("card", &self.card),
        ];

        for (name, code) in roles {
            if code.trim().is_empty() {
                return Err(AchatError::Config(format!("empty account code for {}", name)));
            }
        }

        Ok(())
    }
}

/// Field extraction configuration.
///
/// Word lists are compared case-insensitively against whole tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Consumer mail providers never taken as a supplier domain.
    pub generic_mail_domains: Vec<String>,

    /// Legal entity suffixes marking a company name line.
    pub legal_suffixes: Vec<String>,

    /// Supplier names recognised as-is in header lines.
    pub known_suppliers: Vec<String>,

    /// Document-type words removed from the filename hint.
    pub filename_noise_words: Vec<String>,

    /// Words disqualifying an uppercase line as a supplier name.
    pub header_words: Vec<String>,

    /// Number of non-empty lines scanned for a supplier name.
    pub header_lines: usize,

    /// Prefix of references read after "FACTURE N°".
    pub reference_prefix: String,
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            generic_mail_domains: strings(&[
                "gmail", "yahoo", "outlook", "hotmail", "live", "icloud", "aol", "protonmail",
            ]),
            legal_suffixes: strings(&[
                "SARL", "SA", "SAS", "SASU", "SNC", "EURL", "SUARL", "GIE", "LTD", "INC", "CORP",
                "LLC", "GMBH",
            ]),
            known_suppliers: strings(&[
                "SONATEL", "ORANGE", "SDE", "WARI", "GA2C", "SENCOM", "FREE", "EXPRESSO",
                "DK TUNING",
            ]),
            filename_noise_words: strings(&[
                "facture", "invoice", "bon", "note", "debit", "credit", "scan", "copie",
            ]),
            header_words: strings(&[
                "facture", "invoice", "bon", "devis", "reçu", "recu", "receipt", "total", "ttc",
                "tva", "ht", "montant", "net", "payer",
            ]),
            header_lines: 15,
            reference_prefix: "FAC-".to_string(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Currency label shown next to amounts.
    pub currency: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            currency: "FCFA".to_string(),
        }
    }
}

impl AchatConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.chart.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
