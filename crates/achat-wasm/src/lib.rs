//! WASM bindings for purchase invoice extraction and journal generation.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! The caller runs OCR itself and hands over the recognised text.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use achat_core::invoice::{ExtractionResult, PurchaseInvoiceParser};
use achat_core::{ChartOfAccounts, ExtractedFields, ExtractionConfig, JournalEntry, PurchaseRecord};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_f64(amount: Option<Decimal>) -> Option<f64> {
    amount.and_then(|a| a.to_f64())
}

/// Extracted fields with plain numbers, as the form expects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsFields {
    supplier: String,
    reference: String,
    #[serde(rename = "amountHT")]
    amount_ht: Option<f64>,
    #[serde(rename = "amountTVA")]
    amount_tva: Option<f64>,
    #[serde(rename = "amountTTC")]
    amount_ttc: Option<f64>,
}

impl From<&ExtractedFields> for JsFields {
    fn from(fields: &ExtractedFields) -> Self {
        Self {
            supplier: fields.supplier.clone(),
            reference: fields.reference.clone(),
            amount_ht: to_f64(fields.amount_ht),
            amount_tva: to_f64(fields.amount_tva),
            amount_ttc: to_f64(fields.amount_ttc),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsExtraction {
    fields: JsFields,
    supplier_source: Option<&'static str>,
    warnings: Vec<String>,
}

impl From<ExtractionResult> for JsExtraction {
    fn from(result: ExtractionResult) -> Self {
        Self {
            fields: JsFields::from(&result.fields),
            supplier_source: result.supplier_source,
            warnings: result.warnings,
        }
    }
}

/// Extract purchase fields from OCR text.
///
/// `filename` is the uploaded file name, used only as a supplier hint.
#[wasm_bindgen]
pub fn extract_fields(text: &str, filename: Option<String>) -> Result<JsValue, JsValue> {
    let fields = achat_core::extract(text, filename.as_deref());
    serde_wasm_bindgen::to_value(&JsFields::from(&fields)).map_err(js_error)
}

/// Parse a regional amount (e.g., "1.234,50" or "377 600 FCFA").
#[wasm_bindgen]
pub fn parse_amount(amount: &str) -> Option<f64> {
    achat_core::money::parse_amount(amount).and_then(|d| d.to_f64())
}

/// Format an amount with space-grouped thousands.
#[wasm_bindgen]
pub fn format_amount(amount: f64) -> String {
    Decimal::from_f64(amount)
        .map(achat_core::money::format_amount)
        .unwrap_or_else(|| amount.to_string())
}

/// Default chart of accounts.
#[wasm_bindgen]
pub fn default_chart() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&ChartOfAccounts::default()).map_err(js_error)
}

fn read_records(records: JsValue) -> Result<Vec<PurchaseRecord>, JsValue> {
    serde_wasm_bindgen::from_value(records).map_err(js_error)
}

fn read_chart(chart: JsValue) -> Result<ChartOfAccounts, JsValue> {
    if chart.is_undefined() || chart.is_null() {
        return Ok(ChartOfAccounts::default());
    }
    let chart: ChartOfAccounts = serde_wasm_bindgen::from_value(chart).map_err(js_error)?;
    chart.validate().map_err(js_error)?;
    Ok(chart)
}

fn journal(records: JsValue, chart: JsValue) -> Result<Vec<JournalEntry>, JsValue> {
    let records = read_records(records)?;
    let chart = read_chart(chart)?;
    Ok(achat_core::generate(&records, &chart))
}

/// Generate journal entries from purchase records.
///
/// `chart` may be omitted to use the default accounts. Amounts in the
/// returned entries are decimal strings so cents stay exact.
#[wasm_bindgen]
pub fn generate_journal(records: JsValue, chart: JsValue) -> Result<JsValue, JsValue> {
    let entries = journal(records, chart)?;
    serde_wasm_bindgen::to_value(&entries).map_err(js_error)
}

/// Generate journal entries and render them as CSV for download.
#[wasm_bindgen]
pub fn journal_csv(records: JsValue, chart: JsValue) -> Result<String, JsValue> {
    let entries = journal(records, chart)?;
    achat_core::journal_to_csv(&entries).map_err(js_error)
}

/// Purchase field extractor class for browser use.
#[wasm_bindgen]
pub struct PurchaseExtractor {
    parser: PurchaseInvoiceParser,
}

#[wasm_bindgen]
impl PurchaseExtractor {
    /// Create an extractor with the default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: PurchaseInvoiceParser::new(),
        }
    }

    /// Create an extractor from extraction settings (known suppliers, etc.).
    #[wasm_bindgen]
    pub fn with_config(config: JsValue) -> Result<PurchaseExtractor, JsValue> {
        let config: ExtractionConfig = serde_wasm_bindgen::from_value(config).map_err(js_error)?;
        Ok(Self {
            parser: PurchaseInvoiceParser::with_config(&config),
        })
    }

    /// Extract fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, filename: Option<String>) -> Result<JsValue, JsValue> {
        let fields = self.parser.extract(text, filename.as_deref());
        serde_wasm_bindgen::to_value(&JsFields::from(&fields)).map_err(js_error)
    }

    /// Extract fields together with the warnings to show next to the form.
    #[wasm_bindgen]
    pub fn extract_with_warnings(&self, text: &str, filename: Option<String>) -> Result<JsValue, JsValue> {
        let result = self.parser.inspect(text, filename.as_deref());
        serde_wasm_bindgen::to_value(&JsExtraction::from(result)).map_err(js_error)
    }
}

impl Default for PurchaseExtractor {
    fn default() -> Self {
        Self::new()
    }
}
