//! Extract command - extract purchase fields from an OCR text file.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use achat_core::invoice::{InvoiceParser, PurchaseInvoiceParser};
use achat_core::money::format_amount;
use achat_core::ExtractedFields;
use rust_decimal::Decimal;

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// OCR text file ("-" reads standard input)
    #[arg(required = true)]
    input: PathBuf,

    /// Original document name used as a supplier hint (default: input file name)
    #[arg(short, long)]
    name: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show extraction warnings and timing
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let from_stdin = args.input.as_os_str() == "-";
    let text = if from_stdin {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        fs::read_to_string(&args.input)?
    };

    let name = args.name.clone().or_else(|| {
        (!from_stdin)
            .then(|| args.input.file_name().map(|n| n.to_string_lossy().into_owned()))
            .flatten()
    });

    info!("Extracting fields from {}", args.input.display());

    let parser = PurchaseInvoiceParser::with_config(&config.extraction);
    let result = parser.parse(&text, name.as_deref());

    let output = format_fields(&result.fields, args.format, &config.output.currency)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            result.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render extracted fields in the requested format.
pub fn format_fields(
    fields: &ExtractedFields,
    format: OutputFormat,
    currency: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
        OutputFormat::Csv => format_csv(fields),
        OutputFormat::Text => Ok(format_text(fields, currency)),
    }
}

fn plain(amount: Option<Decimal>) -> String {
    amount.map(|a| a.to_string()).unwrap_or_default()
}

fn format_csv(fields: &ExtractedFields) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["supplier", "reference", "amount_ht", "amount_tva", "amount_ttc"])?;
    wtr.write_record([
        fields.supplier.as_str(),
        fields.reference.as_str(),
        plain(fields.amount_ht).as_str(),
        plain(fields.amount_tva).as_str(),
        plain(fields.amount_ttc).as_str(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(fields: &ExtractedFields, currency: &str) -> String {
    let or_missing = |s: &str| {
        if s.is_empty() {
            "(to be entered)".to_string()
        } else {
            s.to_string()
        }
    };
    let amount = |a: Option<Decimal>| match a {
        Some(a) => format!("{} {}", format_amount(a), currency),
        None => "(to be entered)".to_string(),
    };

    let mut output = String::new();
    output.push_str(&format!("Supplier:  {}\n", or_missing(&fields.supplier)));
    output.push_str(&format!("Reference: {}\n", or_missing(&fields.reference)));
    output.push('\n');
    output.push_str(&format!("  HT:  {}\n", amount(fields.amount_ht)));
    output.push_str(&format!("  TVA: {}\n", amount(fields.amount_tva)));
    output.push_str(&format!("  TTC: {}\n", amount(fields.amount_ttc)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> ExtractedFields {
        ExtractedFields {
            supplier: "SENCOM".to_string(),
            reference: String::new(),
            amount_ht: Some(Decimal::from(320000)),
            amount_tva: Some(Decimal::from(57600)),
            amount_ttc: Some(Decimal::from(377600)),
        }
    }

    #[test]
    fn test_format_text() {
        let text = format_fields(&fields(), OutputFormat::Text, "FCFA").unwrap();
        assert!(text.contains("Supplier:  SENCOM"));
        assert!(text.contains("Reference: (to be entered)"));
        assert!(text.contains("TTC: 377 600 FCFA"));
    }

    #[test]
    fn test_format_csv() {
        let csv = format_fields(&fields(), OutputFormat::Csv, "FCFA").unwrap();
        assert_eq!(
            csv,
            "supplier,reference,amount_ht,amount_tva,amount_ttc\nSENCOM,,320000,57600,377600\n"
        );
    }
}
