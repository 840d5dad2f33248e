//! Journal command - generate journal entries from purchase records.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::info;

use achat_core::money::format_amount;
use achat_core::{
    journal_to_csv, ChartOfAccounts, JournalEntry, JournalFilter, JournalGenerator,
    JournalSummary, PaymentMode, PaymentStatus, PurchaseRecord,
};

use super::extract::OutputFormat;
use super::load_config;

/// Arguments for the journal command.
#[derive(Args)]
pub struct JournalArgs {
    /// JSON file holding an array of purchase records
    #[arg(required = true)]
    input: PathBuf,

    /// Chart of accounts JSON file (overrides the configuration)
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Only entries with this payment status (paid, pending, partial, overdue, draft)
    #[arg(long, value_parser = parse_status)]
    status: Option<PaymentStatus>,

    /// Only entries with this payment mode (transfer, cash, check, card)
    #[arg(long, value_parser = parse_mode)]
    mode: Option<PaymentMode>,

    /// Only entries whose reference or supplier contains this text
    #[arg(short, long)]
    query: Option<String>,

    /// First date included (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last date included (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Report records that break the purchase invariants
    #[arg(long)]
    validate: bool,
}

fn parse_status(s: &str) -> Result<PaymentStatus, String> {
    PaymentStatus::parse(s).ok_or_else(|| format!("unknown payment status: {}", s))
}

fn parse_mode(s: &str) -> Result<PaymentMode, String> {
    PaymentMode::parse(s).ok_or_else(|| format!("unknown payment mode: {}", s))
}

pub async fn run(args: JournalArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let records: Vec<PurchaseRecord> = serde_json::from_str(&fs::read_to_string(&args.input)?)?;

    let chart = match &args.chart {
        Some(path) => {
            let chart: ChartOfAccounts = serde_json::from_str(&fs::read_to_string(path)?)?;
            chart.validate()?;
            chart
        }
        None => config.chart.clone(),
    };

    info!("Loaded {} purchase records from {}", records.len(), args.input.display());

    if args.validate {
        for (idx, record) in records.iter().enumerate() {
            let issues = record.validate();
            if issues.is_empty() {
                continue;
            }
            eprintln!(
                "{} Record {} ({}):",
                style("⚠").yellow(),
                record.id.unwrap_or(idx as u64 + 1),
                record.reference
            );
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let entries = JournalGenerator::new(chart).generate(&records);

    let filter = JournalFilter {
        status: args.status,
        payment_mode: args.mode,
        query: args.query.clone(),
        from: args.from,
        to: args.to,
    };
    let selected = filter.apply(&entries);
    let summary = JournalSummary::from_entries(selected.iter().copied());

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&selected)?,
        OutputFormat::Csv => journal_to_csv(selected.iter().copied())?,
        OutputFormat::Text => format_text(&selected, &summary, &config.output.currency),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} entries written to {}",
            style("✓").green(),
            summary.entries,
            output_path.display()
        );
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    if summary.unbalanced > 0 {
        eprintln!(
            "{} {} unbalanced entries need review",
            style("⚠").yellow(),
            summary.unbalanced
        );
    }

    Ok(())
}

fn format_text(entries: &[&JournalEntry], summary: &JournalSummary, currency: &str) -> String {
    let mut output = String::new();

    for entry in entries {
        let flag = if entry.is_balanced { "" } else { "  [UNBALANCED]" };
        output.push_str(&format!(
            "#{} {} {} ({}){}\n",
            entry.id,
            entry.date,
            entry.label,
            entry.status.display(),
            flag
        ));
        for line in &entry.lines {
            let (debit, credit) = (
                if line.debit.is_zero() { String::new() } else { format_amount(line.debit) },
                if line.credit.is_zero() { String::new() } else { format_amount(line.credit) },
            );
            output.push_str(&format!(
                "  {:<8} {:<32} {:>14} {:>14}\n",
                line.account, line.label, debit, credit
            ));
        }
        output.push('\n');
    }

    output.push_str(&format!("Entries: {}\n", summary.entries));
    output.push_str(&format!("Total debit:  {} {}\n", format_amount(summary.total_debit), currency));
    output.push_str(&format!("Total credit: {} {}\n", format_amount(summary.total_credit), currency));
    if summary.unbalanced > 0 {
        output.push_str(&format!("Unbalanced: {}\n", summary.unbalanced));
    }

    output
}
