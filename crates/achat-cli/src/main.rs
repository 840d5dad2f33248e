//! `achat`: reads the OCR text of supplier invoices into purchase fields
//! (supplier, reference, HT / TVA / TTC) and posts confirmed purchases to a
//! double-entry purchase journal exported as CSV.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, journal};

/// Purchase invoice fields from OCR text, and the purchase journal they feed
#[derive(Parser)]
#[command(name = "achat")]
#[command(author, version, about)]
#[command(long_about = "Extract supplier, reference and HT / TVA / TTC amounts from the OCR \
text of purchase invoices, then turn confirmed purchases into balanced journal entries \
(expense and deductible VAT debited; treasury, supplier or both credited depending on \
the payment status) exported as CSV.")]
struct Cli {
    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the config file (extraction settings and chart of accounts)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract supplier, reference and amounts from one OCR text file
    Extract(extract::ExtractArgs),

    /// Extract many OCR text files in parallel, with an optional summary CSV
    Batch(batch::BatchArgs),

    /// Post purchase records (JSON) to the journal and export the entries
    Journal(journal::JournalArgs),

    /// Show or edit extraction settings and the chart of accounts
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()).await,
        Commands::Journal(args) => journal::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
