//! CLI command for data export
//!
//! Exports a month's transactions (or all of them) as CSV or JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{KakeiboError, KakeiboResult};
use crate::export::{csv, json};
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::parse_month;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One row per transaction
    Csv,
    /// Transactions with totals and metadata
    Json,
}

/// Arguments of the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Month to export (YYYY-MM, prev or next); omit to export everything
    #[arg(short, long)]
    pub month: Option<String>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file path; stdout if omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> KakeiboResult<()> {
    let service = TransactionService::new(storage);

    let month = args.month.as_deref().map(|m| parse_month(Some(m))).transpose()?;
    let filter = match month {
        Some(m) => TransactionFilter::new().month(m),
        None => TransactionFilter::new(),
    };
    let transactions = service.list(filter)?;
    let count = transactions.len();

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                KakeiboError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Csv => csv::export_transactions_csv(&transactions, &mut writer)?,
        ExportFormat::Json => {
            let export = json::TransactionExport::new(storage.user(), month, transactions);
            json::export_transactions_json(&export, &mut writer, args.pretty)?;
        }
    }
    writer
        .flush()
        .map_err(|e| KakeiboError::Export(e.to_string()))?;

    if let Some(path) = &args.output {
        println!("Exported {} transaction(s) to: {}", count, path.display());
    }

    Ok(())
}
