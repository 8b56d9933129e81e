//! CLI commands for reports
//!
//! Provides the summary, daily, chart, category and calendar commands.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{KakeiboError, KakeiboResult};
use crate::models::TransactionType;
use crate::reports::{
    CalendarReport, CategoryReport, DailyBalancesReport, DailySummaryReport, MonthlySummaryReport,
};
use crate::storage::Storage;

use super::{parse_date, parse_month, parse_type};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expense and balance for a month
    Summary {
        /// Month (YYYY-MM, prev or next), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income, expense and balance for one day, with its transactions
    Daily {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Per-day income and expense bars for a month
    Chart {
        /// Month (YYYY-MM, prev or next), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export the per-day balances to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Breakdown of income or expenses by category
    #[command(name = "category")]
    CategoryBreakdown {
        /// Month (YYYY-MM, prev or next), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: String,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Month calendar with per-day totals
    Calendar {
        /// Month (YYYY-MM, prev or next), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Print the per-day events as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> KakeiboResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { month, output } => {
            let report = MonthlySummaryReport::generate(storage, parse_month(month.as_deref())?)?;
            match output {
                Some(path) => {
                    write_output(&path, |w| report.export_csv(w))?;
                    println!("Monthly summary exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::Daily { date, output } => {
            let report = DailySummaryReport::generate(storage, parse_date(date.as_deref())?)?;
            match output {
                Some(path) => {
                    write_output(&path, |w| report.export_csv(w))?;
                    println!("Daily summary exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::Chart { month, output } => {
            let report = DailyBalancesReport::generate(storage, parse_month(month.as_deref())?)?;
            match output {
                Some(path) => {
                    write_output(&path, |w| report.export_csv(w))?;
                    println!("Daily balances exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::CategoryBreakdown {
            month,
            transaction_type,
            output,
        } => {
            let transaction_type: TransactionType = parse_type(&transaction_type)?;
            let report =
                CategoryReport::generate(storage, parse_month(month.as_deref())?, transaction_type)?;
            match output {
                Some(path) => {
                    write_output(&path, |w| report.export_csv(w))?;
                    println!("Category report exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::Calendar { month, json } => {
            let report = CalendarReport::generate(
                storage,
                parse_month(month.as_deref())?,
                settings.week_starts_monday(),
            )?;
            if json {
                let events = serde_json::to_string_pretty(&report.events())?;
                println!("{}", events);
            } else {
                print!("{}", report.format_terminal(currency));
            }
        }
    }

    Ok(())
}

/// Write a report to `path`, flushing before reporting success
fn write_output<F>(path: &Path, write: F) -> KakeiboResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> KakeiboResult<()>,
{
    let file = File::create(path).map_err(|e| {
        KakeiboError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush().map_err(|e| {
        KakeiboError::Export(format!("Failed to write file {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Month;
    use tempfile::TempDir;

    #[test]
    fn test_write_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("summary.csv");
        let report = MonthlySummaryReport::from_transactions(Month::new(2025, 1).unwrap(), &[]);

        write_output(&path, |w| report.export_csv(w)).unwrap();

        let csv = std::fs::read_to_string(&path).unwrap();
        assert!(csv.starts_with("Month,Income,Expense,Balance,Transactions\n"));
        assert!(csv.contains("2025-01,0,0,0,0"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_output_reports_flush_failure() {
        let report = MonthlySummaryReport::from_transactions(Month::new(2025, 1).unwrap(), &[]);
        let err = write_output(Path::new("/dev/full"), |w| report.export_csv(w)).unwrap_err();
        assert!(matches!(err, KakeiboError::Export(_)));
    }
}
