//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::{
    format_transaction_details, format_transaction_short, format_transaction_table,
};
use crate::error::KakeiboResult;
use crate::models::TransactionDraft;
use crate::services::{TransactionFilter, TransactionService};
use crate::storage::Storage;

use super::{parse_amount, parse_category, parse_date, parse_month, parse_type};

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// income or expense (also: in, out, 収入, 支出)
        #[arg(value_name = "TYPE")]
        transaction_type: String,
        /// Amount in whole yen (e.g., "1200" or "1,200")
        amount: String,
        /// What the money was for (1-50 characters)
        content: String,
        /// Category label or slug (see `kakeibo categories`)
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List transactions
    List {
        /// Month to list (YYYY-MM, prev or next), defaults to the current month
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// List every month
        #[arg(short, long)]
        all: bool,
        /// Only this date (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["month", "all"])]
        date: Option<String>,
        /// Only income or only expense
        #[arg(short = 't', long = "type")]
        transaction_type: Option<String>,
        /// Filter by category label or slug
        #[arg(short, long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New type
        #[arg(short = 't', long = "type")]
        transaction_type: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New content
        #[arg(long)]
        content: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete one or more transactions
    Delete {
        /// Transaction IDs
        #[arg(required = true)]
        ids: Vec<String>,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> KakeiboResult<()> {
    let service = TransactionService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            transaction_type,
            amount,
            content,
            category,
            date,
        } => {
            let draft = TransactionDraft {
                transaction_type: parse_type(&transaction_type)?,
                date: parse_date(date.as_deref())?,
                amount: parse_amount(&amount)?,
                content,
                category: category.as_deref().map(parse_category).transpose()?,
            };

            let txn = service.create(draft)?;

            println!("Created transaction:");
            println!("  ID:       {}", txn.id);
            println!("  Date:     {}", txn.date.format(&settings.date_format));
            println!("  Type:     {}", txn.transaction_type.label());
            println!("  Category: {}", txn.category.label());
            println!("  Content:  {}", txn.content);
            println!("  Amount:   {}", txn.amount.format_with_symbol(currency));
        }

        TransactionCommands::List {
            month,
            all,
            date,
            transaction_type,
            category,
            limit,
        } => {
            let mut filter = TransactionFilter::new();

            if let Some(date) = date {
                filter = filter.date(parse_date(Some(&date))?);
            } else if !all {
                filter = filter.month(parse_month(month.as_deref())?);
            }

            if let Some(t) = transaction_type {
                filter = filter.transaction_type(parse_type(&t)?);
            }

            if let Some(c) = category {
                filter = filter.category(parse_category(&c)?);
            }

            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let transactions = service.list(filter)?;
            print!("{}", format_transaction_table(&transactions, currency));
        }

        TransactionCommands::Show { id } => {
            let txn = service.resolve(&id)?;
            print!(
                "{}",
                format_transaction_details(&txn, currency, &settings.date_format)
            );
        }

        TransactionCommands::Edit {
            id,
            transaction_type,
            amount,
            content,
            category,
            date,
        } => {
            let txn = service.resolve(&id)?;
            let mut draft = txn.to_draft();

            if let Some(t) = transaction_type {
                draft.transaction_type = parse_type(&t)?;
            }
            if let Some(a) = amount {
                draft.amount = parse_amount(&a)?;
            }
            if let Some(c) = content {
                draft.content = c;
            }
            if let Some(c) = category {
                draft.category = Some(parse_category(&c)?);
            }
            if let Some(d) = date {
                draft.date = parse_date(Some(&d))?;
            }

            let updated = service.update(txn.id, &draft)?;
            println!("Updated transaction: {}", updated.id);
            println!("  {}", format_transaction_short(&updated, currency));
        }

        TransactionCommands::Delete { ids, force } => {
            let mut transactions = Vec::with_capacity(ids.len());
            for id in &ids {
                transactions.push(service.resolve(id)?);
            }

            if !force {
                println!("About to delete {} transaction(s):", transactions.len());
                for txn in &transactions {
                    println!("  {}", format_transaction_short(txn, currency));
                }
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let ids: Vec<_> = transactions.iter().map(|t| t.id).collect();
            let deleted = service.delete(&ids)?;
            for txn in &deleted {
                println!("Deleted transaction: {}", format_transaction_short(txn, currency));
            }
        }
    }

    Ok(())
}

