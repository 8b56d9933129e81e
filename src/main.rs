use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use kakeibo::cli::{
    handle_audit_command, handle_export_command, handle_report_command, handle_transaction_command,
    ExportArgs, ReportCommands, TransactionCommands,
};
use kakeibo::config::{paths::KakeiboPaths, settings::Settings};
use kakeibo::display::format_category_sets;
use kakeibo::storage::Storage;

#[derive(Parser)]
#[command(
    name = "kakeibo",
    version,
    about = "Terminal household account book",
    long_about = "kakeibo records income and expense transactions and shows \
                  monthly, daily, per-category and calendar summaries of them."
)]
struct Cli {
    /// Profile whose data to use (defaults to the configured user, "guest")
    #[arg(short, long, global = true, env = "KAKEIBO_USER")]
    user: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Export transactions to CSV or JSON
    Export(ExportArgs),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Include entries of every profile
        #[arg(long)]
        all_users: bool,
    },

    /// List the income and expense categories
    Categories,

    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let filter = match std::env::var("KAKEIBO_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    // Initialize paths and settings
    let paths = KakeiboPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let user = cli.user.unwrap_or_else(|| settings.default_user.clone());
    debug!(base = %paths.base_dir().display(), user = %user, "starting");

    // Initialize storage
    let storage = Storage::open(paths.clone(), user)?;
    storage.load()?;

    match cli.command {
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, args)?;
        }
        Some(Commands::Audit { limit, all_users }) => {
            handle_audit_command(&storage, limit, all_users)?;
        }
        Some(Commands::Categories) => {
            print!("{}", format_category_sets());
        }
        Some(Commands::Init) => {
            println!("Initializing kakeibo at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save()?;
            println!("Initialization complete!");
            println!();
            println!("Profile '{}' is ready.", storage.user());
            println!("Run 'kakeibo categories' to see the categories.");
        }
        Some(Commands::Config) => {
            println!("kakeibo Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Transactions:     {}", storage.transactions.path().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Current user:      {}", storage.user());
            println!("  Default user:      {}", settings.default_user);
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!(
                "  First day of week: {}",
                if settings.week_starts_monday() { "Monday" } else { "Sunday" }
            );
        }
        None => {
            println!("kakeibo - terminal household account book");
            println!();
            println!("Run 'kakeibo --help' for usage information.");
        }
    }

    Ok(())
}
