use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use savings_goals::cli::{
    handle_goal_command, handle_show_command, handle_transactions_command, GoalCommands,
};
use savings_goals::config::{paths::GoalPaths, settings::Settings};
use savings_goals::logging::init_tracing;
use savings_goals::storage::Storage;

#[derive(Parser)]
#[command(
    name = "goals",
    version,
    about = "Track savings goals against your bank transactions",
    long_about = "Splits every transaction in your exported bank ledgers across the \
                  savings goals running on its date, in proportion to how much each \
                  goal needs per day, then shows how far ahead or behind each goal is."
)]
struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Goal management commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Show expected and achieved savings for every goal
    Show {
        /// Project progress as of this date instead of now
        #[arg(long)]
        as_of: Option<String>,
        /// Read ledger files from this directory
        #[arg(long)]
        ledger_dir: Option<PathBuf>,
    },

    /// List transactions found in the ledger directory
    #[command(alias = "txn")]
    Transactions {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Read ledger files from this directory
        #[arg(long)]
        ledger_dir: Option<PathBuf>,
    },

    /// Create the data directories and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = GoalPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Goal(cmd)) => {
            handle_goal_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Show { as_of, ledger_dir }) => {
            handle_show_command(&storage, &settings, as_of.as_deref(), ledger_dir)?;
        }
        Some(Commands::Transactions { limit, ledger_dir }) => {
            handle_transactions_command(&paths, &settings, limit, ledger_dir)?;
        }
        Some(Commands::Init) => {
            println!("Initializing savings goals at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!(
                "Put your bank's .qif or .csv exports in: {}",
                settings.resolve_ledger_dir(&paths).display()
            );
            println!("Run 'goals goal create <name> --target <amount>' to add a goal.");
        }
        Some(Commands::Config) => {
            println!("Savings Goals Configuration");
            println!("===========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Goals file:       {}", paths.goals_file().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Ledger directory: {}",
                settings.resolve_ledger_dir(&paths).display()
            );
            println!("Initialized:      {}", storage.is_initialized());
            println!("Goals:            {}", storage.goals.count()?);
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
        }
        None => {
            println!("goals - savings goal tracking");
            println!();
            if !storage.is_initialized() {
                println!("Run 'goals init' to set up your data directory.");
            }
            println!("Run 'goals --help' for usage information.");
            println!("Run 'goals show' to see how your goals are doing.");
        }
    }

    Ok(())
}
