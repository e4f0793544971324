use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use splitsmart::cli::{
    handle_balance_command, handle_expense_command, handle_export_command, handle_group_command,
    handle_report_command, handle_settle_command, handle_user_command, resolve_actor,
    CommandContext,
};
use splitsmart::config::{paths::SplitPaths, settings::Settings};
use splitsmart::mirror::{BackgroundMirror, JournalMirror, MirrorSink, NullMirror};
use splitsmart::storage::Storage;

#[derive(Parser)]
#[command(
    name = "splitsmart",
    version,
    about = "Terminal shared-expense tracker",
    long_about = "SplitSmart tracks shared expenses within groups, keeps a running \
                  ledger of who owes whom, and works out the fewest payments \
                  needed to settle everyone up."
)]
struct Cli {
    /// Act as this user (email, name or ID) instead of the logged-in one
    #[arg(long = "as", global = true, value_name = "USER")]
    as_user: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// User registration, login and profile
    #[command(subcommand)]
    User(splitsmart::cli::UserCommands),

    /// Group management commands
    #[command(subcommand)]
    Group(splitsmart::cli::GroupCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(splitsmart::cli::ExpenseCommands),

    /// Record payments and view payment history
    #[command(subcommand)]
    Settle(splitsmart::cli::SettleCommands),

    /// Balances and the settlement plan
    #[command(subcommand)]
    Balance(splitsmart::cli::BalanceCommands),

    /// Spending reports
    #[command(subcommand)]
    Report(splitsmart::cli::ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(splitsmart::cli::ExportCommands),

    /// Initialize the data directory
    Init,

    /// Delete every user, group, expense and payment
    Reset {
        /// Confirm the wipe
        #[arg(short, long)]
        yes: bool,
    },

    /// Show or change configuration
    Config {
        /// Fixed USD to INR conversion rate
        #[arg(long)]
        rate: Option<f64>,
        /// Write create events to the mirror outbox
        #[arg(long)]
        mirror: Option<bool>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    splitsmart::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = SplitPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let mirror: Box<dyn MirrorSink> = if settings.mirror_enabled {
        Box::new(BackgroundMirror::new(JournalMirror::new(
            paths.mirror_journal(),
        )))
    } else {
        Box::new(NullMirror)
    };

    let actor = resolve_actor(&storage, &settings, cli.as_user.as_deref())?;
    let ctx = CommandContext {
        storage: &storage,
        settings: &settings,
        mirror: &*mirror,
        actor,
    };

    match cli.command {
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, &mut settings, actor, cmd)?;
        }
        Some(Commands::Group(cmd)) => handle_group_command(&ctx, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&ctx, cmd)?,
        Some(Commands::Settle(cmd)) => handle_settle_command(&ctx, cmd)?,
        Some(Commands::Balance(cmd)) => handle_balance_command(&ctx, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&ctx, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&ctx, cmd)?,
        Some(Commands::Init) => {
            println!("Initializing SplitSmart at: {}", paths.base_dir().display());
            storage.save_all()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'splitsmart user register <name> <email>' to get started.");
        }
        Some(Commands::Reset { yes }) => {
            if !yes {
                anyhow::bail!(
                    "This deletes all users, groups, expenses and payments. \
                     Re-run with --yes to confirm"
                );
            }
            storage.clear_all()?;
            settings.current_user = None;
            settings.save(&paths)?;
            tracing::info!("all data cleared");
            println!("All data has been reset.");
        }
        Some(Commands::Config { rate, mirror }) => {
            if rate.is_some() || mirror.is_some() {
                if let Some(rate) = rate {
                    if !(rate.is_finite() && rate > 0.0) {
                        anyhow::bail!("Conversion rate must be a positive number");
                    }
                    settings.conversion_rate = rate;
                }
                if let Some(mirror) = mirror {
                    settings.mirror_enabled = mirror;
                }
                settings.save(&paths)?;
                println!("Configuration updated.");
                println!();
            }

            println!("SplitSmart Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Mirror outbox:    {}", paths.mirror_journal().display());
            println!(
                "Initialized:      {}",
                if storage.is_initialized() { "yes" } else { "no" }
            );
            println!();
            println!("Settings:");
            println!("  Conversion rate:  {}", settings.conversion_rate);
            println!("  Mirror enabled:   {}", settings.mirror_enabled);
            match actor {
                Some(id) => println!("  Acting user:      #{}", id),
                None => println!("  Acting user:      (none)"),
            }
        }
        None => {
            println!("SplitSmart - Terminal shared-expense tracker");
            println!();
            println!("Run 'splitsmart --help' for usage information.");
        }
    }

    Ok(())
}
