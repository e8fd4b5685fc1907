use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::{debug, info};

use finance_lib::config::Config;
use finance_lib::export::{self, ExportFormat};
use finance_lib::report::{self, ReportLayout};
use finance_lib::transaction::{parse_date, parse_kind};
use finance_lib::{Session, Tracker};

#[derive(Parser)]
#[command(
    name = "finance-tracker",
    version,
    about = "Track personal income and expenses from the command line"
)]
struct Cli {
    /// Account to act as
    #[arg(short, long, env = "FINANCE_TRACKER_USER")]
    user: String,

    /// Password for the account. Prompted for when not given.
    #[arg(short, long, env = "FINANCE_TRACKER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Register,

    #[command(flatten)]
    Session(SessionCommands),
}

/// Commands that run as a logged-in user.
#[derive(Subcommand)]
enum SessionCommands {
    /// Record an income or expense
    Add {
        /// Either "income" or "expense"
        kind: String,
        /// Category name
        category: String,
        /// Non-negative amount, e.g. "12.50"
        #[arg(allow_negative_numbers = true)]
        amount: String,
        /// Free-form note
        #[arg(short, long)]
        description: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// List transactions, most recent first
    List {
        /// Only show this many transactions
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show total income, total expenses and balance
    Summary,

    /// Show totals per type and category
    Insights,

    /// Write all transactions to a file
    Export {
        #[arg(short, long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        /// Directory to write to. Defaults to the configured export directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Report,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Report => ExportFormat::Report,
        }
    }
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    finance_lib::tracing::init(finance_lib::tracing::level_for_verbosity(cli.verbose))?;

    let config = match get_config_file() {
        Some(config_path) => {
            debug!(path = %config_path.display(), "Using config file");
            Config::from_file(config_path)?
        }
        None => Config::from_env()?,
    };

    let (user_repo, transaction_repo) =
        finance_repo::diesel_repo::create_repos(&config.database_path, config.max_pool_size)?;
    let tracker = Tracker::new(user_repo, transaction_repo);

    match cli.command {
        Commands::Register => {
            let password = match cli.password {
                Some(password) => password,
                None => prompt_new_password()?,
            };
            tracker.register(&cli.user, &password)?;
            println!("Registered {}", cli.user);
            Ok(())
        }
        Commands::Session(command) => {
            let password = match cli.password {
                Some(password) => password,
                None => prompt_password("Password: ")?,
            };
            let session = tracker.login(&cli.user, &password)?;
            run_command(&session, &config, command)
        }
    }
}

fn run_command(
    session: &Session,
    config: &Config,
    command: SessionCommands,
) -> Result<(), anyhow::Error> {
    match command {
        SessionCommands::Add {
            kind,
            category,
            amount,
            description,
            date,
        } => {
            let kind = parse_kind(&kind)?;
            let amount = Decimal::from_str(amount.trim())
                .with_context(|| format!("Invalid amount '{}'", amount))?;
            let date = date.as_deref().map(parse_date).transpose()?;
            let transaction =
                session.add_transaction(kind, &category, amount, description.as_deref(), date)?;
            info!(id = transaction.id, "Transaction added");
            println!(
                "Added {} of {} to {} on {}",
                transaction.kind,
                report::format_money(transaction.amount),
                transaction.category,
                transaction.date.format("%Y-%m-%d")
            );
        }
        SessionCommands::List { limit } => {
            let transactions = session.transactions(limit);
            if transactions.is_empty() {
                println!("No transactions recorded");
            } else {
                let table = report::to_tabular(&transactions, ReportLayout::Paginated);
                export::write_table(&table, io::stdout().lock())?;
            }
        }
        SessionCommands::Summary => {
            println!("{}", report::format_summary(&session.summary()));
        }
        SessionCommands::Insights => {
            let totals = session.category_totals();
            if totals.is_empty() {
                println!("No transactions recorded");
            } else {
                export::write_table(&report::category_table(&totals), io::stdout().lock())?;
            }
        }
        SessionCommands::Export { format, output } => {
            let destination = output.or_else(|| config.export_dir.clone());
            let path = export::export_transactions(session, format.into(), destination.as_deref())?;
            println!("Exported to {}", path.display());
        }
    }
    Ok(())
}

fn get_config_file() -> Option<PathBuf> {
    let config_current_dir = PathBuf::from("config.toml");
    if config_current_dir.exists() {
        return Some(config_current_dir);
    }
    if let Ok(config_env) = std::env::var("CONFIGURATION_DIRECTORY") {
        let config_path = PathBuf::from(config_env).join("config.toml");
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}

fn prompt_password(prompt: &str) -> Result<String, anyhow::Error> {
    rpassword::prompt_password(prompt).context("Unable to read password")
}

fn prompt_new_password() -> Result<String, anyhow::Error> {
    let password = prompt_password("New password: ")?;
    let confirmation = prompt_password("Confirm password: ")?;
    if password != confirmation {
        anyhow::bail!("Passwords do not match");
    }
    Ok(password)
}
