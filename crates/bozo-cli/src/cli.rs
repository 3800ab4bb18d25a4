use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use bozo_core::VERSION;

/// bozo - a double-entry bookkeeping CLI
#[derive(Parser)]
#[command(name = "bozo")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the database file
    #[arg(short = 'd', long, global = true, env = "BOZO_DB")]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Name of the database file, without extension (e.g. ledger)
    #[arg(long)]
    pub name: String,

    /// Folder where the database is created (must already exist)
    #[arg(long, default_value = ".")]
    pub folder: PathBuf,
}

/// Arguments for the `record` command
#[derive(Args)]
pub struct RecordArgs {
    /// Signed transaction amount; a negative value swaps debit and credit
    #[arg(value_name = "AMOUNT", allow_negative_numbers = true)]
    pub amount: String,

    /// Entry description
    #[arg(value_name = "DESCRIPTION")]
    pub description: String,

    /// Account to debit
    #[arg(long, value_name = "ACCOUNT")]
    pub debit: String,

    /// Account to credit
    #[arg(long, value_name = "ACCOUNT")]
    pub credit: String,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Filter by account (includes the account's subtree)
    #[arg(short, long, value_name = "ACCOUNT")]
    pub account: Option<String>,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `summary` command
#[derive(Args)]
pub struct SummaryArgs {
    /// Scope the trial balance to an account subtree
    #[arg(short, long, value_name = "ACCOUNT")]
    pub account: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `accounts` command
#[derive(Args)]
pub struct AccountsArgs {
    /// Filter by account kind (asset, liability, income, expense, capital, drawings)
    #[arg(long, value_name = "KIND")]
    pub kind: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new ledger database
    Init(InitArgs),

    /// Record a journal entry
    Record(RecordArgs),

    /// List journal entries
    List(ListArgs),

    /// Show the trial balance
    Summary(SummaryArgs),

    /// List the chart of accounts
    Accounts(AccountsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
