//! bozo CLI - a double-entry bookkeeping tool.
//!
//! Thin command plumbing over the `bozo-core` storage engine: parse
//! arguments, resolve the database path, call the core, format output.

use clap::{CommandFactory, Parser};
use clap_complete::generate;

mod app;
mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {}", err);
        std::process::exit(app::exit_code(&err));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => commands::init::handle_init(cli, args),
        Some(Commands::Record(args)) => commands::record::handle_record(cli, args),
        Some(Commands::List(args)) => commands::list::handle_list(cli, args),
        Some(Commands::Summary(args)) => commands::summary::handle_summary(cli, args),
        Some(Commands::Accounts(args)) => commands::accounts::handle_accounts(cli, args),
        Some(Commands::Completions(args)) => {
            generate(
                args.shell,
                &mut Cli::command(),
                "bozo",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
