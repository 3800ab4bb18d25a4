//! List the chart of accounts.

use bozo_core::account::AccountKind;
use bozo_core::StorageEngine;

use crate::app;
use crate::cli::{AccountsArgs, Cli};
use crate::output;

pub fn handle_accounts(cli: &Cli, args: &AccountsArgs) -> anyhow::Result<()> {
    let kind = args.kind.as_deref().map(AccountKind::parse).transpose()?;

    let storage = app::open_storage(cli)?;
    let accounts = storage.accounts(kind)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }
    if accounts.is_empty() {
        if !cli.quiet {
            println!("No accounts found.");
        }
        return Ok(());
    }
    output::print_account_table(&accounts);
    Ok(())
}
