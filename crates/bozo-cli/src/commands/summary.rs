//! Show the trial balance.

use bozo_core::StorageEngine;

use crate::app;
use crate::cli::{Cli, SummaryArgs};
use crate::output;

pub fn handle_summary(cli: &Cli, args: &SummaryArgs) -> anyhow::Result<()> {
    let storage = app::open_storage(cli)?;
    let totals = storage.trial_balance(args.account.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
        return Ok(());
    }
    if totals.is_empty() {
        if !cli.quiet {
            println!("No journal entries recorded yet.");
        }
        return Ok(());
    }
    output::print_trial_balance(&totals);
    Ok(())
}
