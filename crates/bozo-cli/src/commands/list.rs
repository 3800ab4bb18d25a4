//! List journal entries.

use bozo_core::storage::EntryFilter;
use bozo_core::StorageEngine;

use crate::app;
use crate::cli::{Cli, ListArgs};
use crate::output;

pub fn handle_list(cli: &Cli, args: &ListArgs) -> anyhow::Result<()> {
    let storage = app::open_storage(cli)?;

    let mut filter = EntryFilter::new();
    if let Some(ref account) = args.account {
        filter = filter.account(account.clone());
    }
    if let Some(limit) = args.limit {
        filter = filter.limit(limit);
    }

    let entries = storage.list_entries(&filter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        if !cli.quiet {
            println!("No journal entries found.");
        }
        return Ok(());
    }
    output::print_entry_table(&entries);
    Ok(())
}
