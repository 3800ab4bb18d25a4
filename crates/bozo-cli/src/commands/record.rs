//! Record a balanced journal entry.

use bozo_core::journal::NewJournalEntry;
use bozo_core::money::parse_amount;
use bozo_core::StorageEngine;

use crate::app;
use crate::cli::{Cli, RecordArgs};
use crate::output;

pub fn handle_record(cli: &Cli, args: &RecordArgs) -> anyhow::Result<()> {
    // Validate before touching the database; a bad amount never opens it.
    let amount = parse_amount(&args.amount)?;
    let entry = NewJournalEntry::transfer(
        amount,
        args.description.as_str(),
        args.debit.as_str(),
        args.credit.as_str(),
    )?;

    let mut storage = app::open_storage(cli)?;
    let entry_id = storage.record_entry(&entry)?;

    if !cli.quiet {
        let debit = &entry.line_items[0];
        let credit = &entry.line_items[1];
        println!(
            "Recorded entry #{}: {} - {} [debit: {}, credit: {}]",
            entry_id,
            output::money(&debit.amount),
            args.description,
            debit.account,
            credit.account,
        );
    }
    Ok(())
}
