//! Initialize a new ledger database.

use bozo_core::{SqliteStorage, StorageEngine};

use crate::cli::{Cli, InitArgs};

pub fn handle_init(cli: &Cli, args: &InitArgs) -> anyhow::Result<()> {
    let path = args.folder.join(format!("{}.bozo", args.name));
    SqliteStorage::initialize(&path)?;
    if !cli.quiet {
        println!("Initialized database at '{}'.", path.display());
    }
    Ok(())
}
