//! Database resolution and error-to-exit-code mapping.

use std::fmt;
use std::path::PathBuf;

use bozo_core::{LedgerError, SqliteStorage, StorageEngine};

use crate::cli::Cli;

/// No database path was available from the flag or the environment.
#[derive(Debug)]
pub struct MissingDatabase;

impl fmt::Display for MissingDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No database specified. Use -d/--database or set the BOZO_DB environment variable."
        )
    }
}

impl std::error::Error for MissingDatabase {}

/// Resolve the database path. The explicit `-d/--database` flag wins over
/// the `BOZO_DB` environment variable (clap applies that precedence);
/// with neither set, this is an error.
pub fn resolve_database_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match cli.database {
        Some(ref path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => Err(MissingDatabase.into()),
    }
}

pub fn open_storage(cli: &Cli) -> anyhow::Result<SqliteStorage> {
    let path = resolve_database_path(cli)?;
    Ok(SqliteStorage::open(&path)?)
}

/// Map an error to the process exit code. Scripts can tell validation
/// failures, missing databases, and lock contention apart.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<MissingDatabase>().is_some() {
        return 3;
    }
    match err.downcast_ref::<LedgerError>() {
        Some(
            LedgerError::Parse(_)
            | LedgerError::InvalidLineItem(_)
            | LedgerError::Unbalanced { .. },
        ) => 2,
        Some(
            LedgerError::AlreadyExists(_) | LedgerError::Path(_) | LedgerError::NotInitialized(_),
        ) => 3,
        Some(LedgerError::Busy(_)) => 4,
        _ => 1,
    }
}
