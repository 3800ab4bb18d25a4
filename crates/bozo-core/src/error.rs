//! Error types for core ledger operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these to
//! user-facing messages and exit codes. Only `Busy` is retryable by the
//! caller; every other kind is permanent for the given input.

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Core error type for ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed amount or other unparseable input
    #[error("Invalid amount: {0}")]
    Parse(String),

    /// Line item fails validation (non-positive amount, missing side, bad account name)
    #[error("Invalid line item: {0}")]
    InvalidLineItem(String),

    /// Debit and credit totals differ
    #[error("Unbalanced entry: debits {debits} != credits {credits}")]
    Unbalanced { debits: Decimal, credits: Decimal },

    /// Init target file already exists
    #[error("Database already exists at '{}'", .0.display())]
    AlreadyExists(PathBuf),

    /// Init target folder does not exist
    #[error("Folder '{}' does not exist", .0.display())]
    Path(PathBuf),

    /// Database file not found on open
    #[error("Database not found at '{}'. Run 'bozo init --name <name> --folder <folder>' first.", .0.display())]
    NotInitialized(PathBuf),

    /// Lock contention; the only retryable kind
    #[error("Database is busy: {0}")]
    Busy(String),

    /// Update or delete of historical rows rejected by the storage layer
    #[error("Ledger history is immutable: {0}")]
    Immutable(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, ref message) = err {
            match code.code {
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                    return LedgerError::Busy(err.to_string());
                }
                rusqlite::ErrorCode::ConstraintViolation => {
                    // Immutability triggers abort with a message naming the table.
                    if let Some(msg) = message {
                        if msg.contains("immutable") {
                            return LedgerError::Immutable(msg.clone());
                        }
                    }
                }
                _ => {}
            }
        }
        LedgerError::Storage(err.to_string())
    }
}
