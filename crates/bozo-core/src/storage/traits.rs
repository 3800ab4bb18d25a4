//! Storage engine trait definition.
//!
//! The `StorageEngine` trait defines the interface the CLI layer programs
//! against. All implementations must ensure:
//!
//! - Every entry is written in one atomic transaction (no partial entries)
//! - Recorded entries and line items are append-only: no update, no delete
//! - Amounts are stored as canonical decimal text, never as floats

use std::path::Path;

use rust_decimal::Decimal;

use crate::account::{Account, AccountKind};
use crate::error::Result;
use crate::journal::{JournalEntry, NewJournalEntry};
use crate::storage::types::{AccountTotals, EntryFilter};

/// Storage engine interface for the append-only ledger.
pub trait StorageEngine {
    /// Create a new ledger database at the specified path.
    ///
    /// The containing directory must already exist; this never creates
    /// intermediate directories.
    ///
    /// # Errors
    ///
    /// - `LedgerError::AlreadyExists` if a file is already at `path`
    /// - `LedgerError::Path` if the containing directory is missing
    fn initialize(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Open an existing ledger database.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotInitialized` if no file exists at `path`.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    // --- Write path ---

    /// Record a journal entry. This is the sole write path; the ledger
    /// has no update or delete operation.
    ///
    /// Validates the entry first, then, in one transaction: creates any
    /// accounts referenced for the first time (including ancestors of
    /// hierarchical names), inserts the entry row, and inserts all line
    /// items. On any failure the whole transaction rolls back.
    ///
    /// # Returns
    ///
    /// Returns the identifier of the recorded entry.
    ///
    /// # Errors
    ///
    /// - `LedgerError::InvalidLineItem` / `LedgerError::Unbalanced` from
    ///   validation, before anything is written
    /// - `LedgerError::Busy` on lock contention (retryable)
    fn record_entry(&mut self, entry: &NewJournalEntry) -> Result<i64>;

    // --- Read path ---

    /// Get a recorded entry by id.
    ///
    /// # Returns
    ///
    /// Returns `Ok(Some(entry))` if found, `Ok(None)` if not found.
    fn entry(&self, id: i64) -> Result<Option<JournalEntry>>;

    /// List entries matching the filter, in insertion order (oldest
    /// first), each with its line items. The result is materialized under
    /// one read transaction, so it reflects a consistent snapshot.
    fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<JournalEntry>>;

    /// Net balance for one account name: debits minus credits.
    ///
    /// An account with no recorded activity (including one that does not
    /// exist) has a balance of zero; non-existence is not an error.
    fn account_balance(&self, account: &str) -> Result<Decimal>;

    /// Per-account debit/credit/net totals, sorted by account name,
    /// optionally scoped to an account and its subtree.
    fn trial_balance(&self, scope: Option<&str>) -> Result<Vec<AccountTotals>>;

    /// The chart of accounts, sorted by name, optionally filtered by kind.
    fn accounts(&self, kind: Option<AccountKind>) -> Result<Vec<Account>>;
}
