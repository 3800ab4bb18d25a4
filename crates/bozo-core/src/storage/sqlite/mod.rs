//! SQLite storage backend.
//!
//! One self-contained database file, openable by any standard SQLite
//! client for audit. Append-only semantics are enforced by the database
//! itself: BEFORE UPDATE / BEFORE DELETE triggers abort any mutation of
//! `journal_entries` or `line_items`, regardless of which client issues
//! the statement.

mod row;

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::account::{self, Account, AccountKind};
use crate::error::{LedgerError, Result};
use crate::journal::{JournalEntry, LineItem, NewJournalEntry, Side};
use crate::storage::traits::StorageEngine;
use crate::storage::types::{AccountTotals, EntryFilter};

use row::{parse_timestamp, AccountRow, EntryRow, LineItemRow};

/// Bound on lock waits before surfacing `LedgerError::Busy`.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed ledger storage.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    fn configure(conn: &Connection) -> Result<()> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE accounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                kind TEXT CHECK (kind IN ('asset','liability','income','expense','capital','drawings')),
                parent_id INTEGER REFERENCES accounts(id)
            );

            CREATE TABLE journal_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE line_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                entry_id INTEGER NOT NULL REFERENCES journal_entries(id),
                account_id INTEGER NOT NULL REFERENCES accounts(id),
                side TEXT NOT NULL CHECK (side IN ('debit','credit')),
                amount TEXT NOT NULL CHECK (CAST(amount AS NUMERIC) > 0)
            );

            -- The ledger is append-only. These triggers make the database
            -- itself reject history rewrites, even from other clients.
            CREATE TRIGGER journal_entries_no_update
            BEFORE UPDATE ON journal_entries
            BEGIN
                SELECT RAISE(ABORT, 'journal entries are immutable');
            END;

            CREATE TRIGGER journal_entries_no_delete
            BEFORE DELETE ON journal_entries
            BEGIN
                SELECT RAISE(ABORT, 'journal entries are immutable');
            END;

            CREATE TRIGGER line_items_no_update
            BEFORE UPDATE ON line_items
            BEGIN
                SELECT RAISE(ABORT, 'line items are immutable');
            END;

            CREATE TRIGGER line_items_no_delete
            BEFORE DELETE ON line_items
            BEGIN
                SELECT RAISE(ABORT, 'line items are immutable');
            END;
            "#,
        )?;
        Ok(())
    }
}

/// Get-or-create the account named by `name`, along with every ancestor in
/// its path, returning the account's id. Runs inside the caller's write
/// transaction.
fn ensure_account(conn: &Connection, name: &str) -> Result<i64> {
    let kind = AccountKind::from_root(account::root_segment(name));
    let mut resolved_id: Option<i64> = None;
    for path in account::ancestry(name) {
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM accounts WHERE name = ?",
                [path.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        let id = match existing {
            Some(id) => id,
            None => {
                conn.execute(
                    "INSERT INTO accounts (name, kind, parent_id) VALUES (?, ?, ?)",
                    (path.as_str(), kind.map(|k| k.as_str()), resolved_id),
                )?;
                conn.last_insert_rowid()
            }
        };
        resolved_id = Some(id);
    }
    resolved_id.ok_or_else(|| {
        LedgerError::InvalidLineItem(format!("account name '{}' is empty", name))
    })
}

/// Write-time timestamp, clamped so stored timestamps never decrease in
/// insertion order even if the clock steps backwards.
fn next_timestamp(conn: &Connection) -> Result<DateTime<Utc>> {
    let latest: Option<String> = conn
        .query_row(
            "SELECT created_at FROM journal_entries ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let now = Utc::now();
    match latest {
        Some(text) => Ok(now.max(parse_timestamp(&text)?)),
        None => Ok(now),
    }
}

fn load_line_items(conn: &Connection, entry_id: i64) -> Result<Vec<LineItem>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT a.name, li.side, li.amount
        FROM line_items li
        JOIN accounts a ON a.id = li.account_id
        WHERE li.entry_id = ?
        ORDER BY li.id
        "#,
    )?;
    let rows = stmt.query_map([entry_id], |row| {
        Ok(LineItemRow {
            account: row.get(0)?,
            side: row.get(1)?,
            amount: row.get(2)?,
        })
    })?;

    let mut line_items = Vec::new();
    for item in rows {
        line_items.push(item?.try_into()?);
    }
    Ok(line_items)
}

fn load_entry(conn: &Connection, entry_row: EntryRow) -> Result<JournalEntry> {
    let line_items = load_line_items(conn, entry_row.id)?;
    entry_row.into_entry(line_items)
}

/// SQL predicate matching an account name or any name in its subtree.
/// Binds three params: the name, then the `name:` prefix twice. String
/// comparison keeps the match case-sensitive (LIKE would not).
const ACCOUNT_SUBTREE_PREDICATE: &str = "(a.name = ? OR substr(a.name, 1, length(?)) = ?)";

fn push_subtree_params(params: &mut Vec<Box<dyn rusqlite::ToSql>>, account: &str) {
    let prefix = format!("{}:", account);
    params.push(Box::new(account.to_string()));
    params.push(Box::new(prefix.clone()));
    params.push(Box::new(prefix));
}

impl StorageEngine for SqliteStorage {
    fn initialize(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(LedgerError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(LedgerError::Path(parent.to_path_buf()));
            }
        }

        let conn = Connection::open(path)?;
        Self::configure(&conn)?;
        Self::create_schema(&conn)?;
        Ok(Self { conn })
    }

    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LedgerError::NotInitialized(path.to_path_buf()));
        }
        let conn = Connection::open(path)?;
        Self::configure(&conn)?;
        Ok(Self { conn })
    }

    fn record_entry(&mut self, entry: &NewJournalEntry) -> Result<i64> {
        // Fail fast: nothing below runs for an invalid entry.
        entry.validate()?;

        let tx = self.conn.transaction()?;

        let mut account_ids = Vec::with_capacity(entry.line_items.len());
        for item in &entry.line_items {
            account_ids.push(ensure_account(&tx, &item.account)?);
        }

        let created_at = next_timestamp(&tx)?;
        tx.execute(
            "INSERT INTO journal_entries (description, created_at) VALUES (?, ?)",
            (entry.description.as_str(), created_at.to_rfc3339()),
        )?;
        let entry_id = tx.last_insert_rowid();

        for (item, account_id) in entry.line_items.iter().zip(&account_ids) {
            tx.execute(
                "INSERT INTO line_items (entry_id, account_id, side, amount) VALUES (?, ?, ?, ?)",
                (entry_id, account_id, item.side.as_str(), item.amount.to_string()),
            )?;
        }

        tx.commit()?;
        Ok(entry_id)
    }

    fn entry(&self, id: i64) -> Result<Option<JournalEntry>> {
        let entry_row = self
            .conn
            .query_row(
                "SELECT id, description, created_at FROM journal_entries WHERE id = ?",
                [id],
                |row| {
                    Ok(EntryRow {
                        id: row.get(0)?,
                        description: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()?;

        match entry_row {
            Some(entry_row) => Ok(Some(load_entry(&self.conn, entry_row)?)),
            None => Ok(None),
        }
    }

    fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<JournalEntry>> {
        // One read transaction so the entry rows and their line items come
        // from the same snapshot.
        let tx = self.conn.unchecked_transaction()?;

        let mut sql =
            String::from("SELECT e.id, e.description, e.created_at FROM journal_entries e");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref account) = filter.account {
            sql.push_str(
                " WHERE EXISTS (SELECT 1 FROM line_items li \
                 JOIN accounts a ON a.id = li.account_id \
                 WHERE li.entry_id = e.id AND ",
            );
            sql.push_str(ACCOUNT_SUBTREE_PREDICATE);
            sql.push(')');
            push_subtree_params(&mut params, account);
        }

        sql.push_str(" ORDER BY e.id");
        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            params.push(Box::new(limit as i64));
        }

        let mut entry_rows = Vec::new();
        {
            let mut stmt = tx.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
                Ok(EntryRow {
                    id: row.get(0)?,
                    description: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?;
            for entry_row in rows {
                entry_rows.push(entry_row?);
            }
        }

        let mut entries = Vec::with_capacity(entry_rows.len());
        for entry_row in entry_rows {
            entries.push(load_entry(&tx, entry_row)?);
        }

        tx.commit()?;
        Ok(entries)
    }

    fn account_balance(&self, account: &str) -> Result<Decimal> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT a.name, li.side, li.amount
            FROM line_items li
            JOIN accounts a ON a.id = li.account_id
            WHERE a.name = ?
            "#,
        )?;
        let rows = stmt.query_map([account], |row| {
            Ok(LineItemRow {
                account: row.get(0)?,
                side: row.get(1)?,
                amount: row.get(2)?,
            })
        })?;

        // Sum in decimal space; an account with no activity nets to zero.
        let mut net = Decimal::ZERO;
        for row in rows {
            let item: LineItem = row?.try_into()?;
            match item.side {
                Side::Debit => net += item.amount,
                Side::Credit => net -= item.amount,
            }
        }
        Ok(net)
    }

    fn trial_balance(&self, scope: Option<&str>) -> Result<Vec<AccountTotals>> {
        let mut sql = String::from(
            "SELECT a.name, li.side, li.amount FROM line_items li \
             JOIN accounts a ON a.id = li.account_id",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(scope) = scope {
            sql.push_str(" WHERE ");
            sql.push_str(ACCOUNT_SUBTREE_PREDICATE);
            push_subtree_params(&mut params, scope);
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok(LineItemRow {
                account: row.get(0)?,
                side: row.get(1)?,
                amount: row.get(2)?,
            })
        })?;

        let mut totals: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
        for row in rows {
            let item: LineItem = row?.try_into()?;
            let slot = totals.entry(item.account).or_default();
            match item.side {
                Side::Debit => slot.0 += item.amount,
                Side::Credit => slot.1 += item.amount,
            }
        }

        Ok(totals
            .into_iter()
            .map(|(account, (debits, credits))| AccountTotals {
                account,
                debits,
                credits,
                net: debits - credits,
            })
            .collect())
    }

    fn accounts(&self, kind: Option<AccountKind>) -> Result<Vec<Account>> {
        let mut sql = String::from("SELECT id, name, kind, parent_id FROM accounts");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(kind) = kind {
            sql.push_str(" WHERE kind = ?");
            params.push(Box::new(kind.as_str()));
        }
        sql.push_str(" ORDER BY name");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params.iter()), |row| {
            Ok(AccountRow {
                id: row.get(0)?,
                name: row.get(1)?,
                kind: row.get(2)?,
                parent_id: row.get(3)?,
            })
        })?;

        let mut accounts = Vec::new();
        for account_row in rows {
            accounts.push(account_row?.try_into()?);
        }
        Ok(accounts)
    }
}
