//! Row types bridging SQLite rows and domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::account::{Account, AccountKind};
use crate::error::{LedgerError, Result};
use crate::journal::{JournalEntry, LineItem, Side};

/// Raw journal entry row, before timestamp parsing.
#[derive(Debug)]
pub(super) struct EntryRow {
    pub id: i64,
    pub description: String,
    pub created_at: String,
}

impl EntryRow {
    pub fn into_entry(self, line_items: Vec<LineItem>) -> Result<JournalEntry> {
        Ok(JournalEntry {
            id: self.id,
            description: self.description,
            created_at: parse_timestamp(&self.created_at)?,
            line_items,
        })
    }
}

/// Raw line item row, joined with its account name.
#[derive(Debug)]
pub(super) struct LineItemRow {
    pub account: String,
    pub side: String,
    pub amount: String,
}

impl TryFrom<LineItemRow> for LineItem {
    type Error = LedgerError;

    fn try_from(row: LineItemRow) -> Result<Self> {
        let side = Side::parse(&row.side)?;
        let amount = Decimal::from_str_exact(&row.amount).map_err(|e| {
            LedgerError::Storage(format!("Invalid stored amount '{}': {}", row.amount, e))
        })?;
        Ok(LineItem {
            account: row.account,
            side,
            amount,
        })
    }
}

/// Raw account row.
#[derive(Debug)]
pub(super) struct AccountRow {
    pub id: i64,
    pub name: String,
    pub kind: Option<String>,
    pub parent_id: Option<i64>,
}

impl TryFrom<AccountRow> for Account {
    type Error = LedgerError;

    fn try_from(row: AccountRow) -> Result<Self> {
        let kind = row
            .kind
            .as_deref()
            .map(|value| {
                AccountKind::parse(value).map_err(|_| {
                    LedgerError::Storage(format!("Invalid stored account kind '{}'", value))
                })
            })
            .transpose()?;
        Ok(Account {
            id: row.id,
            name: row.name,
            kind,
            parent_id: row.parent_id,
        })
    }
}

pub(super) fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| LedgerError::Storage(format!("Invalid timestamp '{}': {}", text, e)))
}
