//! Read models and query filters for the storage layer.

use rust_decimal::Decimal;
use serde::Serialize;

/// Filter for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Restrict to entries with a line item against this account or any
    /// account in its subtree.
    pub account: Option<String>,

    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Per-account totals in a trial balance.
///
/// `net` follows the documented sign convention: debits minus credits, so
/// expense-style accounts show positive net and income-style accounts
/// negative.
#[derive(Debug, Clone, Serialize)]
pub struct AccountTotals {
    pub account: String,
    pub debits: Decimal,
    pub credits: Decimal,
    pub net: Decimal,
}
